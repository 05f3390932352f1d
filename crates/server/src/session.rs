// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer token extraction for the server.
//!
//! This module provides the Axum extractor that resolves the caller of a
//! protected route to a [`Principal`].

use axum::{extract::FromRequestParts, http::request::Parts};
use boleteria_api::{ApiError, AuthenticationService, Principal};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for authenticated callers.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     Session(principal): Session,
/// ) -> Result<Json<Response>, HttpError> {
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Verify signature and expiry
/// 3. Look up the token's subject; the stored role wins over the claim
///
/// # Errors
///
/// Rejects with `AUTH_REQUIRED` (401) if the header is missing or
/// malformed, or the token does not resolve to a user.
pub struct Session(pub Principal);

fn auth_required(reason: &str) -> HttpError {
    HttpError::from(ApiError::AuthRequired {
        reason: reason.to_string(),
    })
}

impl FromRequestParts<AppState> for Session {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                auth_required("missing bearer token")
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                auth_required("malformed Authorization header")
            })?;

        let token: &str = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                debug!("Authorization header is not a bearer token");
                auth_required("expected 'Bearer <token>'")
            })?;

        let mut persistence = state.lock_persistence().await?;
        let principal: Principal = AuthenticationService::authenticate(
            &mut persistence,
            token,
            &state.tokens,
            OffsetDateTime::now_utc(),
        )
        .map_err(|e| {
            debug!(error = %e, "Token rejected");
            HttpError::from(ApiError::from(e))
        })?;

        debug!(
            user_id = principal.user_id,
            role = %principal.role,
            "Authenticated request"
        );
        Ok(Self(principal))
    }
}
