// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Body, path and query extractors that reject with the JSON error shape.
//!
//! Axum's own extractors reject with plain-text bodies and a mix of 400,
//! 415 and 422. These wrappers report every malformed input as
//! `INVALID_ARGUMENT` (400).

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use boleteria_api::ApiError;
use tracing::debug;

use crate::HttpError;

/// The framework's rejection text stays in the log; callers get `message`.
fn invalid(field: &str, message: &str, detail: &str) -> HttpError {
    debug!(field, detail, "Rejected malformed request input");
    HttpError::from(ApiError::InvalidArgument {
        field: field.to_string(),
        message: message.to_string(),
    })
}

fn body_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "Request body has missing or mistyped fields",
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be sent as application/json"
        }
        _ => "Request body could not be read",
    }
}

/// A JSON request body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                invalid("body", body_message(&rejection), &rejection.body_text())
            })?;
        Ok(Self(value))
    }
}

/// Path parameters.
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                invalid("path", "Path parameter is malformed", &rejection.body_text())
            })?;
        Ok(Self(value))
    }
}

/// Query string parameters.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                invalid("query", "Query string is malformed", &rejection.body_text())
            })?;
        Ok(Self(value))
    }
}
