// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the username as subject and the user's
//! role names. Expiry is checked against the caller-supplied `now`.

use boleteria_domain::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(1);

/// Signing configuration for bearer tokens.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenConfig {
    /// Creates a token configuration.
    ///
    /// # Arguments
    ///
    /// * `secret` - The HS256 signing key
    /// * `ttl` - How long issued tokens stay valid
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl,
        }
    }

    /// Returns the token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// JWT claims embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username.
    pub sub: String,
    /// Role names, e.g. `["CLIENT"]`.
    pub roles: Vec<String>,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Returns the first role in the claims that names a known role.
    ///
    /// A `ROLE_` prefix is accepted.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.roles.iter().find_map(|name| name.parse().ok())
    }
}

/// An issued token with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: OffsetDateTime,
}

/// Issues a signed token for a user.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn issue_token(
    username: &str,
    role: Role,
    config: &TokenConfig,
    now: OffsetDateTime,
) -> Result<IssuedToken, AuthError> {
    let expires_at: OffsetDateTime = now.checked_add(config.ttl).ok_or_else(|| {
        AuthError::AuthenticationFailed {
            reason: String::from("token expiry out of range"),
        }
    })?;
    let claims = Claims {
        sub: username.to_string(),
        roles: vec![role.as_str().to_string()],
        iat: now.unix_timestamp(),
        exp: expires_at.unix_timestamp(),
    };

    let token: String = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&config.secret),
    )
    .map_err(|e| AuthError::AuthenticationFailed {
        reason: format!("Failed to sign token: {e}"),
    })?;

    Ok(IssuedToken { token, expires_at })
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns [`AuthError::AuthenticationFailed`] if the token is malformed,
/// signed with another key, or expired at `now`.
pub fn verify_token(
    token: &str,
    config: &TokenConfig,
    now: OffsetDateTime,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);

    let claims: Claims = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(&config.secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::AuthenticationFailed {
        reason: String::from("invalid token"),
    })?;

    if claims.exp <= now.unix_timestamp() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("token expired"),
        });
    }

    Ok(claims)
}
