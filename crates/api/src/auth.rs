// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use boleteria_domain::{Card, Role, Ticket, User};
use boleteria_persistence::{Persistence, UserCredentials, verify_password};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::token::{Claims, IssuedToken, TokenConfig, issue_token, verify_token};

/// An authenticated caller.
///
/// Resolved once per request from the bearer token and threaded into every
/// operation that needs to know who is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The caller's user ID.
    pub user_id: i64,
    /// The caller's username.
    pub username: String,
    /// The caller's role.
    pub role: Role,
}

impl Principal {
    /// Creates a new principal.
    #[must_use]
    pub const fn new(user_id: i64, username: String, role: Role) -> Self {
        Self {
            user_id,
            username,
            role,
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone(), user.role)
    }
}

/// Authorization service for enforcing role and ownership rules.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the caller is an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the ADMIN role.
    pub fn is_admin(principal: &Principal, action: &str) -> Result<(), AuthError> {
        match principal.role {
            Role::Admin => Ok(()),
            Role::Client => Err(AuthError::Unauthorized {
                action: action.to_string(),
                requirement: String::from("the ADMIN role"),
            }),
        }
    }

    /// Checks that the caller is a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the CLIENT role.
    pub fn is_client(principal: &Principal, action: &str) -> Result<(), AuthError> {
        match principal.role {
            Role::Client => Ok(()),
            Role::Admin => Err(AuthError::Unauthorized {
                action: action.to_string(),
                requirement: String::from("the CLIENT role"),
            }),
        }
    }

    /// Checks that the caller owns a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the card belongs to another user.
    pub fn owns_card(principal: &Principal, card: &Card) -> Result<(), AuthError> {
        if card.user_id == principal.user_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("reading another user's card"),
            requirement: String::from("ownership of the card"),
        })
    }

    /// Checks that the caller owns a ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket belongs to another user.
    pub fn owns_ticket(principal: &Principal, ticket: &Ticket) -> Result<(), AuthError> {
        if ticket.user_id == principal.user_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("reading another user's ticket"),
            requirement: String::from("ownership of the ticket"),
        })
    }
}

/// Authentication service for bearer-token authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Verifies a username and password and issues a token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The username
    /// * `password` - The plaintext password
    /// * `config` - Token signing configuration
    /// * `now` - The current instant
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the token cannot be
    /// signed.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        config: &TokenConfig,
        now: OffsetDateTime,
    ) -> Result<(IssuedToken, Principal), AuthError> {
        let bad_credentials = || AuthError::AuthenticationFailed {
            reason: String::from("invalid username or password"),
        };

        let credentials: UserCredentials = persistence
            .get_credentials_by_username(username)
            .map_err(|e| {
                warn!(username, error = %e, "Credential lookup failed");
                bad_credentials()
            })?
            .ok_or_else(bad_credentials)?;

        let matches: bool = verify_password(password, &credentials.password_hash).map_err(|e| {
            warn!(username, error = %e, "Stored password hash is unreadable");
            bad_credentials()
        })?;
        if !matches {
            debug!(username, "Password mismatch");
            return Err(bad_credentials());
        }

        let principal = Principal::from(&credentials.user);
        let issued: IssuedToken = issue_token(&principal.username, principal.role, config, now)?;
        Ok((issued, principal))
    }

    /// Resolves the principal behind a bearer token.
    ///
    /// The token's subject is looked up so the stored role is authoritative
    /// and tokens of deleted users stop working.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid or expired, or its subject
    /// no longer exists.
    pub fn authenticate(
        persistence: &mut Persistence,
        token: &str,
        config: &TokenConfig,
        now: OffsetDateTime,
    ) -> Result<Principal, AuthError> {
        let claims: Claims = verify_token(token, config, now)?;

        let credentials: UserCredentials = persistence
            .get_credentials_by_username(&claims.sub)
            .map_err(|e| {
                warn!(username = %claims.sub, error = %e, "Principal lookup failed");
                AuthError::AuthenticationFailed {
                    reason: String::from("principal lookup failed"),
                }
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("unknown subject"),
            })?;

        if claims.role() != Some(credentials.user.role) {
            debug!(
                username = %claims.sub,
                "Token role differs from stored role, using stored role"
            );
        }

        Ok(Principal::from(&credentials.user))
    }
}
