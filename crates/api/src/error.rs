// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! [`ApiError`] is the closed set of failure kinds every operation reports.
//! Errors from inner layers are translated explicitly so that neither
//! internal identifiers nor storage engine text reach a caller.

use boleteria::CoreError;
use boleteria_domain::DomainError;
use boleteria_persistence::PersistenceError;
use thiserror::Error;
use tracing::{error, warn};

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The caller could not be authenticated.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is authenticated but lacks the role or ownership required.
    #[error("Forbidden: {action} requires {requirement}")]
    Unauthorized {
        /// What the caller attempted, phrased for the message.
        action: String,
        /// What the caller would need.
        requirement: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A caller-supplied value violates a syntactic or range rule.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A token is missing, malformed or expired, or credentials are wrong.
    #[error("Authentication required: {reason}")]
    AuthRequired {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller lacks the role or ownership required.
    #[error("Forbidden: {action} requires {requirement}")]
    Forbidden {
        /// What the caller attempted, phrased for the message.
        action: String,
        /// What the caller would need.
        requirement: String,
    },
    /// A referenced entity does not exist or is not visible to the caller.
    #[error("{message}")]
    NotFound {
        /// The kind of resource that was not found.
        resource: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request is well formed but violates a state invariant.
    #[error("{message}")]
    Conflict {
        /// Short tag naming the violated invariant.
        reason: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An unexpected failure.
    #[error("Internal error: {message}")]
    Internal {
        /// A description safe to show to callers.
        message: String,
    },
}

impl ApiError {
    /// Returns the taxonomy name of this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::AuthRequired { .. } => "AUTH_REQUIRED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT_STATE",
            Self::Internal { .. } => "INTERNAL",
        }
    }

    /// Returns the short machine-readable tag carried by this error, if any.
    ///
    /// Invalid arguments carry the field name, lookups carry the resource
    /// name and conflicts carry the violated invariant.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field),
            Self::NotFound { resource, .. } => Some(resource),
            Self::Conflict { reason, .. } => Some(reason),
            Self::AuthRequired { .. } | Self::Forbidden { .. } | Self::Internal { .. } => None,
        }
    }

    /// Builds a not-found error for a resource name.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            message: format!("{} not found", capitalize(resource)),
        }
    }

    fn internal() -> Self {
        Self::Internal {
            message: String::from("unexpected failure, see server logs"),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthRequired { reason },
            AuthError::Unauthorized {
                action,
                requirement,
            } => Self::Forbidden {
                action,
                requirement,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error is a rejected argument. The field name is carried so
/// clients can attach the message to the right input.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match &err {
        DomainError::InvalidUser { field, .. }
        | DomainError::InvalidMovie { field, .. }
        | DomainError::InvalidAuditorium { field, .. }
        | DomainError::InvalidCard { field, .. }
        | DomainError::InvalidIdentifier { field, .. } => field,
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidScreenType(_) => "screen_type",
        DomainError::InvalidCardType(_) => "card_type",
        DomainError::InvalidMoney { .. } | DomainError::InvalidRechargeAmount { .. } => "amount",
        DomainError::InvalidQuantity { .. } | DomainError::QuantityTooLarge { .. } => "quantity",
        DomainError::InvalidShowtime(_) | DomainError::ShowtimeNotInFuture { .. } => "showtime",
        DomainError::ShowtimeBeyondHorizon { .. } => "horizon",
        DomainError::DateArithmeticOverflow { .. } => "date",
    };

    ApiError::InvalidArgument {
        field: field.to_string(),
        message,
    }
}

/// Translates a core error into an API error.
///
/// A missing card is reported as `NOT_FOUND` with resource `no_card`; every
/// other rule violation is a conflict tagged with [`CoreError::reason`].
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoCard => ApiError::NotFound {
            resource: String::from("no_card"),
            message: String::from("No card registered, create a card first"),
        },
        other => ApiError::Conflict {
            reason: other.reason().to_string(),
            message: conflict_message(&other),
        },
    }
}

fn conflict_message(err: &CoreError) -> String {
    match err {
        CoreError::AuditoriumDisabled { .. } => String::from("The auditorium is disabled"),
        CoreError::DuplicateShowtime { .. } => {
            String::from("The auditorium already has a screening at that showtime")
        }
        CoreError::Overlap { .. } => {
            String::from("The screening overlaps another screening in the auditorium")
        }
        CoreError::HasTickets { tickets_sold } => {
            format!("Not allowed after tickets were sold ({tickets_sold} sold)")
        }
        _ => err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Lock contention becomes `CONFLICT_STATE("retry")`. Unique violations
/// become `CONFLICT_STATE("duplicate")` naming the column that clashed.
/// Storage failures are logged and reported as `INTERNAL` without the
/// storage message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Rejected(core_err) => translate_core_error(core_err),
        PersistenceError::NotFound(resource) => ApiError::not_found(&resource),
        PersistenceError::UniqueViolation(detail) => ApiError::Conflict {
            reason: String::from("duplicate"),
            message: format!("{} is already in use", unique_column(&detail)),
        },
        PersistenceError::ForeignKeyViolation(_) => ApiError::Conflict {
            reason: String::from("in_use"),
            message: String::from("The record is referenced by other records"),
        },
        PersistenceError::LockContention(detail) => {
            warn!(%detail, "Storage lock contention");
            ApiError::Conflict {
                reason: String::from("retry"),
                message: String::from("The system is busy, retry the request"),
            }
        }
        other => {
            error!(error = %other, "Storage failure");
            ApiError::internal()
        }
    }
}

/// Extracts the column name from a `UNIQUE constraint failed: table.column`
/// message.
fn unique_column(detail: &str) -> String {
    detail
        .rsplit_once('.')
        .map(|(_, column)| column.trim())
        .filter(|column| !column.is_empty())
        .map_or_else(|| String::from("Value"), capitalize)
}
