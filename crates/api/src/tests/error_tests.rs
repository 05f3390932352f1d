// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error translation tests.

use boleteria::CoreError;
use boleteria_domain::{DomainError, Money};
use boleteria_persistence::PersistenceError;
use time::macros::datetime;

use crate::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

#[test]
fn test_domain_errors_are_invalid_arguments_naming_the_field() {
    let err = translate_domain_error(DomainError::InvalidCard {
        field: "cvv",
        reason: String::from("must be 3 or 4 digits"),
    });
    assert_eq!(err.kind(), "INVALID_ARGUMENT");
    assert_eq!(err.reason(), Some("cvv"));

    let horizon = translate_domain_error(DomainError::ShowtimeBeyondHorizon {
        showtime: datetime!(2040-01-01 0:00 UTC),
        horizon: datetime!(2031-06-01 12:00 UTC),
    });
    assert_eq!(horizon.reason(), Some("horizon"));
}

#[test]
fn test_core_conflicts_keep_their_tag_without_internal_ids() {
    let overlap = translate_core_error(CoreError::Overlap {
        auditorium_id: 41,
        conflicting_screening_id: 42,
    });
    assert_eq!(overlap.kind(), "CONFLICT_STATE");
    assert_eq!(overlap.reason(), Some("overlap"));
    assert!(!overlap.to_string().contains("41"));
    assert!(!overlap.to_string().contains("42"));

    let funds = translate_core_error(CoreError::InsufficientFunds {
        balance: Money::from_cents(100),
        required: Money::from_cents(250_000),
    });
    assert_eq!(funds.reason(), Some("insufficient_funds"));

    let no_card = translate_core_error(CoreError::NoCard);
    assert_eq!(no_card.kind(), "NOT_FOUND");
    assert_eq!(no_card.reason(), Some("no_card"));
}

#[test]
fn test_storage_text_never_reaches_the_caller() {
    let internal = translate_persistence_error(PersistenceError::QueryFailed(String::from(
        "near \"SELEKT\": syntax error",
    )));
    assert_eq!(internal.kind(), "INTERNAL");
    assert!(!internal.to_string().contains("SELEKT"));

    let busy = translate_persistence_error(PersistenceError::LockContention(String::from(
        "database is locked",
    )));
    assert_eq!(busy.kind(), "CONFLICT_STATE");
    assert_eq!(busy.reason(), Some("retry"));
    assert!(!busy.to_string().contains("locked"));
}

#[test]
fn test_unique_violation_names_the_column() {
    let err = translate_persistence_error(PersistenceError::UniqueViolation(String::from(
        "UNIQUE constraint failed: users.email",
    )));

    assert_eq!(err.reason(), Some("duplicate"));
    assert_eq!(err.to_string(), "Email is already in use");
}

#[test]
fn test_rejections_and_lookups_translate_through() {
    let rejected = translate_persistence_error(PersistenceError::Rejected(
        CoreError::HasTickets { tickets_sold: 3 },
    ));
    assert_eq!(rejected.reason(), Some("has_tickets"));

    let missing =
        translate_persistence_error(PersistenceError::NotFound(String::from("screening")));
    assert_eq!(
        missing,
        ApiError::NotFound {
            resource: String::from("screening"),
            message: String::from("Screening not found"),
        }
    );
}

#[test]
fn test_auth_errors_map_to_taxonomy() {
    let unauthenticated: ApiError = AuthError::AuthenticationFailed {
        reason: String::from("token expired"),
    }
    .into();
    assert_eq!(unauthenticated.kind(), "AUTH_REQUIRED");
    assert_eq!(unauthenticated.reason(), None);

    let forbidden: ApiError = AuthError::Unauthorized {
        action: String::from("creating a movie"),
        requirement: String::from("the ADMIN role"),
    }
    .into();
    assert_eq!(forbidden.kind(), "FORBIDDEN");
    assert_eq!(
        forbidden.to_string(),
        "Forbidden: creating a movie requires the ADMIN role"
    );
}
