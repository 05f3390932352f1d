// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::macros::date;

use crate::{
    AuditoriumFields, CardFields, CardType, DomainError, MAX_RECHARGE_AMOUNT, Money, MovieFields,
    Registration, ScreenType, ValidatedCard, validate_auditorium_fields, validate_card_fields,
    validate_identifier, validate_movie_fields, validate_quantity, validate_recharge_amount,
    validate_registration,
};

const TODAY: Date = date!(2026-10-16);

fn create_test_movie_fields() -> MovieFields {
    MovieFields {
        title: String::from("The Long Night"),
        duration_minutes: 100,
        genre: String::from("Drama"),
        director: String::from("A. Director"),
        rating: String::from("PG-13"),
        synopsis: String::from("A night that does not end."),
    }
}

fn create_test_card_fields() -> CardFields {
    CardFields {
        card_number: String::from("4111111111111111"),
        holder_name: String::from("Jane Client"),
        issue_date: String::from("01/25"),
        expiration_date: String::from("01/30"),
        cvv: String::from("123"),
        card_type: CardType::Credit,
    }
}

fn create_test_registration() -> Registration {
    Registration {
        username: String::from("jane"),
        email: String::from("jane@example.com"),
        password: String::from("secret"),
        name: String::from("Jane"),
        surname: String::from("Client"),
    }
}

#[test]
fn test_validate_registration_accepts_valid_fields() {
    assert!(validate_registration(&create_test_registration()).is_ok());
}

#[test]
fn test_validate_registration_rejects_short_username() {
    let mut registration: Registration = create_test_registration();
    registration.username = String::from("jo");
    assert!(matches!(
        validate_registration(&registration),
        Err(DomainError::InvalidUser {
            field: "username",
            ..
        })
    ));
}

#[test]
fn test_validate_registration_rejects_malformed_email() {
    let mut registration: Registration = create_test_registration();
    registration.email = String::from("jane.example.com");
    assert!(matches!(
        validate_registration(&registration),
        Err(DomainError::InvalidUser { field: "email", .. })
    ));
}

#[test]
fn test_validate_movie_fields_returns_duration() {
    assert_eq!(validate_movie_fields(&create_test_movie_fields()).unwrap(), 100);
}

#[test]
fn test_validate_movie_fields_rejects_zero_duration() {
    let mut fields: MovieFields = create_test_movie_fields();
    fields.duration_minutes = 0;
    assert!(matches!(
        validate_movie_fields(&fields),
        Err(DomainError::InvalidMovie {
            field: "duration",
            ..
        })
    ));
}

#[test]
fn test_validate_movie_fields_rejects_blank_title() {
    let mut fields: MovieFields = create_test_movie_fields();
    fields.title = String::from("   ");
    assert!(matches!(
        validate_movie_fields(&fields),
        Err(DomainError::InvalidMovie { field: "title", .. })
    ));
}

#[test]
fn test_validate_auditorium_capacity_bounds() {
    let mut fields: AuditoriumFields = AuditoriumFields {
        name: String::from("Sala 1"),
        screen_type: ScreenType::Standard,
        atmos: false,
        seat_capacity: 200,
        enabled: true,
    };
    assert_eq!(validate_auditorium_fields(&fields).unwrap(), 200);

    fields.seat_capacity = 201;
    assert!(validate_auditorium_fields(&fields).is_err());

    fields.seat_capacity = 0;
    assert!(validate_auditorium_fields(&fields).is_err());
}

#[test]
fn test_validate_auditorium_rejects_long_name() {
    let fields: AuditoriumFields = AuditoriumFields {
        name: "x".repeat(101),
        screen_type: ScreenType::Imax,
        atmos: true,
        seat_capacity: 50,
        enabled: true,
    };
    assert!(matches!(
        validate_auditorium_fields(&fields),
        Err(DomainError::InvalidAuditorium { field: "name", .. })
    ));
}

#[test]
fn test_validate_card_fields_accepts_valid_card() {
    let card: ValidatedCard = validate_card_fields(&create_test_card_fields(), TODAY).unwrap();
    assert_eq!(card.card_number, "4111111111111111");
    assert_eq!(card.expiration_date.to_string(), "01/30");
}

#[test]
fn test_validate_card_fields_rejects_short_number() {
    let mut fields: CardFields = create_test_card_fields();
    fields.card_number = String::from("411111111111111");
    assert!(matches!(
        validate_card_fields(&fields, TODAY),
        Err(DomainError::InvalidCard {
            field: "card_number",
            ..
        })
    ));
}

#[test]
fn test_validate_card_fields_rejects_current_month_expiration() {
    let mut fields: CardFields = create_test_card_fields();
    fields.expiration_date = String::from("10/26");
    assert!(matches!(
        validate_card_fields(&fields, TODAY),
        Err(DomainError::InvalidCard {
            field: "expiration_date",
            ..
        })
    ));
}

#[test]
fn test_validate_card_fields_rejects_future_issue_date() {
    let mut fields: CardFields = create_test_card_fields();
    fields.issue_date = String::from("11/26");
    assert!(matches!(
        validate_card_fields(&fields, TODAY),
        Err(DomainError::InvalidCard {
            field: "issue_date",
            ..
        })
    ));
}

#[test]
fn test_validate_card_fields_rejects_alphabetic_cvv() {
    let mut fields: CardFields = create_test_card_fields();
    fields.cvv = String::from("12a");
    assert!(matches!(
        validate_card_fields(&fields, TODAY),
        Err(DomainError::InvalidCard { field: "cvv", .. })
    ));
}

#[test]
fn test_validate_quantity() {
    assert_eq!(validate_quantity(3).unwrap(), 3);
    assert!(matches!(
        validate_quantity(0),
        Err(DomainError::InvalidQuantity { quantity: 0 })
    ));
    assert!(validate_quantity(-2).is_err());
    assert_eq!(validate_quantity(i64::from(u32::MAX)).unwrap(), u32::MAX);
}

#[test]
fn test_validate_quantity_too_large_says_so() {
    let quantity: i64 = i64::from(u32::MAX) + 1;
    let err: DomainError = validate_quantity(quantity).unwrap_err();

    assert_eq!(err, DomainError::QuantityTooLarge { quantity });
    assert_eq!(err.to_string(), "Quantity 4294967296 is too large");

    let err: DomainError = validate_quantity(i64::MAX).unwrap_err();
    assert!(!err.to_string().contains("at least 1"));
}

#[test]
fn test_validate_recharge_amount_bounds() {
    assert!(validate_recharge_amount(Money::ZERO).is_err());
    assert!(validate_recharge_amount(MAX_RECHARGE_AMOUNT).is_ok());
    assert!(matches!(
        validate_recharge_amount(Money::from_cents(MAX_RECHARGE_AMOUNT.cents() + 1)),
        Err(DomainError::InvalidRechargeAmount { .. })
    ));
}

#[test]
fn test_validate_identifier_rejects_non_positive() {
    assert!(validate_identifier("movie_id", 1).is_ok());
    assert!(validate_identifier("movie_id", 0).is_err());
}
