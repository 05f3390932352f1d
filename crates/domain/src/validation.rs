// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

use crate::error::DomainError;
use crate::limits::{
    MAX_MOVIE_DURATION_MINUTES, MAX_NAME_LENGTH, MAX_RECHARGE_AMOUNT, MAX_SEAT_CAPACITY,
    MAX_SYNOPSIS_LENGTH, MIN_SEAT_CAPACITY,
};
use crate::money::Money;
use crate::types::{
    AuditoriumFields, CardFields, CardMonth, MovieFields, ProfileFields, Registration,
    ValidatedCard,
};

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 4;
const MIN_HOLDER_NAME_LENGTH: usize = 3;
const CARD_NUMBER_LENGTH: usize = 16;

fn require_text(value: &str, max_len: usize) -> Result<(), String> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(String::from("must not be blank"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("must be at most {max_len} characters"));
    }
    Ok(())
}

fn user_error(field: &'static str) -> impl FnOnce(String) -> DomainError {
    move |reason| DomainError::InvalidUser { field, reason }
}

fn movie_error(field: &'static str) -> impl FnOnce(String) -> DomainError {
    move |reason| DomainError::InvalidMovie { field, reason }
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    require_text(email, MAX_NAME_LENGTH).map_err(user_error("email"))?;
    let well_formed: bool = email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(DomainError::InvalidUser {
            field: "email",
            reason: String::from("must be a valid email address"),
        });
    }
    Ok(())
}

/// Validates the fields of a registration request.
///
/// Uniqueness of username and email is checked by storage.
///
/// # Errors
///
/// Returns an error if:
/// - The username is not 3 to 50 characters or contains whitespace
/// - The email is blank or lacks `local@domain`
/// - The password is shorter than 4 characters
/// - The name or surname is blank
pub fn validate_registration(registration: &Registration) -> Result<(), DomainError> {
    let username_len: usize = registration.username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&username_len) {
        return Err(DomainError::InvalidUser {
            field: "username",
            reason: format!(
                "must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
            ),
        });
    }
    if registration.username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUser {
            field: "username",
            reason: String::from("must not contain whitespace"),
        });
    }

    if registration.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::InvalidUser {
            field: "password",
            reason: format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        });
    }

    validate_profile(&ProfileFields {
        email: registration.email.clone(),
        name: registration.name.clone(),
        surname: registration.surname.clone(),
    })
}

/// Validates editable profile fields.
///
/// # Errors
///
/// Returns an error if the email is malformed or a name is blank.
pub fn validate_profile(profile: &ProfileFields) -> Result<(), DomainError> {
    validate_email(&profile.email)?;
    require_text(&profile.name, MAX_NAME_LENGTH).map_err(user_error("name"))?;
    require_text(&profile.surname, MAX_NAME_LENGTH).map_err(user_error("surname"))?;
    Ok(())
}

/// Validates movie fields and returns the runtime in minutes.
///
/// # Errors
///
/// Returns an error if a text field is blank or too long, or if the
/// duration is not between 1 and [`MAX_MOVIE_DURATION_MINUTES`].
pub fn validate_movie_fields(fields: &MovieFields) -> Result<u32, DomainError> {
    require_text(&fields.title, MAX_NAME_LENGTH).map_err(movie_error("title"))?;
    require_text(&fields.genre, MAX_NAME_LENGTH).map_err(movie_error("genre"))?;
    require_text(&fields.director, MAX_NAME_LENGTH).map_err(movie_error("director"))?;
    require_text(&fields.rating, MAX_NAME_LENGTH).map_err(movie_error("rating"))?;
    require_text(&fields.synopsis, MAX_SYNOPSIS_LENGTH).map_err(movie_error("synopsis"))?;

    u32::try_from(fields.duration_minutes)
        .ok()
        .filter(|minutes| (1..=MAX_MOVIE_DURATION_MINUTES).contains(minutes))
        .ok_or_else(|| DomainError::InvalidMovie {
            field: "duration",
            reason: format!(
                "must be between 1 and {MAX_MOVIE_DURATION_MINUTES} minutes, got {}",
                fields.duration_minutes
            ),
        })
}

/// Validates auditorium fields and returns the seat capacity.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 100 characters, or
/// the capacity is outside `1..=200`.
pub fn validate_auditorium_fields(fields: &AuditoriumFields) -> Result<u32, DomainError> {
    require_text(&fields.name, MAX_NAME_LENGTH).map_err(|reason| {
        DomainError::InvalidAuditorium {
            field: "name",
            reason,
        }
    })?;

    u32::try_from(fields.seat_capacity)
        .ok()
        .filter(|capacity| (MIN_SEAT_CAPACITY..=MAX_SEAT_CAPACITY).contains(capacity))
        .ok_or_else(|| DomainError::InvalidAuditorium {
            field: "seat_capacity",
            reason: format!(
                "must be between {MIN_SEAT_CAPACITY} and {MAX_SEAT_CAPACITY}, got {}",
                fields.seat_capacity
            ),
        })
}

/// Validates card fields against `today`.
///
/// # Arguments
///
/// * `fields` - The submitted card fields
/// * `today` - The current date
///
/// # Returns
///
/// The parsed card, ready to be stored.
///
/// # Errors
///
/// Returns an error if:
/// - The card number is not exactly 16 digits
/// - The holder name is shorter than 3 characters
/// - Either date is not `MM/YY`
/// - The issue month is after the current month
/// - The expiration month is not after the current month
/// - The CVV is not 3 or 4 digits
pub fn validate_card_fields(
    fields: &CardFields,
    today: Date,
) -> Result<ValidatedCard, DomainError> {
    let card_number: &str = fields.card_number.trim();
    if card_number.len() != CARD_NUMBER_LENGTH || !card_number.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(DomainError::InvalidCard {
            field: "card_number",
            reason: format!("must be exactly {CARD_NUMBER_LENGTH} digits"),
        });
    }

    let holder_name: &str = fields.holder_name.trim();
    let holder_len: usize = holder_name.chars().count();
    if !(MIN_HOLDER_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&holder_len) {
        return Err(DomainError::InvalidCard {
            field: "holder_name",
            reason: format!(
                "must be between {MIN_HOLDER_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
            ),
        });
    }

    let current_month: CardMonth = CardMonth::containing(today);
    let issue_date: CardMonth = CardMonth::parse("issue_date", fields.issue_date.trim())?;
    if issue_date > current_month {
        return Err(DomainError::InvalidCard {
            field: "issue_date",
            reason: String::from("must not be in the future"),
        });
    }

    let expiration_date: CardMonth =
        CardMonth::parse("expiration_date", fields.expiration_date.trim())?;
    if expiration_date <= current_month {
        return Err(DomainError::InvalidCard {
            field: "expiration_date",
            reason: String::from("card is expired"),
        });
    }

    let cvv: &str = fields.cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !cvv.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidCard {
            field: "cvv",
            reason: String::from("must be 3 or 4 digits"),
        });
    }

    Ok(ValidatedCard {
        card_number: card_number.to_string(),
        holder_name: holder_name.to_string(),
        issue_date,
        expiration_date,
        cvv: cvv.to_string(),
        card_type: fields.card_type,
    })
}

/// Validates a ticket quantity and returns it as a count.
///
/// # Errors
///
/// Returns an error if the quantity is below 1 or does not fit in a `u32`.
pub fn validate_quantity(quantity: i64) -> Result<u32, DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidQuantity { quantity });
    }
    u32::try_from(quantity).map_err(|_| DomainError::QuantityTooLarge { quantity })
}

/// Validates a recharge amount.
///
/// # Errors
///
/// Returns an error if the amount is zero or exceeds [`MAX_RECHARGE_AMOUNT`].
pub fn validate_recharge_amount(amount: Money) -> Result<(), DomainError> {
    if !amount.is_positive() {
        return Err(DomainError::InvalidRechargeAmount {
            reason: String::from("amount must be greater than zero"),
        });
    }
    if amount > MAX_RECHARGE_AMOUNT {
        return Err(DomainError::InvalidRechargeAmount {
            reason: format!("amount must not exceed {MAX_RECHARGE_AMOUNT}"),
        });
    }
    Ok(())
}

/// Validates that an identifier is positive.
///
/// # Errors
///
/// Returns an error if `value` is zero or negative.
pub const fn validate_identifier(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidIdentifier { field, value });
    }
    Ok(())
}
