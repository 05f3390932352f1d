// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
///
/// Every variant describes a caller-supplied value that breaks a syntactic
/// or range rule. State conflicts (overlap, capacity, funds) are not domain
/// errors; they are decided by the core against stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A user field is empty or malformed.
    InvalidUser {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A movie field is empty or out of range.
    InvalidMovie {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// An auditorium field is empty or out of range.
    InvalidAuditorium {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A card field is malformed.
    InvalidCard {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The role name is not one of the known roles.
    InvalidRole(String),
    /// The screen type name is not one of the known screen types.
    InvalidScreenType(String),
    /// The card type name is not one of the known card types.
    InvalidCardType(String),
    /// A monetary amount is negative, too precise, or out of range.
    InvalidMoney {
        /// Why the amount was rejected.
        reason: String,
    },
    /// A recharge amount is outside `(0, MAX_RECHARGE_AMOUNT]`.
    InvalidRechargeAmount {
        /// Why the amount was rejected.
        reason: String,
    },
    /// A ticket quantity is below one.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },
    /// A ticket quantity is too large to represent as a seat count.
    QuantityTooLarge {
        /// The rejected quantity.
        quantity: i64,
    },
    /// An entity identifier is not positive.
    InvalidIdentifier {
        /// The identifier's field name.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A showtime string could not be parsed.
    InvalidShowtime(String),
    /// The showtime is not strictly in the future.
    ShowtimeNotInFuture {
        /// The rejected showtime.
        showtime: OffsetDateTime,
    },
    /// The showtime lies past the scheduling horizon.
    ShowtimeBeyondHorizon {
        /// The rejected showtime.
        showtime: OffsetDateTime,
        /// The latest admissible showtime.
        horizon: OffsetDateTime,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUser { field, reason } => write!(f, "Invalid user {field}: {reason}"),
            Self::InvalidMovie { field, reason } => write!(f, "Invalid movie {field}: {reason}"),
            Self::InvalidAuditorium { field, reason } => {
                write!(f, "Invalid auditorium {field}: {reason}")
            }
            Self::InvalidCard { field, reason } => write!(f, "Invalid card {field}: {reason}"),
            Self::InvalidRole(role) => write!(f, "Unknown role: {role}"),
            Self::InvalidScreenType(value) => write!(f, "Unknown screen type: {value}"),
            Self::InvalidCardType(value) => write!(f, "Unknown card type: {value}"),
            Self::InvalidMoney { reason } => write!(f, "Invalid amount: {reason}"),
            Self::InvalidRechargeAmount { reason } => {
                write!(f, "Invalid recharge amount: {reason}")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Quantity must be at least 1, got {quantity}")
            }
            Self::QuantityTooLarge { quantity } => {
                write!(f, "Quantity {quantity} is too large")
            }
            Self::InvalidIdentifier { field, value } => {
                write!(f, "{field} must be a positive identifier, got {value}")
            }
            Self::InvalidShowtime(value) => write!(f, "Invalid showtime: {value}"),
            Self::ShowtimeNotInFuture { showtime } => {
                write!(f, "Showtime {showtime} must be in the future")
            }
            Self::ShowtimeBeyondHorizon { showtime, horizon } => write!(
                f,
                "Showtime {showtime} is beyond the scheduling horizon ({horizon})"
            ),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow in operation: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
