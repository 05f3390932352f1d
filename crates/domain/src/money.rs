// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary amounts.
//!
//! Amounts are held as whole cents so that balance arithmetic is exact and
//! every operation can be checked for overflow. At the boundary they are
//! exchanged as [`Decimal`] values with at most two fractional digits.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// A non-negative amount of money with two fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from a count of cents.
    ///
    /// Callers are expected to pass a non-negative count; stored values are
    /// guarded by a `CHECK` constraint and by [`Money::from_decimal`].
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Converts a decimal amount into `Money`.
    ///
    /// # Arguments
    ///
    /// * `value` - The decimal amount
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, has more than two
    /// fractional digits, or does not fit in the cent representation.
    pub fn from_decimal(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidMoney {
                reason: String::from("amount must not be negative"),
            });
        }
        if value.normalize().scale() > 2 {
            return Err(DomainError::InvalidMoney {
                reason: String::from("amount must have at most two decimal places"),
            });
        }

        let cents: i64 = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.trunc().to_i64())
            .ok_or_else(|| DomainError::InvalidMoney {
                reason: String::from("amount is too large"),
            })?;

        Ok(Self { cents })
    }

    /// Returns the amount as a decimal with scale 2.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.cents > 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.cents.checked_add(other.cents) {
            Some(cents) => Some(Self { cents }),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` if the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.cents.checked_sub(other.cents) {
            Some(cents) if cents >= 0 => Some(Self { cents }),
            _ => None,
        }
    }

    /// Multiplies the amount by a count, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, count: u32) -> Option<Self> {
        self.cents
            .checked_mul(i64::from(count))
            .map(|cents| Self { cents })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::str::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Decimal = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(value).map_err(serde::de::Error::custom)
    }
}
