// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card wallet rules.
//!
//! Balances only move through [`apply_recharge`] and [`apply_debit`]; both
//! keep the balance within `[0, MAX_TOTAL_BALANCE]`.

use boleteria_domain::{Card, MAX_TOTAL_BALANCE, Money, validate_recharge_amount};

use crate::error::CoreError;

/// Checks that the caller may open a card.
///
/// # Errors
///
/// Returns [`CoreError::CardAlreadyExists`] if the caller already has one.
pub const fn ensure_can_open_card(existing: Option<&Card>) -> Result<(), CoreError> {
    if existing.is_some() {
        return Err(CoreError::CardAlreadyExists);
    }
    Ok(())
}

/// Checks that a card number is not used by another card.
///
/// # Arguments
///
/// * `number_owner` - The id of the card currently holding the number, if any
/// * `own_card_id` - The id of the card being written, when updating
///
/// # Errors
///
/// Returns [`CoreError::DuplicateCardNumber`] if a different card holds the
/// number.
pub fn ensure_card_number_available(
    number_owner: Option<i64>,
    own_card_id: Option<i64>,
) -> Result<(), CoreError> {
    match number_owner {
        Some(owner) if Some(owner) != own_card_id => Err(CoreError::DuplicateCardNumber),
        _ => Ok(()),
    }
}

/// Computes the balance after a recharge.
///
/// # Arguments
///
/// * `balance` - The current balance
/// * `amount` - The recharge amount
///
/// # Errors
///
/// Returns an error if:
/// - The amount is zero or above the per-recharge maximum
/// - The resulting balance would exceed [`MAX_TOTAL_BALANCE`]
pub fn apply_recharge(balance: Money, amount: Money) -> Result<Money, CoreError> {
    validate_recharge_amount(amount)?;

    balance
        .checked_add(amount)
        .filter(|new_balance| *new_balance <= MAX_TOTAL_BALANCE)
        .ok_or(CoreError::BalanceCapExceeded { balance, amount })
}

/// Computes the balance after a debit.
///
/// # Errors
///
/// Returns [`CoreError::InsufficientFunds`] if the balance does not cover
/// the amount.
pub fn apply_debit(balance: Money, amount: Money) -> Result<Money, CoreError> {
    balance
        .checked_sub(amount)
        .ok_or(CoreError::InsufficientFunds {
            balance,
            required: amount,
        })
}
