// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket purchase planning.

use boleteria_domain::{Card, Money, Screening, TICKET_PRICE};
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::state::PurchasePlan;
use crate::wallet::apply_debit;

/// Plans a purchase of `quantity` tickets.
///
/// The checks run in a fixed order: the screening must not have started,
/// enough seats must remain, the caller must have a card, and the card must
/// cover `quantity * TICKET_PRICE`. The first failing check decides the
/// error.
///
/// # Arguments
///
/// * `screening` - The screening as read inside the purchase transaction
/// * `card` - The caller's card, if any
/// * `quantity` - Number of tickets, at least 1
/// * `now` - The transaction instant
///
/// # Errors
///
/// Returns the first failing precondition as a [`CoreError`].
pub fn plan_purchase(
    screening: &Screening,
    card: Option<&Card>,
    quantity: u32,
    now: OffsetDateTime,
) -> Result<PurchasePlan, CoreError> {
    if now >= screening.showtime {
        return Err(CoreError::ScreeningStarted {
            screening_id: screening.id,
        });
    }

    let remaining_capacity: u32 = screening
        .available_capacity
        .checked_sub(quantity)
        .ok_or(CoreError::InsufficientCapacity {
            remaining: screening.available_capacity,
        })?;

    let card: &Card = card.ok_or(CoreError::NoCard)?;

    let total: Money = TICKET_PRICE
        .checked_mul(quantity)
        .ok_or(CoreError::InsufficientFunds {
            balance: card.balance,
            required: Money::from_cents(i64::MAX),
        })?;
    let new_balance: Money = apply_debit(card.balance, total)?;

    Ok(PurchasePlan {
        quantity,
        unit_price: TICKET_PRICE,
        total,
        remaining_capacity,
        new_balance,
    })
}
