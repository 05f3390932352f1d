// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card mutations.

use boleteria::{apply_recharge, ensure_can_open_card, ensure_card_number_available};
use boleteria_domain::{Card, Money, ValidatedCard};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::cards;
use crate::error::PersistenceError;
use crate::queries::cards::{find_card_id_by_number, get_card_for_user};

fn missing_card() -> PersistenceError {
    PersistenceError::NotFound(String::from("card"))
}

/// Opens a card for a user with a zero balance.
///
/// # Errors
///
/// Returns a rejection if the user already has a card or the card number
/// belongs to another card.
pub fn create_card(
    conn: &mut SqliteConnection,
    user_id: i64,
    card: &ValidatedCard,
) -> Result<Card, PersistenceError> {
    conn.immediate_transaction(|conn| {
        ensure_can_open_card(get_card_for_user(conn, user_id)?.as_ref())?;
        ensure_card_number_available(find_card_id_by_number(conn, &card.card_number)?, None)?;

        diesel::insert_into(cards::table)
            .values((
                cards::user_id.eq(user_id),
                cards::card_number.eq(&card.card_number),
                cards::holder_name.eq(&card.holder_name),
                cards::issue_date.eq(card.issue_date.to_string()),
                cards::expiration_date.eq(card.expiration_date.to_string()),
                cards::cvv.eq(&card.cvv),
                cards::card_type.eq(card.card_type.as_str()),
                cards::balance_cents.eq(Money::ZERO.cents()),
            ))
            .execute(conn)?;

        info!(user_id, card_type = %card.card_type, "Opened card");
        get_card_for_user(conn, user_id)?.ok_or_else(missing_card)
    })
}

/// Replaces the details of a user's card. The balance is kept.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the user has no card, or a
/// rejection if the card number belongs to another card.
pub fn update_card(
    conn: &mut SqliteConnection,
    user_id: i64,
    card: &ValidatedCard,
) -> Result<Card, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: Card = get_card_for_user(conn, user_id)?.ok_or_else(missing_card)?;
        ensure_card_number_available(
            find_card_id_by_number(conn, &card.card_number)?,
            Some(current.id),
        )?;

        diesel::update(cards::table.filter(cards::card_id.eq(current.id)))
            .set((
                cards::card_number.eq(&card.card_number),
                cards::holder_name.eq(&card.holder_name),
                cards::issue_date.eq(card.issue_date.to_string()),
                cards::expiration_date.eq(card.expiration_date.to_string()),
                cards::cvv.eq(&card.cvv),
                cards::card_type.eq(card.card_type.as_str()),
            ))
            .execute(conn)?;

        info!(user_id, card_id = current.id, "Updated card");
        get_card_for_user(conn, user_id)?.ok_or_else(missing_card)
    })
}

/// Adds an amount to a user's card balance.
///
/// # Returns
///
/// The new balance.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the user has no card, or a
/// rejection if the amount is invalid or the balance would exceed the cap.
pub fn recharge_card(
    conn: &mut SqliteConnection,
    user_id: i64,
    amount: Money,
) -> Result<Money, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let card: Card = get_card_for_user(conn, user_id)?.ok_or_else(missing_card)?;
        let new_balance: Money = apply_recharge(card.balance, amount)?;

        diesel::update(cards::table.filter(cards::card_id.eq(card.id)))
            .set(cards::balance_cents.eq(new_balance.cents()))
            .execute(conn)?;

        info!(
            user_id,
            card_id = card.id,
            amount = %amount,
            balance = %new_balance,
            "Recharged card"
        );
        Ok(new_balance)
    })
}

/// Deletes a user's card and its balance.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the user has no card.
pub fn delete_card(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(cards::table.filter(cards::user_id.eq(user_id))).execute(conn)?;

    if deleted == 0 {
        return Err(missing_card());
    }

    info!(user_id, "Deleted card");
    Ok(())
}
