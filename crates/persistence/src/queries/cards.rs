// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card queries. The stored CVV is never read back.

use boleteria_domain::{Card, CardMonth, Money};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::convert::parse_enum;
use crate::diesel_schema::cards;
use crate::error::PersistenceError;

/// Diesel Queryable struct for card rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = cards)]
struct CardRow {
    card_id: i64,
    user_id: i64,
    card_number: String,
    holder_name: String,
    issue_date: String,
    expiration_date: String,
    card_type: String,
    balance_cents: i64,
}

fn stored_month(field: &'static str, value: &str) -> Result<CardMonth, PersistenceError> {
    CardMonth::parse(field, value)
        .map_err(|e| PersistenceError::CorruptRecord(format!("cards.{field}: {e}")))
}

impl TryFrom<CardRow> for Card {
    type Error = PersistenceError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.card_id,
            user_id: row.user_id,
            card_number: row.card_number,
            holder_name: row.holder_name,
            issue_date: stored_month("issue_date", &row.issue_date)?,
            expiration_date: stored_month("expiration_date", &row.expiration_date)?,
            card_type: parse_enum("cards.card_type", &row.card_type)?,
            balance: Money::from_cents(row.balance_cents),
        })
    }
}

/// Retrieves the card owned by a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user has no card.
pub fn get_card_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<Card>, PersistenceError> {
    let result: Result<CardRow, diesel::result::Error> = cards::table
        .filter(cards::user_id.eq(user_id))
        .select(CardRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Card::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns the ID of the card holding a card number, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_card_id_by_number(
    conn: &mut SqliteConnection,
    card_number: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(cards::table
        .filter(cards::card_number.eq(card_number))
        .select(cards::card_id)
        .first(conn)
        .optional()?)
}
