// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The ticket purchase transaction.
//!
//! The screening row, the card row and the new tickets change together or
//! not at all. Both updates are guarded on the values the plan was computed
//! from; a guard that matches no row aborts the transaction.

use boleteria::{CoreError, PurchasePlan, plan_purchase};
use boleteria_domain::{Card, Money};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::backend::sqlite::last_insert_rowid;
use crate::convert::{column_i32, instant_text};
use crate::data_models::{ScreeningDetails, TicketDetails};
use crate::diesel_schema::{cards, screenings, tickets};
use crate::error::PersistenceError;
use crate::queries::cards::get_card_for_user;
use crate::queries::screenings::get_screening_details;

/// Buys `quantity` tickets for a screening with the user's card.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The buyer
/// * `screening_id` - The screening
/// * `quantity` - Number of tickets, already validated to be at least 1
/// * `now` - The current instant, used as the purchase time
///
/// # Returns
///
/// The issued tickets in issue order.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the screening does not exist,
/// or a rejection if it has started, lacks seats, or the buyer has no card
/// or too small a balance. On any error nothing is written.
pub fn purchase_tickets(
    conn: &mut SqliteConnection,
    user_id: i64,
    screening_id: i64,
    quantity: u32,
    now: OffsetDateTime,
) -> Result<Vec<TicketDetails>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let details: ScreeningDetails = get_screening_details(conn, screening_id)?
            .ok_or_else(|| PersistenceError::NotFound(String::from("screening")))?;
        let card: Option<Card> = get_card_for_user(conn, user_id)?;

        let plan: PurchasePlan = plan_purchase(&details.screening, card.as_ref(), quantity, now)?;
        let Some(card) = card else {
            return Err(PersistenceError::Rejected(CoreError::NoCard));
        };

        let expected_capacity: i32 = column_i32(
            "screenings.available_capacity",
            details.screening.available_capacity,
        )?;
        let claimed: usize = diesel::update(
            screenings::table
                .filter(screenings::screening_id.eq(screening_id))
                .filter(screenings::available_capacity.eq(expected_capacity)),
        )
        .set(screenings::available_capacity.eq(column_i32(
            "screenings.available_capacity",
            plan.remaining_capacity,
        )?))
        .execute(conn)?;

        let debited: usize = diesel::update(
            cards::table
                .filter(cards::card_id.eq(card.id))
                .filter(cards::balance_cents.eq(card.balance.cents())),
        )
        .set(cards::balance_cents.eq(plan.new_balance.cents()))
        .execute(conn)?;

        if claimed != 1 || debited != 1 {
            warn!(screening_id, user_id, claimed, debited, "Purchase guard matched no row");
            return Err(PersistenceError::LockContention(String::from(
                "screening or card changed during purchase",
            )));
        }

        let purchased_at: String = instant_text(now)?;
        let mut issued: Vec<TicketDetails> = Vec::new();
        for _ in 0..plan.quantity {
            diesel::insert_into(tickets::table)
                .values((
                    tickets::user_id.eq(user_id),
                    tickets::screening_id.eq(screening_id),
                    tickets::price_cents.eq(plan.unit_price.cents()),
                    tickets::purchased_at.eq(&purchased_at),
                ))
                .execute(conn)?;

            let ticket_id: i64 = last_insert_rowid(conn)?;
            issued.push(TicketDetails {
                ticket: boleteria_domain::Ticket {
                    id: ticket_id,
                    user_id,
                    screening_id,
                    price: plan.unit_price,
                    purchased_at: boleteria_domain::normalize_instant(now),
                },
                movie_title: details.movie_title.clone(),
                auditorium_id: details.screening.auditorium_id,
                showtime: details.screening.showtime,
            });
        }

        let total: Money = plan.total;
        info!(
            user_id,
            screening_id,
            quantity = plan.quantity,
            total = %total,
            remaining_capacity = plan.remaining_capacity,
            "Purchased tickets"
        );
        Ok(issued)
    })
}
