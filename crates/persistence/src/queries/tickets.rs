// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.

use boleteria_domain::{Money, Ticket};
use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::convert::{count_u64, parse_instant};
use crate::data_models::TicketDetails;
use crate::diesel_schema::{movies, screenings, tickets};
use crate::error::PersistenceError;

/// Diesel Queryable struct for ticket rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
struct TicketRow {
    ticket_id: i64,
    user_id: i64,
    screening_id: i64,
    price_cents: i64,
    purchased_at: String,
}

type DetailsTuple = (TicketRow, String, i64, String);

fn into_details(
    (row, movie_title, auditorium_id, showtime): DetailsTuple,
) -> Result<TicketDetails, PersistenceError> {
    Ok(TicketDetails {
        ticket: Ticket {
            id: row.ticket_id,
            user_id: row.user_id,
            screening_id: row.screening_id,
            price: Money::from_cents(row.price_cents),
            purchased_at: parse_instant("tickets.purchased_at", &row.purchased_at)?,
        },
        movie_title,
        auditorium_id,
        showtime: parse_instant("screenings.showtime", &showtime)?,
    })
}

/// Retrieves a ticket with its screening's movie and auditorium.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the ticket is not found.
pub fn get_ticket_details(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Option<TicketDetails>, PersistenceError> {
    let result: Result<DetailsTuple, diesel::result::Error> = tickets::table
        .inner_join(screenings::table.inner_join(movies::table))
        .filter(tickets::ticket_id.eq(ticket_id))
        .select((
            TicketRow::as_select(),
            movies::title,
            screenings::auditorium_id,
            screenings::showtime,
        ))
        .first(conn);

    match result {
        Ok(tuple) => Ok(Some(into_details(tuple)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists a user's tickets, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_ticket_details_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<TicketDetails>, PersistenceError> {
    let rows: Vec<DetailsTuple> = tickets::table
        .inner_join(screenings::table.inner_join(movies::table))
        .filter(tickets::user_id.eq(user_id))
        .select((
            TicketRow::as_select(),
            movies::title,
            screenings::auditorium_id,
            screenings::showtime,
        ))
        .order((tickets::purchased_at.desc(), tickets::ticket_id.desc()))
        .load(conn)?;

    rows.into_iter().map(into_details).collect()
}

/// Counts the tickets sold for a screening.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tickets_for_screening(
    conn: &mut SqliteConnection,
    screening_id: i64,
) -> Result<u64, PersistenceError> {
    let count: i64 = tickets::table
        .filter(tickets::screening_id.eq(screening_id))
        .select(count_star())
        .first(conn)?;
    Ok(count_u64(count))
}

/// Counts the tickets sold across every screening of an auditorium.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tickets_for_auditorium(
    conn: &mut SqliteConnection,
    auditorium_id: i64,
) -> Result<u64, PersistenceError> {
    let count: i64 = tickets::table
        .inner_join(screenings::table)
        .filter(screenings::auditorium_id.eq(auditorium_id))
        .select(count_star())
        .first(conn)?;
    Ok(count_u64(count))
}

/// Counts the tickets owned by a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tickets_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<u64, PersistenceError> {
    let count: i64 = tickets::table
        .filter(tickets::user_id.eq(user_id))
        .select(count_star())
        .first(conn)?;
    Ok(count_u64(count))
}
