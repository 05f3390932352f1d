// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Auditorium queries.

use boleteria_domain::Auditorium;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::convert::{column_i32, count_u32, flag, parse_enum};
use crate::data_models::AuditoriumFilter;
use crate::diesel_schema::auditoriums;
use crate::error::PersistenceError;

/// Diesel Queryable struct for auditorium rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = auditoriums)]
struct AuditoriumRow {
    auditorium_id: i64,
    name: String,
    screen_type: String,
    atmos: i32,
    seat_capacity: i32,
    enabled: i32,
}

impl TryFrom<AuditoriumRow> for Auditorium {
    type Error = PersistenceError;

    fn try_from(row: AuditoriumRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.auditorium_id,
            name: row.name,
            screen_type: parse_enum("auditoriums.screen_type", &row.screen_type)?,
            atmos: row.atmos != 0,
            seat_capacity: count_u32("auditoriums.seat_capacity", row.seat_capacity)?,
            enabled: row.enabled != 0,
        })
    }
}

/// Retrieves an auditorium by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the auditorium is not found.
pub fn get_auditorium(
    conn: &mut SqliteConnection,
    auditorium_id: i64,
) -> Result<Option<Auditorium>, PersistenceError> {
    let result: Result<AuditoriumRow, diesel::result::Error> = auditoriums::table
        .filter(auditoriums::auditorium_id.eq(auditorium_id))
        .select(AuditoriumRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Auditorium::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists auditoriums matching a filter, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_auditoriums(
    conn: &mut SqliteConnection,
    filter: AuditoriumFilter,
) -> Result<Vec<Auditorium>, PersistenceError> {
    let mut query = auditoriums::table
        .select(AuditoriumRow::as_select())
        .order(auditoriums::auditorium_id.asc())
        .into_boxed();

    if let Some(screen_type) = filter.screen_type {
        query = query.filter(auditoriums::screen_type.eq(screen_type.as_str()));
    }
    if let Some(enabled) = filter.enabled {
        query = query.filter(auditoriums::enabled.eq(flag(enabled)));
    }
    if let Some(min_capacity) = filter.min_seat_capacity {
        let min_capacity: i32 = column_i32("auditoriums.seat_capacity", min_capacity)?;
        query = query.filter(auditoriums::seat_capacity.ge(min_capacity));
    }

    let rows: Vec<AuditoriumRow> = query.load(conn)?;
    rows.into_iter().map(Auditorium::try_from).collect()
}
