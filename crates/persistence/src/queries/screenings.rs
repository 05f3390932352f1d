// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Screening queries.
//!
//! Showtimes are stored as normalized UTC RFC 3339 text, so comparing the
//! text compares the instants.

use boleteria::ScheduledShowing;
use boleteria_domain::{ScreenType, Screening};
use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use time::OffsetDateTime;

use crate::convert::{count_u32, count_u64, instant_text, parse_enum, parse_instant};
use crate::data_models::ScreeningDetails;
use crate::diesel_schema::{auditoriums, movies, screenings};
use crate::error::PersistenceError;

/// Diesel Queryable struct for screening rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = screenings)]
struct ScreeningRow {
    screening_id: i64,
    movie_id: i64,
    auditorium_id: i64,
    showtime: String,
    available_capacity: i32,
}

impl TryFrom<ScreeningRow> for Screening {
    type Error = PersistenceError;

    fn try_from(row: ScreeningRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.screening_id,
            movie_id: row.movie_id,
            auditorium_id: row.auditorium_id,
            showtime: parse_instant("screenings.showtime", &row.showtime)?,
            available_capacity: count_u32(
                "screenings.available_capacity",
                row.available_capacity,
            )?,
        })
    }
}

type DetailsTuple = (ScreeningRow, String, i32, String, String, i32);

fn into_details(
    (row, movie_title, duration, auditorium_name, screen_type, seat_capacity): DetailsTuple,
) -> Result<ScreeningDetails, PersistenceError> {
    Ok(ScreeningDetails {
        screening: Screening::try_from(row)?,
        movie_title,
        duration_minutes: count_u32("movies.duration_minutes", duration)?,
        auditorium_name,
        screen_type: parse_enum("auditoriums.screen_type", &screen_type)?,
        seat_capacity: count_u32("auditoriums.seat_capacity", seat_capacity)?,
    })
}

/// Which screenings to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreeningListing {
    /// Every screening.
    All,
    /// Future screenings of a movie with seats left.
    AvailableForMovie(i64),
    /// Future screenings in auditoriums of a screen type with seats left.
    AvailableByScreenType(ScreenType),
}

/// Retrieves a screening row by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the screening is not found.
pub fn get_screening(
    conn: &mut SqliteConnection,
    screening_id: i64,
) -> Result<Option<Screening>, PersistenceError> {
    let result: Result<ScreeningRow, diesel::result::Error> = screenings::table
        .filter(screenings::screening_id.eq(screening_id))
        .select(ScreeningRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Screening::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Retrieves a screening joined with its movie and auditorium.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the screening is not found.
pub fn get_screening_details(
    conn: &mut SqliteConnection,
    screening_id: i64,
) -> Result<Option<ScreeningDetails>, PersistenceError> {
    let result: Result<DetailsTuple, diesel::result::Error> = screenings::table
        .inner_join(movies::table)
        .inner_join(auditoriums::table)
        .filter(screenings::screening_id.eq(screening_id))
        .select((
            ScreeningRow::as_select(),
            movies::title,
            movies::duration_minutes,
            auditoriums::name,
            auditoriums::screen_type,
            auditoriums::seat_capacity,
        ))
        .first(conn);

    match result {
        Ok(tuple) => Ok(Some(into_details(tuple)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists screenings with their movie and auditorium, ordered by showtime.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `listing` - Which screenings to include
/// * `now` - The current instant, used by the availability listings
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_screening_details(
    conn: &mut SqliteConnection,
    listing: ScreeningListing,
    now: OffsetDateTime,
) -> Result<Vec<ScreeningDetails>, PersistenceError> {
    let mut query = screenings::table
        .inner_join(movies::table)
        .inner_join(auditoriums::table)
        .select((
            ScreeningRow::as_select(),
            movies::title,
            movies::duration_minutes,
            auditoriums::name,
            auditoriums::screen_type,
            auditoriums::seat_capacity,
        ))
        .order((screenings::showtime.asc(), screenings::screening_id.asc()))
        .into_boxed();

    match listing {
        ScreeningListing::All => {}
        ScreeningListing::AvailableForMovie(movie_id) => {
            query = query
                .filter(screenings::movie_id.eq(movie_id))
                .filter(screenings::showtime.gt(instant_text(now)?))
                .filter(screenings::available_capacity.gt(0));
        }
        ScreeningListing::AvailableByScreenType(screen_type) => {
            query = query
                .filter(auditoriums::screen_type.eq(screen_type.as_str()))
                .filter(screenings::showtime.gt(instant_text(now)?))
                .filter(screenings::available_capacity.gt(0));
        }
    }

    let rows: Vec<DetailsTuple> = query.load(conn)?;
    rows.into_iter().map(into_details).collect()
}

/// Lists every screening in the given auditoriums with its movie's runtime.
///
/// This is the overlap set read by screening admission.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_showings_in_auditoriums(
    conn: &mut SqliteConnection,
    auditorium_ids: &[i64],
) -> Result<Vec<ScheduledShowing>, PersistenceError> {
    let rows: Vec<(i64, i64, i64, String, i32)> = screenings::table
        .inner_join(movies::table)
        .filter(screenings::auditorium_id.eq_any(auditorium_ids))
        .select((
            screenings::screening_id,
            screenings::movie_id,
            screenings::auditorium_id,
            screenings::showtime,
            movies::duration_minutes,
        ))
        .order(screenings::showtime.asc())
        .load(conn)?;

    rows.into_iter()
        .map(
            |(screening_id, movie_id, auditorium_id, showtime, duration)| {
                Ok(ScheduledShowing {
                    screening_id,
                    movie_id,
                    auditorium_id,
                    showtime: parse_instant("screenings.showtime", &showtime)?,
                    duration_minutes: count_u32("movies.duration_minutes", duration)?,
                })
            },
        )
        .collect()
}

/// Lists the distinct auditoriums in which a movie is scheduled.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_auditorium_ids_for_movie(
    conn: &mut SqliteConnection,
    movie_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(screenings::table
        .filter(screenings::movie_id.eq(movie_id))
        .select(screenings::auditorium_id)
        .distinct()
        .load(conn)?)
}

/// Counts the screenings of a movie.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_screenings_for_movie(
    conn: &mut SqliteConnection,
    movie_id: i64,
) -> Result<u64, PersistenceError> {
    let count: i64 = screenings::table
        .filter(screenings::movie_id.eq(movie_id))
        .select(count_star())
        .first(conn)?;
    Ok(count_u64(count))
}

/// Counts the screenings in an auditorium.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_screenings_for_auditorium(
    conn: &mut SqliteConnection,
    auditorium_id: i64,
) -> Result<u64, PersistenceError> {
    let count: i64 = screenings::table
        .filter(screenings::auditorium_id.eq(auditorium_id))
        .select(count_star())
        .first(conn)?;
    Ok(count_u64(count))
}
