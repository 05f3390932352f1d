// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movie and auditorium mutations.

use boleteria::{
    ScheduledShowing, check_runtime_change, ensure_unreferenced, plan_seat_capacity_change,
};
use boleteria_domain::{Auditorium, AuditoriumFields, Movie, MovieFields};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::convert::{column_i32, flag};
use crate::diesel_schema::{auditoriums, movies, screenings};
use crate::error::PersistenceError;
use crate::queries::auditoriums::get_auditorium;
use crate::queries::movies::get_movie;
use crate::queries::screenings::{
    count_screenings_for_auditorium, count_screenings_for_movie, list_auditorium_ids_for_movie,
    list_showings_in_auditoriums,
};
use crate::queries::tickets::count_tickets_for_auditorium;

/// Creates a movie.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The movie fields
/// * `duration_minutes` - The validated runtime
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] if the title is taken.
pub fn create_movie(
    conn: &mut SqliteConnection,
    fields: &MovieFields,
    duration_minutes: u32,
) -> Result<i64, PersistenceError> {
    let duration: i32 = column_i32("movies.duration_minutes", duration_minutes)?;

    diesel::insert_into(movies::table)
        .values((
            movies::title.eq(fields.title.trim()),
            movies::duration_minutes.eq(duration),
            movies::genre.eq(fields.genre.trim()),
            movies::director.eq(fields.director.trim()),
            movies::rating.eq(fields.rating.trim()),
            movies::synopsis.eq(fields.synopsis.trim()),
        ))
        .execute(conn)?;

    let movie_id: i64 = last_insert_rowid(conn)?;
    info!(movie_id, title = %fields.title.trim(), "Created movie");
    Ok(movie_id)
}

/// Updates a movie.
///
/// A runtime change is checked against every screening in every auditorium
/// that shows the movie.
///
/// # Errors
///
/// Returns an error if:
/// - The movie does not exist
/// - The new runtime would make two screenings overlap
/// - The title is taken by another movie
pub fn update_movie(
    conn: &mut SqliteConnection,
    movie_id: i64,
    fields: &MovieFields,
    duration_minutes: u32,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: Movie = get_movie(conn, movie_id)?
            .ok_or_else(|| PersistenceError::NotFound(String::from("movie")))?;

        if current.duration_minutes != duration_minutes {
            let auditorium_ids: Vec<i64> = list_auditorium_ids_for_movie(conn, movie_id)?;
            let showings: Vec<ScheduledShowing> =
                list_showings_in_auditoriums(conn, &auditorium_ids)?;
            check_runtime_change(movie_id, duration_minutes, &showings)?;
            debug!(
                movie_id,
                showings = showings.len(),
                "Runtime change keeps screenings disjoint"
            );
        }

        let duration: i32 = column_i32("movies.duration_minutes", duration_minutes)?;
        diesel::update(movies::table.filter(movies::movie_id.eq(movie_id)))
            .set((
                movies::title.eq(fields.title.trim()),
                movies::duration_minutes.eq(duration),
                movies::genre.eq(fields.genre.trim()),
                movies::director.eq(fields.director.trim()),
                movies::rating.eq(fields.rating.trim()),
                movies::synopsis.eq(fields.synopsis.trim()),
            ))
            .execute(conn)?;

        info!(movie_id, "Updated movie");
        Ok(())
    })
}

/// Deletes a movie that no screening references.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the movie does not exist, or a
/// rejection if screenings reference it.
pub fn delete_movie(conn: &mut SqliteConnection, movie_id: i64) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        if get_movie(conn, movie_id)?.is_none() {
            return Err(PersistenceError::NotFound(String::from("movie")));
        }
        ensure_unreferenced(count_screenings_for_movie(conn, movie_id)?)?;

        diesel::delete(movies::table.filter(movies::movie_id.eq(movie_id))).execute(conn)?;
        info!(movie_id, "Deleted movie");
        Ok(())
    })
}

/// Creates an auditorium.
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] if the name is taken.
pub fn create_auditorium(
    conn: &mut SqliteConnection,
    fields: &AuditoriumFields,
    seat_capacity: u32,
) -> Result<i64, PersistenceError> {
    let capacity: i32 = column_i32("auditoriums.seat_capacity", seat_capacity)?;

    diesel::insert_into(auditoriums::table)
        .values((
            auditoriums::name.eq(fields.name.trim()),
            auditoriums::screen_type.eq(fields.screen_type.as_str()),
            auditoriums::atmos.eq(flag(fields.atmos)),
            auditoriums::seat_capacity.eq(capacity),
            auditoriums::enabled.eq(flag(fields.enabled)),
        ))
        .execute(conn)?;

    let auditorium_id: i64 = last_insert_rowid(conn)?;
    info!(auditorium_id, name = %fields.name.trim(), seat_capacity, "Created auditorium");
    Ok(auditorium_id)
}

/// Updates an auditorium.
///
/// When the seat capacity changes and no tickets have been sold in the
/// auditorium, every screening in it has its available capacity reset to
/// the new seat capacity in the same transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The auditorium does not exist
/// - The seat capacity changes after tickets were sold
/// - The name is taken by another auditorium
pub fn update_auditorium(
    conn: &mut SqliteConnection,
    auditorium_id: i64,
    fields: &AuditoriumFields,
    seat_capacity: u32,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: Auditorium = get_auditorium(conn, auditorium_id)?
            .ok_or_else(|| PersistenceError::NotFound(String::from("auditorium")))?;

        let tickets_sold: u64 = count_tickets_for_auditorium(conn, auditorium_id)?;
        let reset_screenings: bool =
            plan_seat_capacity_change(&current, seat_capacity, tickets_sold)?;

        let capacity: i32 = column_i32("auditoriums.seat_capacity", seat_capacity)?;
        diesel::update(auditoriums::table.filter(auditoriums::auditorium_id.eq(auditorium_id)))
            .set((
                auditoriums::name.eq(fields.name.trim()),
                auditoriums::screen_type.eq(fields.screen_type.as_str()),
                auditoriums::atmos.eq(flag(fields.atmos)),
                auditoriums::seat_capacity.eq(capacity),
                auditoriums::enabled.eq(flag(fields.enabled)),
            ))
            .execute(conn)?;

        if reset_screenings {
            let reset: usize = diesel::update(
                screenings::table.filter(screenings::auditorium_id.eq(auditorium_id)),
            )
            .set(screenings::available_capacity.eq(capacity))
            .execute(conn)?;
            debug!(auditorium_id, reset, "Reset screening capacities");
        }

        info!(auditorium_id, seat_capacity, enabled = fields.enabled, "Updated auditorium");
        Ok(())
    })
}

/// Deletes an auditorium that no screening references.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the auditorium does not exist,
/// or a rejection if screenings reference it.
pub fn delete_auditorium(
    conn: &mut SqliteConnection,
    auditorium_id: i64,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        if get_auditorium(conn, auditorium_id)?.is_none() {
            return Err(PersistenceError::NotFound(String::from("auditorium")));
        }
        ensure_unreferenced(count_screenings_for_auditorium(conn, auditorium_id)?)?;

        diesel::delete(auditoriums::table.filter(auditoriums::auditorium_id.eq(auditorium_id)))
            .execute(conn)?;
        info!(auditorium_id, "Deleted auditorium");
        Ok(())
    })
}
