// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Screening mutations.
//!
//! Each operation reads the overlap set and writes the screening inside one
//! immediate transaction. Two admissions into the same auditorium therefore
//! serialize, and the second one sees the first one's row.

use boleteria::{
    ScheduledShowing, ScreeningAdmission, ScreeningCandidate, admit_screening,
    admit_screening_update, ensure_auditorium_enabled, ensure_screening_deletable,
};
use boleteria_domain::{Auditorium, Movie, Screening};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::convert::{column_i32, instant_text};
use crate::diesel_schema::screenings;
use crate::error::PersistenceError;
use crate::queries::auditoriums::get_auditorium;
use crate::queries::movies::get_movie;
use crate::queries::screenings::{get_screening, list_showings_in_auditoriums};
use crate::queries::tickets::count_tickets_for_screening;

/// The stored movie and auditorium a screening request names.
struct Placement {
    movie: Movie,
    auditorium: Auditorium,
}

/// Loads the auditorium first and refuses a disabled one before the movie
/// is looked up.
fn load_placement(
    conn: &mut SqliteConnection,
    movie_id: i64,
    auditorium_id: i64,
) -> Result<Placement, PersistenceError> {
    let auditorium: Auditorium = get_auditorium(conn, auditorium_id)?
        .ok_or_else(|| PersistenceError::NotFound(String::from("auditorium")))?;
    ensure_auditorium_enabled(&auditorium)?;
    let movie: Movie = get_movie(conn, movie_id)?
        .ok_or_else(|| PersistenceError::NotFound(String::from("movie")))?;
    Ok(Placement { movie, auditorium })
}

/// Creates a screening.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `movie_id` - The movie to show
/// * `auditorium_id` - The auditorium to show it in
/// * `showtime` - When it starts
/// * `now` - The current instant
///
/// # Returns
///
/// The new screening.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the movie or auditorium does
/// not exist, or a rejection if the slot is not admissible.
pub fn create_screening(
    conn: &mut SqliteConnection,
    movie_id: i64,
    auditorium_id: i64,
    showtime: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<Screening, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let placement: Placement = load_placement(conn, movie_id, auditorium_id)?;
        let existing: Vec<ScheduledShowing> =
            list_showings_in_auditoriums(conn, &[auditorium_id])?;

        let candidate = ScreeningCandidate {
            movie_id,
            auditorium_id,
            showtime,
            duration_minutes: placement.movie.duration_minutes,
        };
        let admission: ScreeningAdmission =
            admit_screening(&candidate, &placement.auditorium, &existing, now)?;

        diesel::insert_into(screenings::table)
            .values((
                screenings::movie_id.eq(movie_id),
                screenings::auditorium_id.eq(auditorium_id),
                screenings::showtime.eq(instant_text(showtime)?),
                screenings::available_capacity.eq(column_i32(
                    "screenings.available_capacity",
                    admission.available_capacity,
                )?),
            ))
            .execute(conn)?;

        let screening_id: i64 = last_insert_rowid(conn)?;
        info!(
            screening_id,
            movie_id,
            auditorium_id,
            %showtime,
            "Created screening"
        );

        get_screening(conn, screening_id)?
            .ok_or_else(|| PersistenceError::NotFound(String::from("screening")))
    })
}

/// Updates a screening's movie, auditorium and showtime.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the screening, movie or
/// auditorium does not exist, or a rejection if the new slot is not
/// admissible or the auditorium changes after tickets were sold.
pub fn update_screening(
    conn: &mut SqliteConnection,
    screening_id: i64,
    movie_id: i64,
    auditorium_id: i64,
    showtime: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<Screening, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: Screening = get_screening(conn, screening_id)?
            .ok_or_else(|| PersistenceError::NotFound(String::from("screening")))?;
        let placement: Placement = load_placement(conn, movie_id, auditorium_id)?;
        let existing: Vec<ScheduledShowing> =
            list_showings_in_auditoriums(conn, &[auditorium_id])?;
        let tickets_sold: u64 = count_tickets_for_screening(conn, screening_id)?;

        let candidate = ScreeningCandidate {
            movie_id,
            auditorium_id,
            showtime,
            duration_minutes: placement.movie.duration_minutes,
        };
        let admission: ScreeningAdmission = admit_screening_update(
            &current,
            &candidate,
            &placement.auditorium,
            &existing,
            tickets_sold,
            now,
        )?;

        diesel::update(screenings::table.filter(screenings::screening_id.eq(screening_id)))
            .set((
                screenings::movie_id.eq(movie_id),
                screenings::auditorium_id.eq(auditorium_id),
                screenings::showtime.eq(instant_text(showtime)?),
                screenings::available_capacity.eq(column_i32(
                    "screenings.available_capacity",
                    admission.available_capacity,
                )?),
            ))
            .execute(conn)?;

        debug!(
            screening_id,
            available_capacity = admission.available_capacity,
            "Screening capacity after update"
        );
        info!(screening_id, movie_id, auditorium_id, %showtime, "Updated screening");

        get_screening(conn, screening_id)?
            .ok_or_else(|| PersistenceError::NotFound(String::from("screening")))
    })
}

/// Deletes a screening with no tickets.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the screening does not exist,
/// or a rejection if tickets were sold for it.
pub fn delete_screening(
    conn: &mut SqliteConnection,
    screening_id: i64,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        if get_screening(conn, screening_id)?.is_none() {
            return Err(PersistenceError::NotFound(String::from("screening")));
        }
        ensure_screening_deletable(count_tickets_for_screening(conn, screening_id)?)?;

        diesel::delete(screenings::table.filter(screenings::screening_id.eq(screening_id)))
            .execute(conn)?;
        info!(screening_id, "Deleted screening");
        Ok(())
    })
}
