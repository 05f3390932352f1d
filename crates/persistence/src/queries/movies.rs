// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movie catalog queries.

use boleteria_domain::Movie;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::convert::count_u32;
use crate::diesel_schema::movies;
use crate::error::PersistenceError;

/// Diesel Queryable struct for movie rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = movies)]
struct MovieRow {
    movie_id: i64,
    title: String,
    duration_minutes: i32,
    genre: String,
    director: String,
    rating: String,
    synopsis: String,
}

impl TryFrom<MovieRow> for Movie {
    type Error = PersistenceError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.movie_id,
            title: row.title,
            duration_minutes: count_u32("movies.duration_minutes", row.duration_minutes)?,
            genre: row.genre,
            director: row.director,
            rating: row.rating,
            synopsis: row.synopsis,
        })
    }
}

/// Retrieves a movie by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the movie is not found.
pub fn get_movie(
    conn: &mut SqliteConnection,
    movie_id: i64,
) -> Result<Option<Movie>, PersistenceError> {
    let result: Result<MovieRow, diesel::result::Error> = movies::table
        .filter(movies::movie_id.eq(movie_id))
        .select(MovieRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Movie::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists all movies ordered by title.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_movies(conn: &mut SqliteConnection) -> Result<Vec<Movie>, PersistenceError> {
    let rows: Vec<MovieRow> = movies::table
        .order(movies::title.asc())
        .select(MovieRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Movie::try_from).collect()
}
