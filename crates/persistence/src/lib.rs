// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the boleteria cinema back office.
//!
//! This crate stores users, the movie and auditorium catalog, screenings,
//! cards and tickets in `SQLite` through Diesel. Schema changes are embedded
//! migrations applied when a connection is opened.
//!
//! ## Transactions
//!
//! Multi-entity mutations run inside `BEGIN IMMEDIATE` transactions. The
//! write lock is taken before the first read, so two concurrent purchases of
//! the last seat serialize and the second one observes the first one's
//! capacity. A writer that cannot get the lock within the busy timeout
//! fails with [`PersistenceError::LockContention`] and nothing is written.
//!
//! Rules from the `boleteria` core crate are evaluated inside the
//! transaction against the rows just read. A rejection surfaces as
//! [`PersistenceError::Rejected`] and rolls the transaction back.
//!
//! ## Storage formats
//!
//! - Money is stored as whole cents in `INTEGER` columns
//! - Instants are stored as UTC RFC 3339 text with whole seconds, so text
//!   order is chronological order
//! - Card months are stored as `MM/YY` text
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which creates an isolated
//! shared-cache in-memory database per call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use boleteria_domain::{
    Auditorium, AuditoriumFields, Card, Money, Movie, MovieFields, ProfileFields, Registration,
    Role, Screening, User, ValidatedCard,
};
use diesel::SqliteConnection;
use time::OffsetDateTime;

mod backend;
mod convert;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use backend::sqlite::ConnectionOptions;

pub use data_models::{AuditoriumFilter, ScreeningDetails, TicketDetails, UserCredentials};
pub use error::PersistenceError;
pub use queries::screenings::ScreeningListing;

/// Busy timeout used by in-memory test databases.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    queries::users::verify_password(password, password_hash)
}

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::open(
            &shared_memory_url,
            ConnectionOptions {
                busy_timeout: DEFAULT_BUSY_TIMEOUT,
                write_ahead_log: false,
            },
        )?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    /// * `busy_timeout` - How long a writer waits for the database lock
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(
        path: P,
        busy_timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(
            path_str,
            ConnectionOptions {
                busy_timeout,
                write_ahead_log: true,
            },
        )?;

        Ok(Self { conn })
    }

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or email is taken.
    pub fn create_user(
        &mut self,
        registration: &Registration,
        role: Role,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, registration, role)
    }

    /// Looks up a user and password hash by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_credentials_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        queries::users::get_credentials_by_username(&mut self.conn, username)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Lists every user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Updates a user's email, name and surname.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the email is taken.
    pub fn update_profile(
        &mut self,
        user_id: i64,
        profile: &ProfileFields,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_profile(&mut self.conn, user_id, profile)
    }

    /// Sets a user's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    pub fn set_role(&mut self, user_id: i64, role: Role) -> Result<(), PersistenceError> {
        mutations::users::set_role(&mut self.conn, user_id, role)
    }

    /// Creates a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is taken.
    pub fn create_movie(
        &mut self,
        fields: &MovieFields,
        duration_minutes: u32,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_movie(&mut self.conn, fields, duration_minutes)
    }

    /// Retrieves a movie by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_movie(&mut self, movie_id: i64) -> Result<Option<Movie>, PersistenceError> {
        queries::movies::get_movie(&mut self.conn, movie_id)
    }

    /// Lists movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_movies(&mut self) -> Result<Vec<Movie>, PersistenceError> {
        queries::movies::list_movies(&mut self.conn)
    }

    /// Updates a movie, re-checking overlaps when the runtime changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie does not exist or the update is rejected.
    pub fn update_movie(
        &mut self,
        movie_id: i64,
        fields: &MovieFields,
        duration_minutes: u32,
    ) -> Result<(), PersistenceError> {
        mutations::catalog::update_movie(&mut self.conn, movie_id, fields, duration_minutes)
    }

    /// Deletes a movie with no screenings.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie does not exist or is referenced.
    pub fn delete_movie(&mut self, movie_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_movie(&mut self.conn, movie_id)
    }

    /// Creates an auditorium.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken.
    pub fn create_auditorium(
        &mut self,
        fields: &AuditoriumFields,
        seat_capacity: u32,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_auditorium(&mut self.conn, fields, seat_capacity)
    }

    /// Retrieves an auditorium by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_auditorium(
        &mut self,
        auditorium_id: i64,
    ) -> Result<Option<Auditorium>, PersistenceError> {
        queries::auditoriums::get_auditorium(&mut self.conn, auditorium_id)
    }

    /// Lists auditoriums matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_auditoriums(
        &mut self,
        filter: AuditoriumFilter,
    ) -> Result<Vec<Auditorium>, PersistenceError> {
        queries::auditoriums::list_auditoriums(&mut self.conn, filter)
    }

    /// Updates an auditorium.
    ///
    /// # Errors
    ///
    /// Returns an error if the auditorium does not exist or the update is
    /// rejected.
    pub fn update_auditorium(
        &mut self,
        auditorium_id: i64,
        fields: &AuditoriumFields,
        seat_capacity: u32,
    ) -> Result<(), PersistenceError> {
        mutations::catalog::update_auditorium(&mut self.conn, auditorium_id, fields, seat_capacity)
    }

    /// Deletes an auditorium with no screenings.
    ///
    /// # Errors
    ///
    /// Returns an error if the auditorium does not exist or is referenced.
    pub fn delete_auditorium(&mut self, auditorium_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_auditorium(&mut self.conn, auditorium_id)
    }

    /// Admits and stores a new screening.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or admission fails.
    pub fn create_screening(
        &mut self,
        movie_id: i64,
        auditorium_id: i64,
        showtime: OffsetDateTime,
        now: OffsetDateTime,
    ) -> Result<Screening, PersistenceError> {
        mutations::screenings::create_screening(
            &mut self.conn,
            movie_id,
            auditorium_id,
            showtime,
            now,
        )
    }

    /// Retrieves a screening row by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_screening(
        &mut self,
        screening_id: i64,
    ) -> Result<Option<Screening>, PersistenceError> {
        queries::screenings::get_screening(&mut self.conn, screening_id)
    }

    /// Retrieves a screening with its movie and auditorium.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_screening_details(
        &mut self,
        screening_id: i64,
    ) -> Result<Option<ScreeningDetails>, PersistenceError> {
        queries::screenings::get_screening_details(&mut self.conn, screening_id)
    }

    /// Lists screenings by showtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_screenings(
        &mut self,
        listing: ScreeningListing,
        now: OffsetDateTime,
    ) -> Result<Vec<ScreeningDetails>, PersistenceError> {
        queries::screenings::list_screening_details(&mut self.conn, listing, now)
    }

    /// Updates a screening.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or admission fails.
    pub fn update_screening(
        &mut self,
        screening_id: i64,
        movie_id: i64,
        auditorium_id: i64,
        showtime: OffsetDateTime,
        now: OffsetDateTime,
    ) -> Result<Screening, PersistenceError> {
        mutations::screenings::update_screening(
            &mut self.conn,
            screening_id,
            movie_id,
            auditorium_id,
            showtime,
            now,
        )
    }

    /// Deletes a screening with no tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if the screening does not exist or has tickets.
    pub fn delete_screening(&mut self, screening_id: i64) -> Result<(), PersistenceError> {
        mutations::screenings::delete_screening(&mut self.conn, screening_id)
    }

    /// Retrieves the card owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_card_for_user(&mut self, user_id: i64) -> Result<Option<Card>, PersistenceError> {
        queries::cards::get_card_for_user(&mut self.conn, user_id)
    }

    /// Opens a card for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user has a card or the number is taken.
    pub fn create_card(
        &mut self,
        user_id: i64,
        card: &ValidatedCard,
    ) -> Result<Card, PersistenceError> {
        mutations::cards::create_card(&mut self.conn, user_id, card)
    }

    /// Replaces a user's card details, keeping the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the user has no card or the number is taken.
    pub fn update_card(
        &mut self,
        user_id: i64,
        card: &ValidatedCard,
    ) -> Result<Card, PersistenceError> {
        mutations::cards::update_card(&mut self.conn, user_id, card)
    }

    /// Recharges a user's card and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the user has no card or the recharge is rejected.
    pub fn recharge_card(
        &mut self,
        user_id: i64,
        amount: Money,
    ) -> Result<Money, PersistenceError> {
        mutations::cards::recharge_card(&mut self.conn, user_id, amount)
    }

    /// Deletes a user's card.
    ///
    /// # Errors
    ///
    /// Returns an error if the user has no card.
    pub fn delete_card(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::cards::delete_card(&mut self.conn, user_id)
    }

    /// Buys tickets for a screening with the buyer's card.
    ///
    /// # Errors
    ///
    /// Returns an error if the screening does not exist or the purchase is
    /// rejected. Nothing is written on error.
    pub fn purchase_tickets(
        &mut self,
        user_id: i64,
        screening_id: i64,
        quantity: u32,
        now: OffsetDateTime,
    ) -> Result<Vec<TicketDetails>, PersistenceError> {
        mutations::purchase::purchase_tickets(&mut self.conn, user_id, screening_id, quantity, now)
    }

    /// Retrieves a ticket with its screening details.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_ticket(
        &mut self,
        ticket_id: i64,
    ) -> Result<Option<TicketDetails>, PersistenceError> {
        queries::tickets::get_ticket_details(&mut self.conn, ticket_id)
    }

    /// Lists a user's tickets, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tickets_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<TicketDetails>, PersistenceError> {
        queries::tickets::list_ticket_details_for_user(&mut self.conn, user_id)
    }

    /// Counts the tickets sold for a screening.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_tickets_for_screening(
        &mut self,
        screening_id: i64,
    ) -> Result<u64, PersistenceError> {
        queries::tickets::count_tickets_for_screening(&mut self.conn, screening_id)
    }

    /// Counts the tickets owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_tickets_for_user(&mut self, user_id: i64) -> Result<u64, PersistenceError> {
        queries::tickets::count_tickets_for_user(&mut self.conn, user_id)
    }
}
