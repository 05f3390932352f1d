// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use boleteria_domain::{Role, User};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::convert::parse_enum;
use crate::data_models::UserCredentials;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    name: String,
    surname: String,
    password_hash: String,
    role: String,
}

impl UserRow {
    fn into_credentials(self) -> Result<UserCredentials, PersistenceError> {
        let role: Role = parse_enum("users.role", &self.role)?;
        Ok(UserCredentials {
            user: User {
                id: self.user_id,
                username: self.username,
                email: self.email,
                name: self.name,
                surname: self.surname,
                role,
            },
            password_hash: self.password_hash,
        })
    }
}

/// Retrieves a user and password hash by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_credentials_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserCredentials>, PersistenceError> {
    debug!(username, "Looking up user by username");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_credentials()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, PersistenceError> {
    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_credentials()?.user)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists all users ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| row.into_credentials().map(|c| c.user))
        .collect()
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::CredentialError(format!("Failed to verify password: {e}")))
}
