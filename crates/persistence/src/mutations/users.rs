// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.

use boleteria_domain::{ProfileFields, Registration, Role};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Creates a new user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `registration` - The validated registration fields
/// * `role` - The role to assign
///
/// # Errors
///
/// Returns an error if the password cannot be hashed, or
/// [`PersistenceError::UniqueViolation`] if the username or email is taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    registration: &Registration,
    role: Role,
) -> Result<i64, PersistenceError> {
    info!(
        username = %registration.username,
        role = %role,
        "Creating user"
    );

    let password_hash: String = bcrypt::hash(&registration.password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::CredentialError(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(&registration.username),
            users::email.eq(registration.email.trim()),
            users::name.eq(registration.name.trim()),
            users::surname.eq(registration.surname.trim()),
            users::password_hash.eq(&password_hash),
            users::role.eq(role.as_str()),
        ))
        .execute(conn)?;

    let user_id: i64 = last_insert_rowid(conn)?;
    info!(user_id, "User created successfully");

    Ok(user_id)
}

/// Updates a user's profile fields.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the user does not exist, or
/// [`PersistenceError::UniqueViolation`] if the email is taken.
pub fn update_profile(
    conn: &mut SqliteConnection,
    user_id: i64,
    profile: &ProfileFields,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set((
            users::email.eq(profile.email.trim()),
            users::name.eq(profile.name.trim()),
            users::surname.eq(profile.surname.trim()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(String::from("user")));
    }

    info!(user_id, "Updated user profile");
    Ok(())
}

/// Sets a user's role.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the user does not exist.
pub fn set_role(
    conn: &mut SqliteConnection,
    user_id: i64,
    role: Role,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set(users::role.eq(role.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(String::from("user")));
    }

    info!(user_id, role = %role, "Updated user role");
    Ok(())
}
