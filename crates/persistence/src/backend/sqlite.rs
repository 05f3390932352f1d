// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and configuring `SQLite` connections.
//!
//! Diesel has no DSL for PRAGMA statements, so the connection settings here
//! are issued as raw SQL. Nothing else in the crate should need raw SQL.

use std::time::Duration;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How a connection is configured after it is established.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    /// How long a writer waits on a locked database before `SQLITE_BUSY`.
    pub busy_timeout: Duration,
    /// Whether to switch the journal to write-ahead logging. Only
    /// meaningful for file databases.
    pub write_ahead_log: bool,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    debug!(statement, "Applying connection pragma");
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Opens a connection, applies `options`, runs pending migrations and checks
/// that foreign keys are enforced.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, a pragma or migration
/// fails, or foreign key enforcement is off after configuration.
pub fn open(
    database_url: &str,
    options: ConnectionOptions,
) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?options, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // SQLite takes the timeout as a 32-bit millisecond count.
    let busy_millis: u128 = options.busy_timeout.as_millis().min(u128::from(u32::MAX));
    pragma(&mut conn, &format!("PRAGMA busy_timeout = {busy_millis}"))?;
    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    if options.write_ahead_log {
        pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    let enforced: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeysPragma>(&mut conn)?
        .foreign_keys;
    if enforced == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    Ok(conn)
}

/// Returns the rowid assigned by the most recent insert on `conn`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
