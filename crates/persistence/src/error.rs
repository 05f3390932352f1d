// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boleteria::CoreError;
use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found. Holds the resource name.
    NotFound(String),
    /// A unique constraint rejected the write.
    UniqueViolation(String),
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation(String),
    /// The database was locked by another writer past the busy timeout,
    /// or the transaction could not be serialized.
    LockContention(String),
    /// A stored value could not be converted to its domain type.
    CorruptRecord(String),
    /// Password hashing or verification failed.
    CredentialError(String),
    /// A rule evaluated inside a transaction rejected the operation.
    ///
    /// The transaction was rolled back.
    Rejected(CoreError),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key constraint violated: {msg}"),
            Self::LockContention(msg) => write!(f, "Database is busy: {msg}"),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::CredentialError(msg) => write!(f, "Credential error: {msg}"),
            Self::Rejected(err) => write!(f, "Rejected: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound(String::from("record")),
            diesel::result::Error::DatabaseError(kind, info) => {
                let message: String = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(message),
                    DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(message),
                    DatabaseErrorKind::SerializationFailure => Self::LockContention(message),
                    _ if message.contains("database is locked")
                        || message.contains("database table is locked") =>
                    {
                        Self::LockContention(message)
                    }
                    _ => Self::DatabaseError(message),
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

impl From<boleteria_domain::DomainError> for PersistenceError {
    fn from(err: boleteria_domain::DomainError) -> Self {
        Self::Rejected(CoreError::DomainViolation(err))
    }
}
