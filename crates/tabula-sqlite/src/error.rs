//! Error types for database execution.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use tabula_core::CompileError;

/// Errors raised by [`Connection`](crate::Connection) and
/// [`Transaction`](crate::Transaction).
///
/// Engine diagnostics are carried verbatim in `message`.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The database file could not be opened or configured.
    #[error("cannot open database '{}': {message}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Engine diagnostic.
        message: String,
    },

    /// The schema or statement description could not be compiled.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The engine rejected a `CREATE TABLE` statement.
    #[error("schema rejected: {message}")]
    Schema {
        /// The statement that was rejected.
        sql: String,
        /// Engine diagnostic.
        message: String,
        /// Primary engine result code, if the engine reported one.
        code: Option<ErrorCode>,
    },

    /// The engine rejected a statement.
    #[error("statement failed: {message}")]
    Statement {
        /// The statement that was rejected.
        sql: String,
        /// Engine diagnostic.
        message: String,
        /// Primary engine result code, if the engine reported one.
        code: Option<ErrorCode>,
    },

    /// Introspection found no table of that name.
    #[error("no such table: {0}")]
    NoSuchTable(String),

    /// Releasing the native handle failed.
    #[error("cannot close database: {message}")]
    Close {
        /// Engine diagnostic.
        message: String,
    },

    /// The connection was used after [`Connection::close`](crate::Connection::close).
    #[error("connection is closed")]
    Closed,
}

impl DbError {
    pub(crate) fn statement(sql: &str, err: &rusqlite::Error) -> Self {
        Self::Statement {
            sql: sql.to_string(),
            message: err.to_string(),
            code: error_code(err),
        }
    }

    pub(crate) fn schema(sql: &str, err: &rusqlite::Error) -> Self {
        Self::Schema {
            sql: sql.to_string(),
            message: err.to_string(),
            code: error_code(err),
        }
    }

    /// The engine's own diagnostic, for errors that carry one.
    #[must_use]
    pub fn engine_message(&self) -> Option<&str> {
        match self {
            Self::Open { message, .. }
            | Self::Schema { message, .. }
            | Self::Statement { message, .. }
            | Self::Close { message } => Some(message),
            Self::Compile(_) | Self::NoSuchTable(_) | Self::Closed => None,
        }
    }

    /// The statement text the engine rejected, if any.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Schema { sql, .. } | Self::Statement { sql, .. } => Some(sql),
            _ => None,
        }
    }

    /// Whether the engine rejected a statement for violating a UNIQUE,
    /// PRIMARY KEY, NOT NULL or FOREIGN KEY constraint.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Statement {
                code: Some(ErrorCode::ConstraintViolation),
                ..
            }
        )
    }
}

fn error_code(err: &rusqlite::Error) -> Option<ErrorCode> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.code),
        _ => None,
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DbError>;
