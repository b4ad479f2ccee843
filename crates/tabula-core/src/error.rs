//! Errors raised while building or compiling schema descriptions.

use thiserror::Error;

/// A schema or statement description that cannot be compiled to SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A composite constraint was given fewer than two columns.
    #[error("invalid composite constraint: needs at least 2 columns, got {columns}")]
    InvalidConstraint {
        /// Number of columns supplied.
        columns: usize,
    },

    /// A composite constraint was tagged as a foreign key.
    #[error("composite constraints cannot describe a foreign key")]
    ForeignComposite,

    /// A foreign key column does not name the table it references.
    #[error("foreign key column '{column}' has no referenced table")]
    ForeignKeyWithoutTable {
        /// The column carrying the foreign key.
        column: String,
    },

    /// An UPDATE was requested without any WHERE condition.
    #[error("refusing to update '{table}' without a WHERE condition")]
    EmptyCondition {
        /// Target table.
        table: String,
    },

    /// An INSERT or UPDATE was requested without any column/value pair.
    #[error("no column values given for '{table}'")]
    NoValues {
        /// Target table.
        table: String,
    },
}

/// Result type for schema compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
