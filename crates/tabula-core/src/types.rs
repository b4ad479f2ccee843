//! Column type and key role vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage type of a column.
///
/// Each variant maps to one SQLite type affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Text affinity.
    Text,
    /// Integer affinity.
    Integer,
    /// Floating point affinity.
    Real,
}

impl DataType {
    /// Returns the SQL type name.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }

    /// Maps a declared column type, as reported by the engine, back to a
    /// `DataType` using SQLite's affinity rules.
    ///
    /// Declared types with NUMERIC or BLOB affinity have no counterpart here
    /// and fall back to `Text`.
    #[must_use]
    pub fn from_declared(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();
        if upper.contains("INT") {
            Self::Integer
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Self::Real
        } else {
            Self::Text
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Key role of a column or composite constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Not a key. On a composite this means UNIQUE.
    #[default]
    None,
    /// Primary key.
    Primary,
    /// Foreign key referencing another table.
    Foreign,
}
