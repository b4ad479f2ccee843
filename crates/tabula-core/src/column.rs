//! Column descriptions.
//!
//! A [`Column`] is an immutable value built fluently and consumed once, when
//! its table is created.

use crate::types::{DataType, KeyType};

/// The target of a foreign key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// The referenced table name.
    pub table: String,
    /// The referenced column name. Empty means "same name as the referencing
    /// column".
    pub column: String,
}

/// Description of a single table column.
///
/// Columns start out NOT NULL, non-unique and without a key role.
///
/// ```rust
/// use tabula_core::{Column, DataType, KeyType};
///
/// let id = Column::default_key("id");
/// assert_eq!(id.key_type(), KeyType::Primary);
///
/// let owner = Column::new("user_id", DataType::Integer).references("users", "id");
/// assert_eq!(owner.key_type(), KeyType::Foreign);
/// assert_eq!(owner.foreign_key_name(), Some("id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    data_type: DataType,
    allow_null: bool,
    unique: bool,
    key_type: KeyType,
    references: Option<ForeignKeyRef>,
}

impl Column {
    /// Creates a NOT NULL, non-unique column without a key role.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            allow_null: false,
            unique: false,
            key_type: KeyType::None,
            references: None,
        }
    }

    /// Creates the conventional row identity column: `INTEGER PRIMARY KEY`.
    #[must_use]
    pub fn default_key(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Integer).primary_key()
    }

    /// Allows NULL values. Ignored for primary key columns.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        if !matches!(self.key_type, KeyType::Primary) {
            self.allow_null = true;
        }
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Makes the column the table's primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.key_type = KeyType::Primary;
        // Primary keys are implicitly NOT NULL
        self.allow_null = false;
        self.references = None;
        self
    }

    /// Makes the column a foreign key into `table`.
    ///
    /// An empty `column` references the column of the same name in `table`.
    /// Deleting the referenced row deletes the referencing rows too.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.key_type = KeyType::Foreign;
        self.references = Some(ForeignKeyRef {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage type.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Whether NULL values are accepted.
    #[must_use]
    pub const fn allow_null(&self) -> bool {
        self.allow_null
    }

    /// Whether the column carries its own UNIQUE constraint.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Key role.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Foreign key target, present only for foreign key columns.
    #[must_use]
    pub const fn foreign_key(&self) -> Option<&ForeignKeyRef> {
        self.references.as_ref()
    }

    /// The referenced table, for foreign key columns.
    #[must_use]
    pub fn foreign_key_table(&self) -> Option<&str> {
        self.references.as_ref().map(|fk| fk.table.as_str())
    }

    /// The referenced column, for foreign key columns, with an empty target
    /// resolved to this column's own name.
    #[must_use]
    pub fn foreign_key_name(&self) -> Option<&str> {
        self.references.as_ref().map(|fk| {
            if fk.column.is_empty() {
                self.name.as_str()
            } else {
                fk.column.as_str()
            }
        })
    }
}
