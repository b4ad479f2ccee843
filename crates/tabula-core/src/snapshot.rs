//! Schema snapshots read back from a live database.

use crate::column::{Column, ForeignKeyRef};
use crate::types::{DataType, KeyType};

/// A column as the engine reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Resolved storage type.
    pub data_type: DataType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is (part of) the primary key.
    pub primary_key: bool,
    /// Referenced table and column, for foreign key columns.
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnInfo {
    /// Key role of the column.
    ///
    /// A column that is both part of a composite primary key and a foreign
    /// key reports `Foreign`.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        if self.foreign_key.is_some() {
            KeyType::Foreign
        } else if self.primary_key {
            KeyType::Primary
        } else {
            KeyType::None
        }
    }

    /// Whether this snapshot agrees with a column description on name, type,
    /// nullability, key role and foreign key target.
    #[must_use]
    pub fn matches(&self, column: &Column) -> bool {
        self.name == column.name()
            && self.data_type == column.data_type()
            && self.nullable == column.allow_null()
            && self.key_type() == column.key_type()
            && self.foreign_target() == column.foreign_key_table().zip(column.foreign_key_name())
    }

    fn foreign_target(&self) -> Option<(&str, &str)> {
        self.foreign_key
            .as_ref()
            .map(|fk| (fk.table.as_str(), fk.column.as_str()))
    }
}

/// A table as the engine reports it, columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_column() {
        let info = ColumnInfo {
            name: "id".to_string(),
            data_type: DataType::Integer,
            nullable: false,
            primary_key: true,
            foreign_key: None,
        };
        assert!(info.matches(&Column::default_key("id")));
        assert!(!info.matches(&Column::new("id", DataType::Integer)));
        assert!(!info.matches(&Column::default_key("key")));
    }

    #[test]
    fn test_matches_foreign_key() {
        let info = ColumnInfo {
            name: "user_id".to_string(),
            data_type: DataType::Integer,
            nullable: false,
            primary_key: false,
            foreign_key: Some(ForeignKeyRef {
                table: "users".to_string(),
                column: "id".to_string(),
            }),
        };
        let user_id = || Column::new("user_id", DataType::Integer);
        assert_eq!(info.key_type(), KeyType::Foreign);
        assert!(info.matches(&user_id().references("users", "id")));
        assert!(!info.matches(&user_id()));
        assert!(!info.matches(&user_id().references("teams", "id")));
        // Empty target resolves to "user_id", not "id".
        assert!(!info.matches(&user_id().references("users", "")));

        let plain = ColumnInfo {
            foreign_key: None,
            ..info
        };
        assert_eq!(plain.key_type(), KeyType::None);
        assert!(plain.matches(&user_id()));
        assert!(!plain.matches(&user_id().references("users", "id")));
    }
}
