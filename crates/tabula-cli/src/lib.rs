//! Schema files and argument parsing for the `tabula` command.
//!
//! A schema file is JSON:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "orders",
//!       "columns": [
//!         { "name": "id", "type": "INTEGER", "key": "primary" },
//!         { "name": "user_id", "type": "INTEGER", "key": "foreign",
//!           "references": { "table": "users", "column": "id" } },
//!         { "name": "note", "type": "TEXT", "nullable": true }
//!       ],
//!       "composites": [ { "key": "unique", "columns": ["user_id", "note"] } ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use tabula_core::{Column, ConstraintComposite, DataType, KeyType};

/// A whole schema file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Tables, created in this order.
    pub tables: Vec<TableSpec>,
}

/// One table of a schema file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub composites: Vec<CompositeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub key: KeyType,
    #[serde(default)]
    pub references: Option<ReferenceSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSpec {
    pub table: String,
    #[serde(default)]
    pub column: String,
}

/// Composite constraint kind as spelled in schema files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeKind {
    Unique,
    Primary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeSpec {
    pub key: CompositeKind,
    pub columns: Vec<String>,
}

impl SchemaFile {
    /// Reads and parses a schema file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid schema.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading schema file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing schema file {}", path.display()))
    }

    /// Parses schema JSON.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or unknown fields.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl TableSpec {
    /// Converts the column specs into core columns.
    ///
    /// # Errors
    ///
    /// Fails when a foreign key column has no `references`, or a non-foreign
    /// column has one.
    pub fn columns(&self) -> anyhow::Result<Vec<Column>> {
        self.columns
            .iter()
            .map(|spec| spec.to_column(&self.name))
            .collect()
    }

    /// Converts the composite specs into core constraints.
    ///
    /// # Errors
    ///
    /// Fails when a composite names fewer than two columns.
    pub fn composites(&self) -> anyhow::Result<Vec<ConstraintComposite>> {
        self.composites
            .iter()
            .map(|spec| {
                let key = match spec.key {
                    CompositeKind::Unique => KeyType::None,
                    CompositeKind::Primary => KeyType::Primary,
                };
                ConstraintComposite::new(key, spec.columns.iter().cloned())
                    .with_context(|| format!("composite constraint on table '{}'", self.name))
            })
            .collect()
    }
}

impl ColumnSpec {
    fn to_column(&self, table: &str) -> anyhow::Result<Column> {
        let mut column = Column::new(self.name.as_str(), self.data_type);
        if self.nullable {
            column = column.nullable();
        }
        if self.unique {
            column = column.unique();
        }
        match (self.key, &self.references) {
            (KeyType::Foreign, Some(target)) => {
                column = column.references(target.table.as_str(), target.column.as_str());
            }
            (KeyType::Foreign, None) => {
                bail!("column '{table}.{}' is a foreign key without references", self.name)
            }
            (_, Some(_)) => {
                bail!("column '{table}.{}' has references but is not a foreign key", self.name)
            }
            (KeyType::Primary, None) => column = column.primary_key(),
            (KeyType::None, None) => {}
        }
        Ok(column)
    }
}

/// Parses a `column=value` argument.
///
/// # Errors
///
/// Fails when there is no `=` or the column name is empty.
pub fn parse_assignment(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((column, value)) if !column.is_empty() => Ok((column.to_string(), value.to_string())),
        _ => bail!("expected column=value, got '{arg}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"{
        "tables": [
            {
                "name": "users",
                "columns": [
                    { "name": "id", "type": "INTEGER", "key": "primary" },
                    { "name": "email", "type": "TEXT", "unique": true, "nullable": true }
                ]
            },
            {
                "name": "orders",
                "columns": [
                    { "name": "id", "type": "INTEGER", "key": "primary" },
                    { "name": "user_id", "type": "INTEGER", "key": "foreign",
                      "references": { "table": "users", "column": "id" } },
                    { "name": "sku", "type": "TEXT" }
                ],
                "composites": [ { "key": "unique", "columns": ["user_id", "sku"] } ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_schema_file() {
        let schema = SchemaFile::parse(SHOP).unwrap();
        assert_eq!(schema.tables.len(), 2);

        let users = schema.tables[0].columns().unwrap();
        assert_eq!(users[0], Column::default_key("id"));
        assert_eq!(
            users[1],
            Column::new("email", DataType::Text).nullable().unique()
        );

        let orders = &schema.tables[1];
        let columns = orders.columns().unwrap();
        assert_eq!(columns[1].foreign_key_table(), Some("users"));
        let composites = orders.composites().unwrap();
        assert_eq!(composites[0].columns(), ["user_id", "sku"]);
        assert_eq!(composites[0].key_type(), KeyType::None);
    }

    #[test]
    fn test_foreign_key_needs_references() {
        let schema = SchemaFile::parse(
            r#"{"tables":[{"name":"t","columns":[{"name":"x","type":"INTEGER","key":"foreign"}]}]}"#,
        )
        .unwrap();
        let err = schema.tables[0].columns().unwrap_err();
        assert!(err.to_string().contains("without references"));
    }

    #[test]
    fn test_short_composite_is_rejected() {
        let schema = SchemaFile::parse(
            r#"{"tables":[{"name":"t","columns":[{"name":"x","type":"TEXT"}],
                "composites":[{"key":"primary","columns":["x"]}]}]}"#,
        )
        .unwrap();
        assert!(schema.tables[0].composites().is_err());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(SchemaFile::parse(r#"{"tables":[],"extra":1}"#).is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=Alice").unwrap(),
            ("name".to_string(), "Alice".to_string())
        );
        assert_eq!(
            parse_assignment("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
