//! SQL text generation.
//!
//! Pure functions turning column lists, composite constraints and
//! column/value pairs into statement text. Nothing here touches a
//! connection; the output is deterministic for a given input.
//!
//! Identifiers are emitted verbatim. Values are always emitted as escaped
//! string literals (see [`quote_literal`]) and rely on the column's type
//! affinity for conversion.

use crate::column::Column;
use crate::composite::ConstraintComposite;
use crate::error::{CompileError, Result};
use crate::interleave::interleave;
use crate::types::KeyType;
use crate::value::quote_literal;

/// Renders the definition of a column: `<name> <TYPE>` followed by its
/// inline constraints.
///
/// `UNIQUE` is omitted on a primary key, where it would be redundant.
#[must_use]
pub fn render_column_definition(column: &Column) -> String {
    let mut sql = format!("{} {}", column.name(), column.data_type().as_sql());
    let primary = column.key_type() == KeyType::Primary;
    if primary {
        sql.push_str(" PRIMARY KEY");
    }
    if !column.allow_null() {
        sql.push_str(" NOT NULL");
    }
    if column.is_unique() && !primary {
        sql.push_str(" UNIQUE");
    }
    sql
}

/// Renders the table-level clause a column contributes, which is its
/// foreign key clause if it has one and nothing otherwise.
///
/// Foreign keys always cascade deletes from the referenced row.
#[must_use]
pub fn render_column_constraint(column: &Column) -> String {
    match (column.foreign_key_table(), column.foreign_key_name()) {
        (Some(table), Some(target)) if column.key_type() == KeyType::Foreign => format!(
            ", FOREIGN KEY({}) REFERENCES {table}({target}) ON DELETE CASCADE",
            column.name()
        ),
        _ => String::new(),
    }
}

/// Renders a composite constraint clause: `, UNIQUE(<cols>)` or
/// `, PRIMARY KEY(<cols>)`.
///
/// # Errors
///
/// Returns [`CompileError::ForeignComposite`] for a composite tagged as a
/// foreign key.
pub fn render_composite_constraint(composite: &ConstraintComposite) -> Result<String> {
    let keyword = match composite.key_type() {
        KeyType::None => "UNIQUE",
        KeyType::Primary => "PRIMARY KEY",
        KeyType::Foreign => return Err(CompileError::ForeignComposite),
    };
    Ok(format!(
        ", {keyword}({})",
        interleave(composite.columns(), ", ", "", "")
    ))
}

/// Renders a complete `CREATE TABLE` statement.
///
/// Column definitions come first, then each column's foreign key clause in
/// column order, then the composite constraints in the order given.
///
/// ```rust
/// use tabula_core::{Column, DataType, render_create_table};
///
/// let sql = render_create_table(
///     "users",
///     &[Column::default_key("id"), Column::new("name", DataType::Text)],
///     &[],
/// )
/// .unwrap();
/// assert_eq!(
///     sql,
///     "CREATE TABLE users(id INTEGER PRIMARY KEY NOT NULL, name TEXT NOT NULL);"
/// );
/// ```
///
/// # Errors
///
/// Returns [`CompileError::ForeignKeyWithoutTable`] for a foreign key column
/// with an empty target table and [`CompileError::ForeignComposite`] for a
/// composite tagged as a foreign key.
pub fn render_create_table(
    name: &str,
    columns: &[Column],
    composites: &[ConstraintComposite],
) -> Result<String> {
    if let Some(column) = columns
        .iter()
        .find(|c| c.foreign_key_table().is_some_and(str::is_empty))
    {
        return Err(CompileError::ForeignKeyWithoutTable {
            column: column.name().to_string(),
        });
    }

    let definitions = interleave(columns.iter().map(render_column_definition), ", ", "", "");
    let column_constraints: String = columns.iter().map(render_column_constraint).collect();
    let composite_constraints = composites
        .iter()
        .map(render_composite_constraint)
        .collect::<Result<String>>()?;

    Ok(format!(
        "CREATE TABLE {name}({definitions}{column_constraints}{composite_constraints});"
    ))
}

/// Renders an `INSERT` of one row.
///
/// # Errors
///
/// Returns [`CompileError::NoValues`] when `values` is empty.
pub fn render_insert<C, V>(table: &str, values: &[(C, V)]) -> Result<String>
where
    C: AsRef<str>,
    V: AsRef<str>,
{
    if values.is_empty() {
        return Err(CompileError::NoValues {
            table: table.to_string(),
        });
    }
    let columns = interleave(values.iter().map(|(c, _)| c), ", ", "", "");
    let literals = interleave(
        values.iter().map(|(_, v)| quote_literal(v.as_ref())),
        ", ",
        "",
        "",
    );
    Ok(format!("INSERT INTO {table} ({columns}) VALUES({literals});"))
}

/// Renders an `UPDATE` whose conditions are AND-ed equality tests.
///
/// # Errors
///
/// Returns [`CompileError::EmptyCondition`] when `conditions` is empty, as an
/// unconditional update is never what a caller of this function wants, and
/// [`CompileError::NoValues`] when `assignments` is empty.
pub fn render_update<C, V, WC, WV>(
    table: &str,
    assignments: &[(C, V)],
    conditions: &[(WC, WV)],
) -> Result<String>
where
    C: AsRef<str>,
    V: AsRef<str>,
    WC: AsRef<str>,
    WV: AsRef<str>,
{
    if conditions.is_empty() {
        return Err(CompileError::EmptyCondition {
            table: table.to_string(),
        });
    }
    if assignments.is_empty() {
        return Err(CompileError::NoValues {
            table: table.to_string(),
        });
    }
    let set = interleave(
        assignments.iter().map(|(c, v)| equality(c.as_ref(), v.as_ref())),
        ", ",
        "",
        "",
    );
    let filter = interleave(
        conditions.iter().map(|(c, v)| equality(c.as_ref(), v.as_ref())),
        " AND ",
        "",
        "",
    );
    Ok(format!("UPDATE {table} SET {set} WHERE {filter};"))
}

/// Renders a `DELETE` of the rows where `column` equals `value`.
#[must_use]
pub fn render_delete(table: &str, column: &str, value: &str) -> String {
    format!("DELETE FROM {table} WHERE {};", equality(column, value))
}

/// Renders a `SELECT` of every row and column of a table.
#[must_use]
pub fn render_select_all(table: &str) -> String {
    format!("SELECT * FROM {table};")
}

/// Renders a row count query.
#[must_use]
pub fn render_count(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table};")
}

fn equality(column: &str, value: &str) -> String {
    format!("{column} = {}", quote_literal(value))
}
