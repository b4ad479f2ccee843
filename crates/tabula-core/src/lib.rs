//! # tabula-core
//!
//! Typed table schemas and SQL statement compilation for SQLite.
//!
//! This crate provides:
//! - A closed type vocabulary ([`DataType`], [`KeyType`])
//! - Column descriptions with nullability, uniqueness and key roles,
//!   including foreign keys that cascade deletes
//! - Composite UNIQUE / PRIMARY KEY constraints over several columns
//! - Pure compiler functions producing `CREATE TABLE`, `INSERT`, `UPDATE`
//!   and `DELETE` text
//!
//! Nothing in this crate performs I/O; executing the statements is the job
//! of `tabula-sqlite`.
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{Column, ConstraintComposite, DataType, render_create_table};
//!
//! let columns = [
//!     Column::default_key("id"),
//!     Column::new("user_id", DataType::Integer).references("users", "id"),
//!     Column::new("sku", DataType::Text),
//! ];
//! let composites = [ConstraintComposite::unique(["user_id", "sku"]).unwrap()];
//!
//! let sql = render_create_table("orders", &columns, &composites).unwrap();
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE orders(id INTEGER PRIMARY KEY NOT NULL, user_id INTEGER NOT NULL, \
//!      sku TEXT NOT NULL, FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE, \
//!      UNIQUE(user_id, sku));"
//! );
//! ```
//!
//! ## Values
//!
//! Values are embedded in statement text as string literals, not bound as
//! parameters. Every value goes through [`quote_literal`], which escapes
//! embedded quotes, so a value can never terminate its literal early.

pub mod column;
pub mod compiler;
pub mod composite;
pub mod error;
mod interleave;
pub mod snapshot;
pub mod types;
pub mod value;

pub use column::{Column, ForeignKeyRef};
pub use compiler::{
    render_column_constraint, render_column_definition, render_composite_constraint, render_count,
    render_create_table, render_delete, render_insert, render_select_all, render_update,
};
pub use composite::ConstraintComposite;
pub use error::{CompileError, Result};
pub use interleave::interleave;
pub use snapshot::{ColumnInfo, TableInfo};
pub use types::{DataType, KeyType};
pub use value::quote_literal;
