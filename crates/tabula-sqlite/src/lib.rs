//! # tabula-sqlite
//!
//! Executes `tabula-core` schemas and row statements against a single
//! SQLite connection.
//!
//! - [`Connection`] owns one native handle, enables foreign key enforcement
//!   when opened and compiles then executes every operation synchronously.
//! - [`Transaction`] brackets a sequence of operations in `BEGIN` and a
//!   release statement chosen by its [`ReleasePolicy`].
//! - [`StatementSink`] is offered every statement before it runs. The
//!   default, [`TracingSink`], logs through `tracing`.
//!
//! A connection is not meant to be shared between threads; open one per
//! writer. Nothing here retries: engine errors come back as [`DbError`]
//! with the engine's message intact.
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{Column, DataType};
//! use tabula_sqlite::Connection;
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let conn = Connection::open(dir.path().join("shop.db")).unwrap();
//! conn.create(
//!     "users",
//!     &[Column::default_key("id"), Column::new("name", DataType::Text)],
//!     &[],
//! )
//! .unwrap();
//! conn.create(
//!     "orders",
//!     &[
//!         Column::default_key("id"),
//!         Column::new("user_id", DataType::Integer).references("users", "id"),
//!     ],
//!     &[],
//! )
//! .unwrap();
//!
//! conn.insert("users", &[("id", "1"), ("name", "Alice")]).unwrap();
//! conn.insert("orders", &[("id", "10"), ("user_id", "1")]).unwrap();
//!
//! // Unknown user: rejected by the foreign key.
//! assert!(conn.insert("orders", &[("id", "11"), ("user_id", "2")]).is_err());
//!
//! // Deleting the user cascades to the order.
//! conn.remove("users", "id", "1").unwrap();
//! assert_eq!(conn.count("orders").unwrap(), 0);
//! ```

mod connection;
mod error;
mod sink;
mod transaction;

pub use connection::Connection;
pub use error::{DbError, Result};
pub use rusqlite::types::Value;
pub use sink::{MemorySink, NullSink, StatementSink, TracingSink};
pub use transaction::{ReleasePolicy, Transaction};
