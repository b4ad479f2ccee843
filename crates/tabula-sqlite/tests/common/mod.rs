#![allow(dead_code)]

use tabula_core::{Column, DataType};
use tabula_sqlite::{Connection, MemorySink};
use tempfile::TempDir;

/// A connection to a fresh database file, plus the directory keeping it
/// alive and a sink recording every statement.
pub struct TestDb {
    pub conn: Connection,
    pub sink: MemorySink,
    pub dir: TempDir,
}

pub fn open() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let sink = MemorySink::new();
    let conn = Connection::open_with_sink(dir.path().join("test.db"), sink.clone())
        .expect("Failed to open database");
    TestDb { conn, sink, dir }
}

pub fn users_columns() -> Vec<Column> {
    vec![
        Column::default_key("id"),
        Column::new("name", DataType::Text),
        Column::new("email", DataType::Text).unique().nullable(),
    ]
}

pub fn orders_columns() -> Vec<Column> {
    vec![
        Column::default_key("id"),
        Column::new("user_id", DataType::Integer).references("users", "id"),
        Column::new("sku", DataType::Text),
    ]
}

/// Creates `users` and `orders` with the columns above.
pub fn create_shop(conn: &Connection) {
    conn.create("users", &users_columns(), &[])
        .expect("Failed to create users");
    conn.create("orders", &orders_columns(), &[])
        .expect("Failed to create orders");
}
