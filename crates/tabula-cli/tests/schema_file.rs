//! Schema files applied to a real database.

use std::fs;

use tabula_cli::SchemaFile;
use tabula_core::DataType;
use tabula_sqlite::{Connection, NullSink, ReleasePolicy, Transaction};

const SCHEMA: &str = r#"{
    "tables": [
        {
            "name": "users",
            "columns": [
                { "name": "id", "type": "INTEGER", "key": "primary" },
                { "name": "name", "type": "TEXT" }
            ]
        },
        {
            "name": "orders",
            "columns": [
                { "name": "id", "type": "INTEGER", "key": "primary" },
                { "name": "user_id", "type": "INTEGER", "key": "foreign",
                  "references": { "table": "users", "column": "id" } },
                { "name": "sku", "type": "TEXT" },
                { "name": "price", "type": "REAL", "nullable": true }
            ],
            "composites": [ { "key": "unique", "columns": ["user_id", "sku"] } ]
        }
    ]
}"#;

fn apply(conn: &Connection, schema: &SchemaFile) -> anyhow::Result<()> {
    let mut tx = Transaction::begin_with(conn, ReleasePolicy::CommitOnSuccess)?;
    for table in &schema.tables {
        tx.create(&table.name, &table.columns()?, &table.composites()?)?;
    }
    tx.succeeded();
    tx.finish()?;
    Ok(())
}

#[test]
fn test_apply_schema_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.json");
    fs::write(&path, SCHEMA).unwrap();

    let schema = SchemaFile::load(&path).unwrap();
    let conn = Connection::open_with_sink(dir.path().join("shop.db"), NullSink).unwrap();
    apply(&conn, &schema).unwrap();

    let orders = conn.table_info("orders").unwrap();
    assert_eq!(orders.columns.len(), 4);
    let price = orders.column("price").unwrap();
    assert_eq!(price.data_type, DataType::Real);
    assert!(price.nullable);
    assert!(orders.column("id").unwrap().primary_key);

    conn.insert("users", &[("id", "1"), ("name", "Alice")]).unwrap();
    conn.insert("orders", &[("id", "1"), ("user_id", "1"), ("sku", "A-1")])
        .unwrap();
    let err = conn
        .insert("orders", &[("id", "2"), ("user_id", "1"), ("sku", "A-1")])
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn test_failed_apply_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    // The second table collides with the first, so the whole apply rolls back.
    let schema = SchemaFile::parse(
        r#"{"tables":[
            {"name":"tags","columns":[{"name":"id","type":"INTEGER","key":"primary"}]},
            {"name":"tags","columns":[{"name":"id","type":"INTEGER","key":"primary"}]}
        ]}"#,
    )
    .unwrap();
    let conn = Connection::open_with_sink(dir.path().join("tags.db"), NullSink).unwrap();

    assert!(apply(&conn, &schema).is_err());
    assert!(!conn.in_transaction());
    assert!(conn.table_info("tags").is_err());
}

#[test]
fn test_missing_schema_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaFile::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("reading schema file"));
}
