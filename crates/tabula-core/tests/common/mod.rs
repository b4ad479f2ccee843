#![allow(dead_code)]

use tabula_core::{Column, ConstraintComposite, DataType};

/// Columns of a `users` table: integer key, unique email, nullable nickname.
pub fn users_columns() -> Vec<Column> {
    vec![
        Column::default_key("id"),
        Column::new("name", DataType::Text),
        Column::new("email", DataType::Text).unique(),
        Column::new("nickname", DataType::Text).nullable(),
    ]
}

/// Columns of an `orders` table referencing `users`.
pub fn orders_columns() -> Vec<Column> {
    vec![
        Column::default_key("id"),
        Column::new("user_id", DataType::Integer).references("users", "id"),
        Column::new("sku", DataType::Text),
        Column::new("amount", DataType::Real),
    ]
}

pub fn composite(columns: &[&str]) -> ConstraintComposite {
    ConstraintComposite::unique(columns.iter().copied())
        .unwrap_or_else(|e| panic!("Failed to build composite {columns:?}: {e}"))
}
