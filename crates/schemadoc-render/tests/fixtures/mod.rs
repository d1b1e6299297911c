//! Test fixtures for rendering integration tests

#![allow(dead_code)]

use schemadoc_core::{AdditionalComment, AdditionalRelation, Column, Schema, Table};
use std::collections::BTreeMap;

/// Shop schema as reflected from a database without foreign keys
pub fn shop_schema() -> Schema {
    let mut schema = Schema::new("shop");

    schema
        .add_table(
            Table::new("customers")
                .with_comment("People who place orders")
                .with_columns(vec![
                    Column::new("id", "integer").with_comment("Primary key"),
                    Column::new("name", "varchar(100)").with_comment("Display name"),
                ]),
        )
        .unwrap();
    schema
        .add_table(Table::new("orders").with_columns(vec![
            Column::new("id", "integer"),
            Column::new("customer_id", "integer"),
            Column::new("placed_at", "timestamp").with_default("now()"),
        ]))
        .unwrap();

    schema
}

pub fn order_customer() -> AdditionalRelation {
    AdditionalRelation {
        table: "orders".to_string(),
        columns: vec!["customer_id".to_string()],
        parent_table: "customers".to_string(),
        parent_columns: vec!["id".to_string()],
        def: String::new(),
    }
}

pub fn orders_comment(table_comment: &str) -> AdditionalComment {
    AdditionalComment {
        table: "orders".to_string(),
        table_comment: table_comment.to_string(),
        column_comments: BTreeMap::from([("placed_at".to_string(), "Checkout time".to_string())]),
    }
}
