//! Test fixtures for merge and lint integration tests
//!
//! Reusable schema graphs and declarations shaped like what a reflector and
//! a hand-written schemadoc.toml would produce.

#![allow(dead_code)]

use schemadoc_core::{
    AdditionalComment, AdditionalRelation, Column, Driver, Relation, Schema, Table, TableKind,
};
use std::collections::BTreeMap;

/// Three tables with one reflected relation `a.a -> b.b`
///
/// - `a`: no table comment, two documented columns
/// - `b`: documented, column `b` lacks a comment
/// - `c`: documented, four columns, related to nothing
pub fn abc_schema() -> Schema {
    let mut schema = Schema::new("testschema").with_driver(Driver {
        name: "testdriver".to_string(),
        database_version: Some("1.0.0".to_string()),
    });

    let a = schema
        .add_table(Table::new("a").with_columns(vec![
            Column::new("a", "bigint(20)").with_comment("column a"),
            Column::new("a2", "datetime")
                .with_default("CURRENT_TIMESTAMP")
                .with_comment("column a2"),
        ]))
        .unwrap();
    let b = schema
        .add_table(
            Table::new("b")
                .with_comment("table b")
                .with_columns(vec![
                    Column::new("b", "text").with_nullable(true),
                    Column::new("b2", "text").with_nullable(true).with_comment("column b2"),
                ]),
        )
        .unwrap();
    schema
        .add_table(
            Table::new("c")
                .with_comment("table c")
                .with_columns(
                    (1..=4)
                        .map(|i| Column::new(format!("c{}", i), "text").with_comment(format!("column c{}", i)))
                        .collect(),
                ),
        )
        .unwrap();

    schema.add_relation(Relation::new(a, vec![0], b, vec![0])).unwrap();
    schema
}

/// Blog schema without any foreign keys declared in the database
pub fn blog_schema() -> Schema {
    let mut schema = Schema::new("blog");

    schema
        .add_table(
            Table::new("users")
                .with_comment("Registered users")
                .with_columns(vec![
                    Column::new("id", "bigint").with_comment("Primary key"),
                    Column::new("email", "varchar(255)").with_comment("Login address"),
                    Column::new("created_at", "timestamp").with_default("now()"),
                ]),
        )
        .unwrap();
    schema
        .add_table(Table::new("posts").with_columns(vec![
            Column::new("id", "bigint"),
            Column::new("user_id", "bigint"),
            Column::new("title", "text").with_comment("reflected title"),
        ]))
        .unwrap();
    schema
        .add_table(Table::new("comments").with_columns(vec![
            Column::new("id", "bigint"),
            Column::new("post_id", "bigint"),
            Column::new("user_id", "bigint").with_nullable(true),
        ]))
        .unwrap();
    schema
        .add_table(Table::new("recent_posts").with_kind(TableKind::View))
        .unwrap();

    schema
}

pub fn relation(
    table: &str,
    columns: &[&str],
    parent_table: &str,
    parent_columns: &[&str],
) -> AdditionalRelation {
    AdditionalRelation {
        table: table.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        parent_table: parent_table.to_string(),
        parent_columns: parent_columns.iter().map(|c| c.to_string()).collect(),
        def: String::new(),
    }
}

pub fn comment(table: &str, table_comment: &str, columns: &[(&str, &str)]) -> AdditionalComment {
    AdditionalComment {
        table: table.to_string(),
        table_comment: table_comment.to_string(),
        column_comments: columns
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Relations a blog's schemadoc.toml would declare
pub fn blog_relations() -> Vec<AdditionalRelation> {
    let mut comment_post = relation("comments", &["post_id"], "posts", &["id"]);
    comment_post.def = "comments.post_id -> posts.id".to_string();

    vec![
        relation("posts", &["user_id"], "users", &["id"]),
        comment_post,
        relation("comments", &["user_id"], "users", &["id"]),
    ]
}

/// Comments a blog's schemadoc.toml would declare
pub fn blog_comments() -> Vec<AdditionalComment> {
    vec![
        comment("posts", "Blog posts", &[("id", "Primary key"), ("title", "Post title")]),
        comment("users", "", &[("created_at", "Signup time")]),
    ]
}
