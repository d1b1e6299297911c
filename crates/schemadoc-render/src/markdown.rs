//! Markdown rendering of a schema graph
//!
//! Output depends only on the graph and the format settings, so an
//! unchanged graph always renders to byte-identical documents.

use schemadoc_core::{ColumnId, FormatConfig, RelationIndex, Schema, Table, TableId};
use unicode_width::UnicodeWidthStr;

const FOOTER: &str = "---\n\n> Generated by schemadoc\n";

/// File name of a table's document
pub fn table_file_name(table: &str) -> String {
    format!("{}.md", table)
}

/// README.md: schema overview with one row per table
pub fn render_index(schema: &Schema, format: &FormatConfig) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", schema.name));

    if let Some(driver) = &schema.driver {
        md.push_str("## Driver\n\n");
        md.push_str(&format!("- Name: {}\n", driver.name));
        if let Some(version) = &driver.database_version {
            md.push_str(&format!("- Database version: {}\n", version));
        }
        md.push('\n');
    }

    md.push_str("## Tables\n\n");
    let rows = schema
        .tables
        .iter()
        .map(|t| {
            vec![
                link(&t.name),
                t.columns.len().to_string(),
                cell(&t.comment),
                t.kind.to_string(),
            ]
        })
        .collect();
    md.push_str(&markdown_table(&["Name", "Columns", "Comment", "Type"], rows, format.adjust));
    md.push('\n');

    md.push_str(FOOTER);
    md
}

/// `<table>.md`: description, columns, and relations of one table
pub fn render_table(
    schema: &Schema,
    id: TableId,
    index: &RelationIndex,
    format: &FormatConfig,
) -> String {
    let table = schema.table(id);
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", table.name));

    md.push_str("## Description\n\n");
    if !table.comment.is_empty() {
        md.push_str(&table.comment.replace('\n', "  \n"));
        md.push_str("\n\n");
    }

    md.push_str("## Columns\n\n");
    let rows = table
        .columns
        .iter()
        .enumerate()
        .map(|(position, column)| {
            let column_id = ColumnId::new(id, position);
            let links = |tables: Vec<TableId>| {
                tables
                    .into_iter()
                    .map(|t| link(&schema.table(t).name))
                    .collect::<Vec<_>>()
                    .join(" ")
            };

            vec![
                cell(&column.name),
                cell(&column.data_type),
                column.default.as_deref().map(cell).unwrap_or_default(),
                column.nullable.to_string(),
                links(index.child_tables(schema, column_id)),
                links(index.parent_tables(schema, column_id)),
                cell(&column.comment),
            ]
        })
        .collect();
    md.push_str(&markdown_table(
        &["Name", "Type", "Default", "Nullable", "Children", "Parents", "Comment"],
        rows,
        format.adjust,
    ));
    md.push('\n');

    let relations: Vec<Vec<String>> = schema
        .relations
        .iter()
        .filter(|r| r.table == id || r.parent_table == id)
        .map(|r| {
            let child = schema.table(r.table);
            let parent = schema.table(r.parent_table);
            let names = |owner: &Table, positions: &[usize]| {
                positions
                    .iter()
                    .map(|&c| owner.columns[c].name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            vec![
                link(&child.name),
                cell(&names(child, &r.columns)),
                link(&parent.name),
                cell(&names(parent, &r.parent_columns)),
                cell(&r.def),
            ]
        })
        .collect();

    if !relations.is_empty() {
        md.push_str("## Relations\n\n");
        md.push_str(&markdown_table(
            &["Table", "Columns", "Parent Table", "Parent Columns", "Definition"],
            relations,
            format.adjust,
        ));
        md.push('\n');
    }

    md.push_str(FOOTER);
    md
}

fn link(table: &str) -> String {
    format!("[{}]({})", cell(table), table_file_name(table))
}

/// Escape a value for use inside a Markdown table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace("\r\n", "<br>").replace('\n', "<br>")
}

/// Render a Markdown table; with `adjust` every column is padded to its widest cell
fn markdown_table(header: &[&str], rows: Vec<Vec<String>>, adjust: bool) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            if !adjust {
                return header[i].width();
            }
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header[i].width()))
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect();

    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .into_iter()
            .zip(&widths)
            .map(|(c, &w)| {
                if adjust {
                    let pad = w.saturating_sub(c.width());
                    format!("{}{}", c, " ".repeat(pad))
                } else {
                    c
                }
            })
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let mut out = line(header.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        out.push_str(&line(row));
    }
    out
}
