//! Reflected schema snapshot (schema.json)
//!
//! This is the hand-off format between a database reflector and the
//! schema graph. Relations refer to tables and columns by name; loading
//! resolves every name and enforces the graph invariants.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LookupError, SchemaError, SnapshotError};
use crate::schema::{Column, Driver, Relation, Schema, Table, TableKind};

/// Serialized form of a whole schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,

    #[serde(default)]
    pub tables: Vec<TableSnapshot>,

    #[serde(default)]
    pub relations: Vec<RelationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,

    #[serde(rename = "type", default = "default_table_type")]
    pub kind: String,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub columns: Vec<ColumnSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub name: String,

    #[serde(rename = "type")]
    pub data_type: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSnapshot {
    pub table: String,

    pub columns: Vec<String>,

    pub parent_table: String,

    pub parent_columns: Vec<String>,

    #[serde(default)]
    pub def: String,

    #[serde(default)]
    pub is_additional: bool,
}

fn default_table_type() -> String {
    TableKind::BaseTable.as_str().to_string()
}

impl SchemaSnapshot {
    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::ParseError(e.to_string()))
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SnapshotError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build the schema graph, resolving relation names
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut schema = Schema::new(self.name);
        schema.driver = self.driver;

        for table in self.tables {
            schema.add_table(table.into())?;
        }

        for (index, relation) in self.relations.into_iter().enumerate() {
            let resolve = |schema: &Schema| -> Result<_, LookupError> {
                let table = schema.find_table_by_name(&relation.table)?;
                let columns = schema.table(table).resolve_columns(&relation.columns)?;
                let parent_table = schema.find_table_by_name(&relation.parent_table)?;
                let parent_columns = schema
                    .table(parent_table)
                    .resolve_columns(&relation.parent_columns)?;
                Ok((table, columns, parent_table, parent_columns))
            };
            let (table, columns, parent_table, parent_columns) =
                resolve(&schema).map_err(|source| SchemaError::Relation { index, source })?;

            schema.add_relation(
                Relation::new(table, columns, parent_table, parent_columns)
                    .with_def(relation.def)
                    .with_additional(relation.is_additional),
            )?;
        }

        Ok(schema)
    }
}

impl From<TableSnapshot> for Table {
    fn from(table: TableSnapshot) -> Self {
        Table {
            name: table.name,
            kind: TableKind::from(table.kind.as_str()),
            comment: table.comment,
            columns: table.columns.into_iter().map(Column::from).collect(),
        }
    }
}

impl From<ColumnSnapshot> for Column {
    fn from(column: ColumnSnapshot) -> Self {
        Column {
            name: column.name,
            data_type: column.data_type,
            nullable: column.nullable,
            default: column.default,
            comment: column.comment,
        }
    }
}

impl Schema {
    /// Serializable form with name-based relations
    pub fn to_snapshot(&self) -> SchemaSnapshot {
        let names = |table: &Table, positions: &[usize]| -> Vec<String> {
            positions.iter().map(|&c| table.columns[c].name.clone()).collect()
        };

        SchemaSnapshot {
            name: self.name.clone(),
            driver: self.driver.clone(),
            tables: self
                .tables
                .iter()
                .map(|t| TableSnapshot {
                    name: t.name.clone(),
                    kind: t.kind.as_str().to_string(),
                    comment: t.comment.clone(),
                    columns: t
                        .columns
                        .iter()
                        .map(|c| ColumnSnapshot {
                            name: c.name.clone(),
                            data_type: c.data_type.clone(),
                            nullable: c.nullable,
                            default: c.default.clone(),
                            comment: c.comment.clone(),
                        })
                        .collect(),
                })
                .collect(),
            relations: self
                .relations
                .iter()
                .map(|r| {
                    let table = self.table(r.table);
                    let parent_table = self.table(r.parent_table);
                    RelationSnapshot {
                        table: table.name.clone(),
                        columns: names(table, &r.columns),
                        parent_table: parent_table.name.clone(),
                        parent_columns: names(parent_table, &r.parent_columns),
                        def: r.def.clone(),
                        is_additional: r.is_additional,
                    }
                })
                .collect(),
        }
    }
}

/// Load and validate a schema graph from a snapshot file
pub fn load_schema(path: &Path) -> Result<Schema, SnapshotError> {
    Ok(SchemaSnapshot::from_file(path)?.into_schema()?)
}
