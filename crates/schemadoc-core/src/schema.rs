//! Schema graph types
//!
//! Tables own their columns, the schema owns its tables and relations.
//! Relations point at their participants by index, and the column
//! back-references are computed by [`RelationIndex`] rather than stored.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::{LookupError, SchemaError};
use crate::index::RelationIndex;

/// Position of a table within [`Schema::tables`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

/// Position of a column: owning table plus position within [`Table::columns`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId {
    pub table: TableId,
    pub column: usize,
}

impl ColumnId {
    pub fn new(table: TableId, column: usize) -> Self {
        Self { table, column }
    }
}

/// Position of a relation within [`Schema::relations`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(pub usize);

/// Kind of table-like object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Ordinary table
    BaseTable,

    /// View
    View,

    /// Anything else the reflector reports, kept verbatim
    Other(String),
}

impl TableKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BaseTable => "BASE TABLE",
            Self::View => "VIEW",
            Self::Other(kind) => kind,
        }
    }
}

impl From<&str> for TableKind {
    fn from(kind: &str) -> Self {
        match kind {
            "BASE TABLE" => Self::BaseTable,
            "VIEW" => Self::View,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Database driver metadata, used only for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
}

/// A column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,

    /// Declared type as reported by the database
    pub data_type: String,

    pub nullable: bool,

    /// Default expression; `None` means the column has no default
    pub default: Option<String>,

    pub comment: String,
}

impl Column {
    /// Create a non-nullable column without default or comment
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: false,
            default: None,
            comment: String::new(),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A table or view with its ordered columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name, unique within the schema
    pub name: String,

    pub kind: TableKind,

    pub comment: String,

    /// Columns in declaration order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create an empty base table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::BaseTable,
            comment: String::new(),
            columns: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Find a column position by exact name
    pub fn find_column_by_name(&self, name: &str) -> Result<usize, LookupError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| LookupError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Resolve a list of column names, failing on the first unknown one
    pub fn resolve_columns(&self, names: &[String]) -> Result<Vec<usize>, LookupError> {
        names.iter().map(|name| self.find_column_by_name(name)).collect()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A foreign-key-like link from child columns to parent columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Table holding the child (referencing) columns
    pub table: TableId,

    /// Child column positions within `table`
    pub columns: Vec<usize>,

    /// Table holding the parent (referenced) columns
    pub parent_table: TableId,

    /// Parent column positions within `parent_table`, paired with `columns`
    pub parent_columns: Vec<usize>,

    /// Human-readable definition
    pub def: String,

    /// Declared by configuration rather than reflected
    pub is_additional: bool,
}

impl Relation {
    pub fn new(
        table: TableId,
        columns: Vec<usize>,
        parent_table: TableId,
        parent_columns: Vec<usize>,
    ) -> Self {
        Self {
            table,
            columns,
            parent_table,
            parent_columns,
            def: String::new(),
            is_additional: false,
        }
    }

    pub fn with_def(mut self, def: impl Into<String>) -> Self {
        self.def = def.into();
        self
    }

    pub fn with_additional(mut self, is_additional: bool) -> Self {
        self.is_additional = is_additional;
        self
    }

    /// Child columns as schema-wide ids
    pub fn child_column_ids(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.columns.iter().map(move |&c| ColumnId::new(self.table, c))
    }

    /// Parent columns as schema-wide ids
    pub fn parent_column_ids(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.parent_columns
            .iter()
            .map(move |&c| ColumnId::new(self.parent_table, c))
    }
}

/// The root aggregate: tables in documentation order plus relations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,

    pub tables: Vec<Table>,

    /// Reflected relations first, additional ones appended
    pub relations: Vec<Relation>,

    pub driver: Option<Driver>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            relations: Vec::new(),
            driver: None,
        }
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Append a table, rejecting duplicate table or column names
    pub fn add_table(&mut self, table: Table) -> Result<TableId, SchemaError> {
        if self.tables.iter().any(|t| t.name == table.name) {
            return Err(SchemaError::DuplicateTable(table.name));
        }

        let mut seen = HashSet::new();
        for column in &table.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        self.tables.push(table);
        Ok(TableId(self.tables.len() - 1))
    }

    /// Append a relation after checking that every participant exists
    pub fn add_relation(&mut self, relation: Relation) -> Result<RelationId, SchemaError> {
        let table = self
            .tables
            .get(relation.table.0)
            .ok_or(SchemaError::UnknownTable(relation.table.0))?;
        let parent_table = self
            .tables
            .get(relation.parent_table.0)
            .ok_or(SchemaError::UnknownTable(relation.parent_table.0))?;

        if relation.columns.len() != relation.parent_columns.len() {
            return Err(SchemaError::ColumnCountMismatch {
                table: table.name.clone(),
                columns: relation.columns.len(),
                parent_columns: relation.parent_columns.len(),
            });
        }

        for (owner, positions) in [
            (table, &relation.columns),
            (parent_table, &relation.parent_columns),
        ] {
            if let Some(&column) = positions.iter().find(|&&c| c >= owner.columns.len()) {
                return Err(SchemaError::UnknownColumn {
                    table: owner.name.clone(),
                    column,
                });
            }
        }

        self.relations.push(relation);
        Ok(RelationId(self.relations.len() - 1))
    }

    /// Find a table by exact name
    pub fn find_table_by_name(&self, name: &str) -> Result<TableId, LookupError> {
        self.tables
            .iter()
            .position(|t| t.name == name)
            .map(TableId)
            .ok_or_else(|| LookupError::TableNotFound {
                table: name.to_string(),
            })
    }

    /// Find a column by table name and column name
    pub fn find_column(&self, table: &str, column: &str) -> Result<ColumnId, LookupError> {
        let table_id = self.find_table_by_name(table)?;
        let column = self.table(table_id).find_column_by_name(column)?;
        Ok(ColumnId::new(table_id, column))
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        &mut self.tables[id.0]
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.tables[id.table.0].columns[id.column]
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        &mut self.tables[id.table.0].columns[id.column]
    }

    pub fn relation(&self, id: RelationId) -> &Relation {
        &self.relations[id.0]
    }

    /// Tables paired with their ids, in documentation order
    pub fn table_ids(&self) -> impl Iterator<Item = (TableId, &Table)> {
        self.tables.iter().enumerate().map(|(i, t)| (TableId(i), t))
    }

    /// Whether the table is the child or parent table of any relation
    pub fn is_related(&self, id: TableId) -> bool {
        self.relations
            .iter()
            .any(|r| r.table == id || r.parent_table == id)
    }

    /// Build the column back-reference view
    pub fn relation_index(&self) -> RelationIndex {
        RelationIndex::build(self)
    }

    /// Sort tables by name and each table's columns by name
    ///
    /// Relation participants are remapped to the new positions; relation
    /// order is left unchanged.
    pub fn sort(&mut self) {
        let mut table_order: Vec<usize> = (0..self.tables.len()).collect();
        table_order.sort_by(|&a, &b| self.tables[a].name.cmp(&self.tables[b].name));

        let mut table_map = vec![0; self.tables.len()];
        for (new, &old) in table_order.iter().enumerate() {
            table_map[old] = new;
        }

        let mut column_maps = Vec::with_capacity(self.tables.len());
        for table in &mut self.tables {
            let mut order: Vec<usize> = (0..table.columns.len()).collect();
            order.sort_by(|&a, &b| table.columns[a].name.cmp(&table.columns[b].name));

            let mut map = vec![0; table.columns.len()];
            for (new, &old) in order.iter().enumerate() {
                map[old] = new;
            }

            let mut columns: Vec<Option<Column>> = table.columns.drain(..).map(Some).collect();
            table.columns = order.iter().filter_map(|&old| columns[old].take()).collect();
            column_maps.push(map);
        }

        for relation in &mut self.relations {
            let child_map = &column_maps[relation.table.0];
            let parent_map = &column_maps[relation.parent_table.0];
            relation.columns = relation.columns.iter().map(|&c| child_map[c]).collect();
            relation.parent_columns = relation.parent_columns.iter().map(|&c| parent_map[c]).collect();
            relation.table = TableId(table_map[relation.table.0]);
            relation.parent_table = TableId(table_map[relation.parent_table.0]);
        }

        let mut tables: Vec<Option<Table>> = self.tables.drain(..).map(Some).collect();
        self.tables = table_order.iter().filter_map(|&old| tables[old].take()).collect();
    }

    /// SHA-256 of the canonical snapshot JSON
    ///
    /// Structurally identical graphs produce identical fingerprints.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(&self.to_snapshot())?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
