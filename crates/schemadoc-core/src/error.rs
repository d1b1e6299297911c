//! Error types shared by the schema graph and its loaders

/// A named table or column does not exist
///
/// Lookups are exact and case-sensitive, so the offending name is carried
/// verbatim to let an operator fix their configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("table `{table}` not found")]
    TableNotFound { table: String },

    #[error("column `{table}.{column}` not found")]
    ColumnNotFound { table: String, column: String },
}

/// The graph would violate one of its structural invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate table name: {0}")]
    DuplicateTable(String),

    #[error("duplicate column name: {table}.{column}")]
    DuplicateColumn { table: String, column: String },

    #[error("relation on `{table}` pairs {columns} columns with {parent_columns} parent columns")]
    ColumnCountMismatch {
        table: String,
        columns: usize,
        parent_columns: usize,
    },

    #[error("relation references unknown table index {0}")]
    UnknownTable(usize),

    #[error("relation references unknown column index {column} of `{table}`")]
    UnknownColumn { table: String, column: usize },

    #[error("relation #{index} is invalid: {source}")]
    Relation {
        index: usize,
        #[source]
        source: LookupError,
    },
}

/// Failure to load a reflected schema snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid schema: {0}")]
    Invalid(#[from] SchemaError),
}
