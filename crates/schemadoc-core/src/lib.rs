//! schemadoc core
//!
//! The schema graph, its reflector snapshot format, configuration, and the
//! lint warning/report types. Never rename rule codes - they are part of
//! the public API.

pub mod config;
pub mod error;
pub mod index;
pub mod report;
pub mod schema;
pub mod snapshot;
pub mod warning;

pub use config::{
    AdditionalComment, AdditionalRelation, ColumnCount, Config, ConfigError, ConfigOverrides,
    Environment, FormatConfig, LintConfig, RequireColumnComment, RequireTableComment,
    UnrelatedTable,
};
pub use error::{LookupError, SchemaError, SnapshotError};
pub use index::RelationIndex;
pub use report::{LintReport, LintSummary, ReportVersion};
pub use schema::{Column, ColumnId, Driver, Relation, RelationId, Schema, Table, TableId, TableKind};
pub use snapshot::{load_schema, SchemaSnapshot};
pub use warning::{RuleCode, Target, Warning};
