//! Augmentation merger
//!
//! Applies relations and comments declared in configuration to a reflected
//! schema graph. Declarations are processed in order and nothing is rolled
//! back: declarations applied before a failing one stay applied, but a
//! failing relation declaration never appends a partial relation.

use schemadoc_core::{
    AdditionalComment, AdditionalRelation, ColumnId, LookupError, Relation, Schema, SchemaError,
};
use tracing::{debug, info};

/// Definition given to declared relations that do not state one
pub const DEFAULT_RELATION_DEF: &str = "Additional Relation";

/// Which end of a declared relation failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationSide {
    /// The referencing table and its columns
    Child,

    /// The referenced table and its columns
    Parent,
}

impl std::fmt::Display for RelationSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Child => write!(f, "child"),
            Self::Parent => write!(f, "parent"),
        }
    }
}

/// Merge error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("relation merge failed: declaration #{index} ({side} side): {source}")]
    Relation {
        index: usize,
        side: RelationSide,
        #[source]
        source: LookupError,
    },

    /// Names resolved, but the graph rejected the relation (unequal column counts)
    #[error("relation merge failed: declaration #{index}: {source}")]
    InvalidRelation {
        index: usize,
        #[source]
        source: SchemaError,
    },

    #[error("comment merge failed: table `{table}`: {source}")]
    Comment {
        table: String,

        /// Column whose comment was being merged; `None` when the table lookup failed
        column: Option<String>,

        #[source]
        source: LookupError,
    },
}

impl MergeError {
    /// The lookup failure behind this error, if any
    pub fn lookup(&self) -> Option<&LookupError> {
        match self {
            Self::Relation { source, .. } | Self::Comment { source, .. } => Some(source),
            Self::InvalidRelation { .. } => None,
        }
    }
}

/// Append every declared relation to the schema, in declaration order
pub fn merge_relations(
    schema: &mut Schema,
    declarations: &[AdditionalRelation],
) -> Result<(), MergeError> {
    for (index, declaration) in declarations.iter().enumerate() {
        let relation = resolve_relation(schema, index, declaration)?;
        let id = schema
            .add_relation(relation)
            .map_err(|source| MergeError::InvalidRelation { index, source })?;

        debug!(
            relation = id.0,
            table = %declaration.table,
            parent_table = %declaration.parent_table,
            "merged additional relation"
        );
    }

    info!(count = declarations.len(), "merged additional relations");
    Ok(())
}

fn resolve_relation(
    schema: &Schema,
    index: usize,
    declaration: &AdditionalRelation,
) -> Result<Relation, MergeError> {
    let failed = |side: RelationSide| move |source: LookupError| MergeError::Relation { index, side, source };

    let table = schema
        .find_table_by_name(&declaration.table)
        .map_err(failed(RelationSide::Child))?;
    let columns = schema
        .table(table)
        .resolve_columns(&declaration.columns)
        .map_err(failed(RelationSide::Child))?;

    let parent_table = schema
        .find_table_by_name(&declaration.parent_table)
        .map_err(failed(RelationSide::Parent))?;
    let parent_columns = schema
        .table(parent_table)
        .resolve_columns(&declaration.parent_columns)
        .map_err(failed(RelationSide::Parent))?;

    let def = if declaration.def.is_empty() {
        DEFAULT_RELATION_DEF
    } else {
        declaration.def.as_str()
    };

    Ok(Relation::new(table, columns, parent_table, parent_columns)
        .with_def(def)
        .with_additional(true))
}

/// Overwrite table and column comments with declared ones
///
/// An empty table comment leaves the existing one alone. A column comment
/// always overwrites, even when empty.
pub fn merge_comments(
    schema: &mut Schema,
    declarations: &[AdditionalComment],
) -> Result<(), MergeError> {
    for declaration in declarations {
        let failed = |column: Option<String>, source: LookupError| MergeError::Comment {
            table: declaration.table.clone(),
            column,
            source,
        };

        let table_id = schema
            .find_table_by_name(&declaration.table)
            .map_err(|source| failed(None, source))?;

        if !declaration.table_comment.is_empty() {
            schema.table_mut(table_id).comment = declaration.table_comment.clone();
        }

        for (column, comment) in &declaration.column_comments {
            let position = schema
                .table(table_id)
                .find_column_by_name(column)
                .map_err(|source| failed(Some(column.clone()), source))?;
            schema.column_mut(ColumnId::new(table_id, position)).comment = comment.clone();
        }

        debug!(
            table = %declaration.table,
            columns = declaration.column_comments.len(),
            "merged additional comments"
        );
    }

    Ok(())
}

/// Merge relations, then comments
pub fn merge_additional_data(
    schema: &mut Schema,
    relations: &[AdditionalRelation],
    comments: &[AdditionalComment],
) -> Result<(), MergeError> {
    merge_relations(schema, relations)?;
    merge_comments(schema, comments)?;
    Ok(())
}
