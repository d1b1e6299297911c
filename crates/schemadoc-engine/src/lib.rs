//! schemadoc engine
//!
//! This crate implements the logic that runs on a loaded schema graph:
//! - Augmentation merger (declared relations and comments)
//! - Lint rule engine

pub mod lint;
pub mod merge;

pub use lint::{lint, LintEngine, Rule};
pub use merge::{
    merge_additional_data, merge_comments, merge_relations, MergeError, RelationSide,
    DEFAULT_RELATION_DEF,
};
