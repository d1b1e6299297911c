//! schemadoc render
//!
//! Markdown documents for a merged schema graph, plus writing them to
//! disk and diffing them against a previous run.

pub mod diff;
pub mod error;
pub mod markdown;
pub mod output;

pub use diff::{diff_lines, DiffLine, FileDiff};
pub use error::RenderError;
pub use markdown::{render_index, render_table, table_file_name};
pub use output::{
    diff_documents, existing_outputs, render_documents, write_documents, Document, INDEX_FILE,
};
