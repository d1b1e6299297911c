//! Writing rendered documents and comparing them with what is on disk

use crate::diff::FileDiff;
use crate::error::RenderError;
use crate::markdown::{render_index, render_table, table_file_name};
use schemadoc_core::{FormatConfig, Schema};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the schema overview document
pub const INDEX_FILE: &str = "README.md";

/// A rendered document, path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

/// Render README.md followed by one document per table, in table order
///
/// Fails when a table name cannot be used as a file name next to the
/// index document.
pub fn render_documents(
    schema: &Schema,
    format: &FormatConfig,
) -> Result<Vec<Document>, RenderError> {
    let index = schema.relation_index();

    let mut documents = vec![Document {
        path: PathBuf::from(INDEX_FILE),
        content: render_index(schema, format),
    }];
    for (id, table) in schema.table_ids() {
        documents.push(Document {
            path: table_document_path(&table.name)?,
            content: render_table(schema, id, &index, format),
        });
    }

    Ok(documents)
}

/// File of a table's document; it must stay inside the output directory
/// and must not collide with the index document
fn table_document_path(table: &str) -> Result<PathBuf, RenderError> {
    let file_name = table_file_name(table);
    if table.contains(['/', '\\']) || file_name.eq_ignore_ascii_case(INDEX_FILE) {
        return Err(RenderError::InvalidTableName(table.to_string()));
    }
    Ok(PathBuf::from(file_name))
}

/// Documents that already exist under `dir`
pub fn existing_outputs(documents: &[Document], dir: &Path) -> Vec<PathBuf> {
    documents
        .iter()
        .map(|d| dir.join(&d.path))
        .filter(|p| p.exists())
        .collect()
}

/// Write every document into `dir`
///
/// Refuses to touch anything when a target file already exists, unless
/// `force` is set. Returns the written paths.
pub fn write_documents(
    schema: &Schema,
    dir: &Path,
    force: bool,
    format: &FormatConfig,
) -> Result<Vec<PathBuf>, RenderError> {
    let documents = render_documents(schema, format)?;

    if !force {
        if let Some(existing) = existing_outputs(&documents, dir).into_iter().next() {
            return Err(RenderError::OutputExists(existing));
        }
    }

    fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))?;

    let mut written = Vec::new();
    for document in documents {
        let path = dir.join(&document.path);
        fs::write(&path, &document.content).map_err(|e| RenderError::io(&path, e))?;
        info!(path = %path.display(), "wrote document");
        written.push(path);
    }

    Ok(written)
}

/// Compare a fresh rendering with the documents in `dir`
///
/// Only documents with at least one changed line are returned; line
/// endings count as content. A document missing
/// on disk diffs against empty content.
pub fn diff_documents(
    schema: &Schema,
    dir: &Path,
    format: &FormatConfig,
) -> Result<Vec<FileDiff>, RenderError> {
    let documents = render_documents(schema, format)?;
    if existing_outputs(&documents, dir).is_empty() {
        return Err(RenderError::OutputMissing(dir.to_path_buf()));
    }

    let mut diffs = Vec::new();
    for document in documents {
        let path = dir.join(&document.path);
        let current = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(RenderError::io(&path, e)),
        };

        let diff = FileDiff::new(path, &current, &document.content);
        if !diff.is_changed() {
            continue;
        }

        debug!(path = %diff.path.display(), "document differs");
        diffs.push(diff);
    }

    Ok(diffs)
}
