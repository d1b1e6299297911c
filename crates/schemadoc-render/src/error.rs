//! Error types for document output

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error on {path}: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("output already exists: {0} (use --force to overwrite)")]
    OutputExists(PathBuf),

    #[error("no generated documents found in {0}")]
    OutputMissing(PathBuf),

    #[error("table name `{0}` cannot be used as a document file name")]
    InvalidTableName(String),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
