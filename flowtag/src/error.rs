//! Error types for the tagging pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowTagError {
    /// An input could not be opened for reading, or the report could not be created
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lookup table is structurally invalid
    #[error("malformed lookup table {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// Read or write failure after the file was opened
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FlowTagError {
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FlowTagError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        FlowTagError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowTagError>;
