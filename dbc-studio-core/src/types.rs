//! Error and result types for the DBC core
//!
//! The core knows exactly two failure classes: a DBC file that cannot be
//! loaded, and a destination that cannot be written. Malformed in-memory
//! documents (duplicate names, odd bit positions) are not errors here; they
//! are decoded and serialized as they are.

use std::io;
use std::path::PathBuf;

/// Result type for decode operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Result type for write operations
pub type WriteResult<T> = std::result::Result<T, WriteError>;

/// Errors that can occur while loading a DBC file
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to read DBC file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse DBC file {path:?}: {cause}")]
    Syntax { path: PathBuf, cause: String },
}

impl DecodeError {
    /// Path of the file that failed to decode
    pub fn path(&self) -> &PathBuf {
        match self {
            DecodeError::Read { path, .. } => path,
            DecodeError::Syntax { path, .. } => path,
        }
    }
}

/// Errors that can occur while writing a DBC file
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to write DBC file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WriteError::Io {
            path: path.into(),
            source,
        }
    }
}
