//! # Error Module
//!
//! Errors raised below the chunk-level API. None of these abort the program:
//! the chunk operations log them and degrade to "not saved" or "not loaded".

use std::{fmt, io};

/// Errors produced by persistence and configuration loading.
#[derive(Debug)]
pub enum VoxelError {
    /// Reading or writing a file failed.
    Io(io::Error),
    /// A configuration file could not be parsed.
    Json(serde_json::Error),
    /// A chunk file does not have the size the fixed layout requires.
    TruncatedChunkFile {
        /// Size the layout requires
        expected: usize,
        /// Size actually found on disk
        actual: usize,
    },
    /// Fresh chunks have nothing worth saving.
    FreshChunk,
}

impl fmt::Display for VoxelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoxelError::Io(err) => write!(f, "i/o error: {err}"),
            VoxelError::Json(err) => write!(f, "invalid configuration: {err}"),
            VoxelError::TruncatedChunkFile { expected, actual } => write!(
                f,
                "chunk file has {actual} bytes, expected {expected}"
            ),
            VoxelError::FreshChunk => write!(f, "refusing to save a fresh chunk"),
        }
    }
}

impl std::error::Error for VoxelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VoxelError::Io(err) => Some(err),
            VoxelError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VoxelError {
    fn from(err: io::Error) -> Self {
        VoxelError::Io(err)
    }
}

impl From<serde_json::Error> for VoxelError {
    fn from(err: serde_json::Error) -> Self {
        VoxelError::Json(err)
    }
}
