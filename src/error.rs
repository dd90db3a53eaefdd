use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by viewer operations. None of them are fatal: the operation
/// that produced one is abandoned and the UI keeps its previous state.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The file or directory is missing, unreadable or not a supported image.
    #[error("cannot open {}: {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// The file was read but its content could not be decoded.
    #[error("cannot decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// The operation needs at least one image.
    #[error("no images to show")]
    EmptySet,

    /// Slideshow delay outside the accepted range.
    #[error("slideshow delay must be between 1 and 10 seconds, got {0}")]
    InvalidDelay(u64),
}

impl ViewerError {
    pub fn invalid_path(path: &Path, reason: impl ToString) -> Self {
        Self::InvalidPath {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(path: &Path, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
