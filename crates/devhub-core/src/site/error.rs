//! Site data error handling
//!
//! Typed errors for loading and writing the site data files, with the
//! offending path attached and a hint on how to fix the problem.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::search::SearchIndexError;

/// Errors that can occur while reading or writing site data
#[derive(Error, Debug)]
pub enum SiteDataError {
    /// Data directory is missing
    #[error("Site data directory not found: '{path}'")]
    MissingDirectory { path: PathBuf },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File content is not valid JSON for its shape
    #[error("Invalid data in '{path}': {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Search index could not be read
    #[error("Invalid search index in '{path}': {source}")]
    InvalidIndex {
        path: PathBuf,
        #[source]
        source: SearchIndexError,
    },

    /// Required file not found
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },
}

impl SiteDataError {
    /// Create a read error from an I/O error with path context
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => SiteDataError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => SiteDataError::NotFound { path },
            _ => SiteDataError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            SiteDataError::MissingDirectory { .. } => {
                Some("Set data_dir in the config file or DEVHUB_DATA_DIR to the directory holding resources.json.")
            }
            SiteDataError::PermissionDenied { .. } => {
                Some("Check file and directory permissions.")
            }
            SiteDataError::InvalidIndex { .. } => {
                Some("Rebuild the index with `devhub index build`.")
            }
            SiteDataError::NotFound { .. } => {
                Some("Regenerate the site data or point data_dir at a complete export.")
            }
            _ => None,
        }
    }
}

/// Result type for site data operations
pub type SiteDataResult<T> = Result<T, SiteDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = SiteDataError::from_io(io_err, PathBuf::from("/data/resources.json"));

        assert!(matches!(err, SiteDataError::PermissionDenied { .. }));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = SiteDataError::from_io(io_err, PathBuf::from("/data/resources.json"));

        assert!(matches!(err, SiteDataError::NotFound { .. }));
        assert!(err.to_string().contains("resources.json"));
    }

    #[test]
    fn test_other_io_is_read_error() {
        let io_err = io::Error::new(io::ErrorKind::Other, "device busy");
        let err = SiteDataError::from_io(io_err, PathBuf::from("/data/topics.json"));

        assert!(matches!(err, SiteDataError::ReadError { .. }));
        assert!(err.recovery_suggestion().is_none());
    }

    #[test]
    fn test_invalid_format_display() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = SiteDataError::InvalidFormat {
            path: PathBuf::from("/data/events.json"),
            source,
        };

        let msg = err.to_string();
        assert!(msg.contains("Invalid data"));
        assert!(msg.contains("/data/events.json"));
    }
}
