//! Error types for chessdesk.
//!
//! Store I/O failures carry the path of the record file involved so the
//! diagnostic log names the file that could not be opened, written or read.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for chessdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// Failed to open a record file.
    #[error("failed to open record store {path}: {source}")]
    StoreOpen {
        /// Path to the record file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to append a line to a record file.
    #[error("failed to write record store {path}: {source}")]
    StoreWrite {
        /// Path to the record file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a line from a record file.
    #[error("failed to read record store {path}: {source}")]
    StoreRead {
        /// Path to the record file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the data directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Terminal Errors ===
    /// The line editor failed to read input.
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// A specialized Result type for chessdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<rustyline::error::ReadlineError> for Error {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl Error {
    /// Check if this error came from reading or writing a record file.
    #[must_use]
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::StoreOpen { .. }
                | Self::StoreWrite { .. }
                | Self::StoreRead { .. }
                | Self::DirectoryCreate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied")
    }

    #[test]
    fn test_store_open_display() {
        let err = Error::StoreOpen {
            path: PathBuf::from("/data/users.txt"),
            source: denied(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/users.txt"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_store_write_display() {
        let err = Error::StoreWrite {
            path: PathBuf::from("lesson_credentials.txt"),
            source: denied(),
        };
        assert!(err.to_string().starts_with("failed to write record store"));
    }

    #[test]
    fn test_store_read_display() {
        let err = Error::StoreRead {
            path: PathBuf::from("users.txt"),
            source: denied(),
        };
        assert!(err.to_string().contains("users.txt"));
    }

    #[test]
    fn test_is_io_failure() {
        let err = Error::StoreOpen {
            path: PathBuf::from("users.txt"),
            source: denied(),
        };
        assert!(err.is_io_failure());
        assert!(Error::DirectoryCreate {
            path: PathBuf::from("/data"),
            source: denied(),
        }
        .is_io_failure());
        assert!(!Error::Prompt("eof".to_string()).is_io_failure());
        assert!(!Error::ConfigValidation {
            message: "x".to_string()
        }
        .is_io_failure());
    }

    #[test]
    fn test_from_figment_error() {
        let err: Error = figment::Error::from("missing field".to_string()).into();
        assert!(matches!(err, Error::ConfigLoad(_)));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_from_readline_error() {
        let err: Error = rustyline::error::ReadlineError::Eof.into();
        assert!(matches!(err, Error::Prompt(_)));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "duplicate file name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: duplicate file name"
        );
    }

    #[test]
    fn test_directory_create_error_display() {
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: denied(),
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
