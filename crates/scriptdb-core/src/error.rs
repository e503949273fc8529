use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across scriptdb crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument is blank or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A directory that must already exist is missing.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// The configuration file is missing, unreadable or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Database error or adapter failure.
    #[error("database error: {0}")]
    Db(String),
    /// Filesystem failure at a known path.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A statement inside a script failed (1-based index).
    #[error("statement {index} failed: {source}")]
    Statement {
        index: usize,
        #[source]
        source: Box<Error>,
    },
    /// A script file failed while being applied.
    #[error("script {} failed: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
    /// A requested operation is not yet supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl Error {
    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the caller's arguments or configuration,
    /// as opposed to failures while talking to the database or filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::DirectoryNotFound(_) | Error::Config(_)
        )
    }
}

/// Convenience alias for results returned by scriptdb crates.
pub type Result<T> = std::result::Result<T, Error>;
