//! Error types for migrations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for executor calls.
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Result type for migration operations.
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Errors reported by a [`crate::SqlExecutor`].
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// SQLite driver error.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Error from any other driver.
    #[error("driver error: {message}")]
    Driver {
        /// Driver supplied description.
        message: String,
    },
}

impl ExecutorError {
    /// Creates a driver error.
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

/// Errors that can occur while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A control row with no completion time exists.
    #[error(
        "migration locked: version {version} is marked in progress; \
         another runner is active or a previous run crashed mid-step"
    )]
    Locked {
        /// Version of the in-progress row.
        version: u16,
    },

    /// Steps are not dense, ascending and starting at 1.
    #[error("non-contiguous migration: expected version {expected}, found {found}")]
    NonContiguous {
        /// The version that should have come next.
        expected: u16,
        /// The version that was supplied.
        found: u16,
    },

    /// A statement failed; the step was rolled back.
    #[error("migration {version} ({file}) failed on statement `{statement}`: {source}")]
    StatementExecution {
        /// Version of the failing step.
        version: u16,
        /// Migration file name.
        file: String,
        /// Text of the statement that failed.
        statement: String,
        /// Underlying driver error.
        #[source]
        source: ExecutorError,
    },

    /// The SQL file of a step could not be read.
    #[error("migration {version}: cannot read {path:?}: {source}")]
    FileRead {
        /// Version of the step.
        version: u16,
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The migrations directory could not be listed.
    #[error("cannot read migrations directory {path:?}: {source}")]
    DirectoryRead {
        /// Directory that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A migration file name does not follow `<version>_<description>.sql`.
    #[error("invalid migration file name: {name}")]
    InvalidFileName {
        /// Offending file name.
        name: String,
    },

    /// The control table name is not a plain identifier.
    #[error("invalid control table name: {name:?}")]
    InvalidTableName {
        /// Offending table name.
        name: String,
    },

    /// Control table bookkeeping failed.
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),
}

impl MigrationError {
    /// Creates a non-contiguous version error.
    pub fn non_contiguous(expected: u16, found: u16) -> Self {
        Self::NonContiguous { expected, found }
    }

    /// Creates an invalid file name error.
    pub fn invalid_file_name(name: impl Into<String>) -> Self {
        Self::InvalidFileName { name: name.into() }
    }

    /// Creates an invalid table name error.
    pub fn invalid_table_name(name: impl Into<String>) -> Self {
        Self::InvalidTableName { name: name.into() }
    }
}
