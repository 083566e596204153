//! CLI command implementations.

pub mod hash;
pub mod keygen;
pub mod migrate;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the commands themselves, before any library call.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `migrate status` was pointed at a file that does not exist.
    #[error("database file not found: {0:?}")]
    DatabaseNotFound(PathBuf),

    /// The hash command received no input.
    #[error("one of --text, --file or --number is required")]
    MissingInput,
}
