//! Error types for the hash crate.

use std::io;
use thiserror::Error;

/// Result type for hash operations.
pub type HashResult<T> = Result<T, HashError>;

/// Errors that can occur while building a hasher or hashing input.
#[derive(Error, Debug)]
pub enum HashError {
    /// Key material has the wrong length.
    #[error("invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey {
        /// Required key length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Hex input could not be decoded.
    #[error("invalid hex: {message}")]
    InvalidHex {
        /// Description of the decoding error.
        message: String,
    },

    /// Reading the input stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HashError {
    /// Create an invalid key error.
    pub fn invalid_key(actual: usize, expected: usize) -> Self {
        Self::InvalidKey { expected, actual }
    }

    /// Create an invalid hex error.
    pub fn invalid_hex(message: impl Into<String>) -> Self {
        Self::InvalidHex {
            message: message.into(),
        }
    }
}

impl From<hex::FromHexError> for HashError {
    fn from(error: hex::FromHexError) -> Self {
        Self::invalid_hex(error.to_string())
    }
}
