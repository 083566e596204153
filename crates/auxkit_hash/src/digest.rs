//! Hash output.

use crate::error::{HashError, HashResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of a digest in bytes.
pub const DIGEST_SIZE: usize = 8;

/// A 64-bit SipHash digest.
///
/// The byte form is little-endian. The hex form is the lowercase hex of the
/// byte form, so it is always 16 characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(u64);

impl Digest {
    /// Wraps a raw 64-bit value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the digest as 8 little-endian bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0.to_le_bytes()
    }

    /// Same as [`Digest::to_bytes`].
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0.to_le_bytes()
    }

    /// Returns the digest as 8 big-endian bytes.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0.to_be_bytes()
    }

    /// Rebuilds a digest from its little-endian byte form.
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Returns the 16-character lowercase hex form.
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses the hex form produced by [`Digest::to_hex`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidHex`] unless the input is exactly 16 hex
    /// characters.
    pub fn from_hex(text: &str) -> HashResult<Self> {
        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(text, &mut bytes)?;
        Ok(Self::from_le_bytes(bytes))
    }
}

impl From<u64> for Digest {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Digest> for u64 {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = HashError;

    fn from_str(s: &str) -> HashResult<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
