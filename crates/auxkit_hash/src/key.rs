//! Hash keys.

use crate::error::{HashError, HashResult};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a SipHash key in bytes.
pub const KEY_SIZE: usize = 16;

/// A 128-bit SipHash key.
///
/// The key selects which member of the pseudo-random function family is used,
/// so two hashers built from different keys produce unrelated digests for the
/// same input. The key is zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    /// Generates a new random key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidKey`] if the slice is not exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> HashResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(HashError::invalid_key(bytes.len(), KEY_SIZE));
        }

        let mut key_bytes = [0u8; KEY_SIZE];
        key_bytes.copy_from_slice(bytes);
        Ok(Self { bytes: key_bytes })
    }

    /// Parses a key from 32 hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidHex`] for malformed hex and
    /// [`HashError::InvalidKey`] if the decoded length is not 16 bytes.
    pub fn from_hex(text: &str) -> HashResult<Self> {
        let mut decoded = hex::decode(text.trim())?;
        let key = Self::from_bytes(&decoded);
        decoded.zeroize();
        key
    }

    /// Returns the key as a byte array.
    ///
    /// # Security
    ///
    /// Don't log or persist the result.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Returns the key as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Splits the key into its two little-endian 64-bit halves `(k0, k1)`.
    #[must_use]
    pub fn halves(&self) -> (u64, u64) {
        let mut k0 = [0u8; 8];
        let mut k1 = [0u8; 8];
        k0.copy_from_slice(&self.bytes[..8]);
        k1.copy_from_slice(&self.bytes[8..]);
        (u64::from_le_bytes(k0), u64::from_le_bytes(k1))
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = HashError;

    fn try_from(bytes: &[u8]) -> HashResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_accepts_16_bytes() {
        let key = Key::from_bytes(&[7u8; 16]).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; 16]);
    }

    #[test]
    fn from_bytes_rejects_other_lengths() {
        for len in [0usize, 1, 8, 15, 17, 32] {
            let err = Key::from_bytes(&vec![0u8; len]).unwrap_err();
            assert!(matches!(
                err,
                HashError::InvalidKey {
                    expected: 16,
                    actual
                } if actual == len
            ));
        }
    }

    #[test]
    fn halves_are_little_endian() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let key = Key::from_bytes(&bytes).unwrap();
        let (k0, k1) = key.halves();
        assert_eq!(k0, 0x0706_0504_0302_0100);
        assert_eq!(k1, 0x0f0e_0d0c_0b0a_0908);
    }

    #[test]
    fn hex_round_trip() {
        let key = Key::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
        assert_eq!(key.to_hex(), "000102030405060708090a0b0c0d0e0f");
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            Key::from_hex("zz0102030405060708090a0b0c0d0e0f"),
            Err(HashError::InvalidHex { .. })
        ));
        assert!(matches!(
            Key::from_hex("0001"),
            Err(HashError::InvalidKey { actual: 2, .. })
        ));
    }

    #[test]
    fn generated_keys_differ() {
        assert_ne!(Key::generate(), Key::generate());
    }

    #[test]
    fn debug_is_redacted() {
        let key = Key::from_bytes(&[0xAB; 16]).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("ab"));
    }
}
