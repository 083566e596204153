//! Reference test vectors for SipHash-2-4.
//!
//! These come from the SipHash reference implementation: key
//! `000102..0f` and input `00 01 02 ..` truncated to 0..15 bytes. Expected
//! values are in digest byte order (little-endian), which is also the hex
//! form AuxKit prints.

use auxkit_hash::{Digest, Key, SipHasher24};
use serde::{Deserialize, Serialize};

/// Key used by the reference vectors.
pub const REFERENCE_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f";

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Key (hex-encoded).
    pub key_hex: String,
    /// Input data (hex-encoded).
    pub input_hex: String,
    /// Expected digest (hex-encoded, little-endian).
    pub expected_hex: String,
}

impl TestVector {
    /// Hashes the vector input and compares it with the expected digest.
    pub fn check(&self) -> Result<(), String> {
        let key = Key::from_hex(&self.key_hex).map_err(|e| format!("{}: {e}", self.id))?;
        let input = hex::decode(&self.input_hex).map_err(|e| format!("{}: {e}", self.id))?;
        let expected =
            Digest::from_hex(&self.expected_hex).map_err(|e| format!("{}: {e}", self.id))?;

        let actual = SipHasher24::new(&key).compute(&input);
        if actual == expected {
            Ok(())
        } else {
            Err(format!(
                "{}: expected {}, got {}",
                self.id, self.expected_hex, actual
            ))
        }
    }
}

const REFERENCE_OUTPUTS: [&str; 16] = [
    "310e0edd47db6f72",
    "fd67dc93c539f874",
    "5a4fa9d909806c0d",
    "2d7efbd796666785",
    "b7877127e09427cf",
    "8da699cd64557618",
    "cee3fe586e46c9cb",
    "37d1018bf50002ab",
    "6224939a79f5f593",
    "b0e4a90bdf82009e",
    "f3b9dd94c5bb5d7a",
    "a7ad6b22462fb3f4",
    "fbe50e86bc8f1e75",
    "903d84c02756ea14",
    "eef27a8e90ca23f7",
    "e545be4961ca29a1",
];

/// SipHash-2-4 reference vectors for inputs of 0 to 15 bytes.
pub fn siphash_vectors() -> Vec<TestVector> {
    REFERENCE_OUTPUTS
        .iter()
        .enumerate()
        .map(|(len, expected)| {
            let input: Vec<u8> = (0..len as u8).collect();
            TestVector {
                id: format!("siphash24_len_{len}"),
                description: format!("reference key, {len}-byte counting input"),
                key_hex: REFERENCE_KEY_HEX.to_string(),
                input_hex: hex::encode(input),
                expected_hex: (*expected).to_string(),
            }
        })
        .collect()
}

/// Exports all vectors as JSON.
pub fn export_vectors_json() -> String {
    serde_json::to_string_pretty(&siphash_vectors()).expect("Vectors serialize")
}
