//! # AuxKit Hash
//!
//! Keyed SipHash-2-4 for AuxKit.
//!
//! This crate turns byte sequences into compact 64-bit fingerprints under a
//! secret 128-bit key:
//! - Same key and same input always give the same digest
//! - Different keys give unrelated digests
//! - Output is bit-compatible with the reference SipHash-2-4
//!
//! ## Algorithm
//!
//! - Four 64-bit words initialized from fixed constants and the key halves
//! - Two SipRounds per 8-byte little-endian block
//! - Final block padded with zeros, input length mod 256 in the top byte
//! - Four finalization SipRounds, result is `v0 ^ v1 ^ v2 ^ v3`
//!
//! ## Usage
//!
//! ```
//! use auxkit_hash::{Key, SipHasher24};
//!
//! let key = Key::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
//! let hasher = SipHasher24::new(&key);
//!
//! let digest = hasher.compute(b"");
//! assert_eq!(digest.value(), 0x726f_db47_dd0e_0e31);
//! assert_eq!(digest.to_hex(), "310e0edd47db6f72");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod digest;
mod error;
mod hasher;
mod key;
mod state;

pub use digest::{Digest, DIGEST_SIZE};
pub use error::{HashError, HashResult};
pub use hasher::{SipHasher24, SipStream};
pub use key::{Key, KEY_SIZE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hashes `bytes` under `key` in one call.
#[must_use]
pub fn siphash24(key: &Key, bytes: &[u8]) -> Digest {
    SipHasher24::new(key).compute(bytes)
}
