//! SipHash-2-4 engine and streaming hasher.

use crate::digest::{Digest, DIGEST_SIZE};
use crate::error::HashResult;
use crate::key::Key;
use crate::state::State;
use std::hash::{BuildHasher, Hasher};
use std::io::{self, Read, Write};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A keyed SipHash-2-4 engine.
///
/// The engine only holds the key halves. Every computation builds its own
/// state, so one engine can be shared freely between threads. Like [`Key`],
/// the halves are zeroized when the engine is dropped.
///
/// # Example
///
/// ```
/// use auxkit_hash::{Key, SipHasher24};
///
/// let key = Key::from_bytes(&[0u8; 16]).unwrap();
/// let hasher = SipHasher24::new(&key);
/// let a = hasher.compute(b"hello");
/// let b = hasher.compute(b"hello");
/// assert_eq!(a, b);
/// assert_eq!(a.to_hex().len(), 16);
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SipHasher24 {
    k0: u64,
    k1: u64,
}

impl SipHasher24 {
    /// Creates an engine bound to `key`.
    #[must_use]
    pub fn new(key: &Key) -> Self {
        let (k0, k1) = key.halves();
        Self { k0, k1 }
    }

    /// Creates an engine from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HashError::InvalidKey`] unless `bytes` is exactly 16
    /// bytes long.
    pub fn from_key_bytes(bytes: &[u8]) -> HashResult<Self> {
        Key::from_bytes(bytes).map(|key| Self::new(&key))
    }

    /// Starts a streaming computation.
    #[must_use]
    pub fn stream(&self) -> SipStream {
        SipStream {
            state: State::new(self.k0, self.k1),
        }
    }

    /// Hashes a byte slice.
    #[must_use]
    pub fn compute(&self, bytes: &[u8]) -> Digest {
        let mut state = State::new(self.k0, self.k1);
        state.update(bytes);
        Digest::new(state.finish())
    }

    /// Hashes everything `reader` yields until end of input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HashError::Io`] if reading fails. Nothing is retried.
    pub fn compute_reader<R: Read>(&self, mut reader: R) -> HashResult<Digest> {
        let mut stream = self.stream();
        io::copy(&mut reader, &mut stream)?;
        Ok(stream.finish_digest())
    }

    /// Hashes a string, lowercasing it first when `fold_case` is set.
    #[must_use]
    pub fn hash_str(&self, text: &str, fold_case: bool) -> Digest {
        if fold_case {
            self.compute(text.to_lowercase().as_bytes())
        } else {
            self.compute(text.as_bytes())
        }
    }

    /// Hashes a string and returns the little-endian digest bytes.
    #[must_use]
    pub fn hash_str_bytes(&self, text: &str, fold_case: bool) -> [u8; DIGEST_SIZE] {
        self.hash_str(text, fold_case).to_bytes()
    }

    /// Hashes a string and returns the 16-character hex digest.
    #[must_use]
    pub fn hash_str_hex(&self, text: &str, fold_case: bool) -> String {
        self.hash_str(text, fold_case).to_hex()
    }

    /// Hashes the big-endian byte form of `value`.
    #[must_use]
    pub fn hash_u64(&self, value: u64) -> Digest {
        self.compute(&value.to_be_bytes())
    }

    /// Hashes the big-endian byte form of `value`.
    #[must_use]
    pub fn hash_i64(&self, value: i64) -> Digest {
        self.compute(&value.to_be_bytes())
    }
}

impl std::fmt::Debug for SipHasher24 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SipHasher24")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl BuildHasher for SipHasher24 {
    type Hasher = SipStream;

    fn build_hasher(&self) -> SipStream {
        self.stream()
    }
}

/// An in-progress SipHash-2-4 computation.
///
/// Feed it through [`std::io::Write`] or [`std::hash::Hasher`] and finish with
/// [`SipStream::finish_digest`].
#[derive(Debug, Clone)]
pub struct SipStream {
    state: State,
}

impl SipStream {
    /// Feeds more input.
    pub fn update(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Consumes the stream and returns the digest.
    #[must_use]
    pub fn finish_digest(self) -> Digest {
        Digest::new(self.state.finish())
    }
}

impl Write for SipStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Hasher for SipStream {
    fn finish(&self) -> u64 {
        self.state.clone().finish()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }
}
