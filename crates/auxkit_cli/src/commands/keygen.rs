//! Keygen command implementation.

use auxkit_hash::Key;

/// Prints a fresh random key as hex.
pub fn run() {
    println!("{}", Key::generate().to_hex());
}
