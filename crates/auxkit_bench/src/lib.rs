//! Shared helpers for the AuxKit benchmarks.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
