//! # AuxKit Testkit
//!
//! Test utilities for AuxKit.
//!
//! This crate provides:
//! - Migration directory and SQLite database fixtures
//! - An executor wrapper that counts statements and transactions
//! - Property-based test generators using proptest
//! - SipHash-2-4 reference vectors
//!
//! ## Usage
//!
//! ```rust
//! use auxkit_migrate::{MigrationConfig, MigrationRunner};
//! use auxkit_testkit::prelude::*;
//!
//! let mut dir = MigrationDir::new();
//! dir.add(1, "create_users", "CREATE TABLE users (id INTEGER);\n");
//!
//! let mut test_db = TestDatabase::memory();
//! let runner = MigrationRunner::new(MigrationConfig::default()).unwrap();
//! runner.apply(&mut test_db.db, &dir.steps()).unwrap();
//! assert!(test_db.table_exists("users"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
