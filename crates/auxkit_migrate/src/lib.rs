//! # AuxKit Migrate
//!
//! Sequential SQL schema migrations for AuxKit.
//!
//! This crate provides:
//! - A runner that applies numbered SQL files exactly once each
//! - A control table tracking applied versions, with an in-flight row as lock
//! - A [`SqlExecutor`] trait so any driver can be plugged in
//! - A SQLite executor (feature `sqlite`, on by default)
//!
//! ## Migration files
//!
//! One file per version, named `<version>_<description>.sql`. Statements end
//! with `;` at the end of a line. See [`split_statements`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod executor;
mod record;
mod runner;
mod script;
#[cfg(feature = "sqlite")]
mod sqlite;
mod step;

pub use config::{MigrationConfig, DEFAULT_TABLE_NAME};
pub use error::{ExecutorError, ExecutorResult, MigrationError, MigrationResult};
pub use executor::SqlExecutor;
pub use record::MigrationRecord;
pub use runner::{MigrationReport, MigrationRunner, MigrationStatus};
pub use script::{load_statements, split_statements};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteExecutor;
pub use step::{discover_steps, MigrationStep, MigrationVersion};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
