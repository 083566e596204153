//! Migration runner configuration.

use crate::error::{MigrationError, MigrationResult};
use std::path::PathBuf;

/// Default name of the control table.
pub const DEFAULT_TABLE_NAME: &str = "schema_version";

/// Configuration for a [`crate::MigrationRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Name of the control table that records applied versions.
    pub table_name: String,

    /// Directory scanned by [`crate::discover_steps`] when steps are not
    /// supplied in code.
    pub migrations_dir: Option<PathBuf>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            migrations_dir: None,
        }
    }
}

impl MigrationConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the control table name.
    #[must_use]
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Sets the migrations directory.
    #[must_use]
    pub fn migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = Some(dir.into());
        self
    }

    /// Checks that the table name is a plain SQL identifier.
    ///
    /// The name is spliced into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*` is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::InvalidTableName`] otherwise.
    pub fn validate(&self) -> MigrationResult<()> {
        let mut chars = self.table_name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(MigrationError::invalid_table_name(&self.table_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MigrationConfig::default();
        assert_eq!(config.table_name, "schema_version");
        assert!(config.migrations_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = MigrationConfig::new()
            .table_name("app_migrations")
            .migrations_dir("db/migrations");

        assert_eq!(config.table_name, "app_migrations");
        assert_eq!(config.migrations_dir, Some(PathBuf::from("db/migrations")));
    }

    #[test]
    fn rejects_unsafe_table_names() {
        for name in ["", "1abc", "drop table x", "a;b", "v\"x", "schéma"] {
            let config = MigrationConfig::new().table_name(name);
            assert!(
                matches!(config.validate(), Err(MigrationError::InvalidTableName { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_identifiers() {
        for name in ["t", "_private", "schema_version_2"] {
            assert!(MigrationConfig::new().table_name(name).validate().is_ok());
        }
    }
}
