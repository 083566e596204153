//! Migration steps and discovery.

use crate::error::{MigrationError, MigrationResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Version number of a migration step. Versions start at 1 and are dense.
pub type MigrationVersion = u16;

/// One versioned SQL file to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStep {
    /// Version number (unique, sequential from 1).
    pub version: MigrationVersion,
    /// Human-readable description.
    pub description: String,
    /// Path of the SQL file.
    pub file: PathBuf,
}

impl MigrationStep {
    /// Creates a step.
    pub fn new(
        version: MigrationVersion,
        description: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            file: file.into(),
        }
    }

    /// Returns the final path component, as stored in the control table.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.to_string_lossy().into_owned())
    }

    /// Parses `<version>_<description>.sql` into a version and description.
    ///
    /// Underscores in the description become spaces, so
    /// `003_add_user_email.sql` is version 3, "add user email".
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::InvalidFileName`] if the name does not match
    /// or the version is 0 or out of range.
    pub fn parse_file_name(name: &str) -> MigrationResult<(MigrationVersion, String)> {
        let stem = name
            .strip_suffix(".sql")
            .ok_or_else(|| MigrationError::invalid_file_name(name))?;
        let (version, description) = stem
            .split_once('_')
            .ok_or_else(|| MigrationError::invalid_file_name(name))?;

        if version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MigrationError::invalid_file_name(name));
        }
        let version: MigrationVersion = version
            .parse()
            .map_err(|_| MigrationError::invalid_file_name(name))?;
        if version == 0 || description.is_empty() {
            return Err(MigrationError::invalid_file_name(name));
        }

        Ok((version, description.replace('_', " ")))
    }
}

/// Lists the `.sql` files in `dir` as migration steps, sorted by version.
///
/// Files with other extensions are ignored.
///
/// # Errors
///
/// Returns [`MigrationError::DirectoryRead`] if the directory cannot be
/// listed and [`MigrationError::InvalidFileName`] for a badly named `.sql`
/// file.
pub fn discover_steps(dir: &Path) -> MigrationResult<Vec<MigrationStep>> {
    let dir_error = |source| MigrationError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut steps = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_error)? {
        let path = entry.map_err(dir_error)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (version, description) = MigrationStep::parse_file_name(&name)?;
        steps.push(MigrationStep::new(version, description, path));
    }

    steps.sort_by_key(|step| step.version);
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_valid_names() {
        assert_eq!(
            MigrationStep::parse_file_name("001_create_users.sql").unwrap(),
            (1, "create users".to_string())
        );
        assert_eq!(
            MigrationStep::parse_file_name("12_x.sql").unwrap(),
            (12, "x".to_string())
        );
    }

    #[test]
    fn parse_rejects_bad_names() {
        for name in [
            "create_users.sql",
            "001create.sql",
            "001_.sql",
            "000_zero.sql",
            "70000_too_big.sql",
            "-1_negative.sql",
            "001_users.txt",
        ] {
            assert!(
                MigrationStep::parse_file_name(name).is_err(),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn file_name_is_last_component() {
        let step = MigrationStep::new(1, "init", "/srv/app/migrations/001_init.sql");
        assert_eq!(step.file_name(), "001_init.sql");
    }

    #[test]
    fn discover_sorts_and_filters() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("010_ten.sql"), "SELECT 1;").unwrap();
        fs::write(dir.path().join("002_two.sql"), "SELECT 1;").unwrap();
        fs::write(dir.path().join("001_one.sql"), "SELECT 1;").unwrap();
        fs::write(dir.path().join("README.md"), "notes").unwrap();

        let steps = discover_steps(dir.path()).unwrap();
        let versions: Vec<_> = steps.iter().map(|s| s.version).collect();
        assert_eq!(versions, vec![1, 2, 10]);
        assert_eq!(steps[0].description, "one");
    }

    #[test]
    fn discover_rejects_bad_sql_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("init.sql"), "SELECT 1;").unwrap();
        assert!(matches!(
            discover_steps(dir.path()),
            Err(MigrationError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn discover_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover_steps(&missing),
            Err(MigrationError::DirectoryRead { .. })
        ));
    }
}
