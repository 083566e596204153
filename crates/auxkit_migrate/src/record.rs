//! Control table rows and the SQL that maintains them.

use crate::step::{MigrationStep, MigrationVersion};

/// A row of the control table.
///
/// `created` is the completion time in Unix seconds. A row whose `created` is
/// `None` marks a step in flight and doubles as the advisory lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    /// Step version (primary key).
    pub version: MigrationVersion,
    /// Step description.
    pub description: String,
    /// Migration file name.
    pub file: String,
    /// Completion time, `None` while the step is running.
    pub created: Option<u64>,
}

impl MigrationRecord {
    /// Creates the in-flight row for a step.
    #[must_use]
    pub fn in_flight(step: &MigrationStep) -> Self {
        Self {
            version: step.version,
            description: step.description.clone(),
            file: step.file_name(),
            created: None,
        }
    }

    /// Returns true once the step has completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.created.is_some()
    }

    /// Returns true while the row acts as the lock.
    #[must_use]
    pub fn is_lock(&self) -> bool {
        self.created.is_none()
    }

    /// Marks the row complete at `created` (Unix seconds).
    pub fn complete(&mut self, created: u64) {
        self.created = Some(created);
    }

    /// `INSERT` for this row.
    #[must_use]
    pub fn insert_sql(&self, table: &str) -> String {
        format!(
            "INSERT INTO {table} (version, description, file, created) VALUES ({}, {}, {}, {})",
            self.version,
            quote(&self.description),
            quote(&self.file),
            self.created
                .map_or_else(|| "NULL".to_string(), |created| created.to_string()),
        )
    }

    /// `UPDATE` that stores this row's completion time.
    #[must_use]
    pub fn complete_sql(&self, table: &str) -> String {
        let created = self
            .created
            .map_or_else(|| "NULL".to_string(), |created| created.to_string());
        format!(
            "UPDATE {table} SET created = {created} WHERE version = {}",
            self.version
        )
    }

    /// `DELETE` for this row.
    #[must_use]
    pub fn delete_sql(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE version = {}", self.version)
    }
}

/// `CREATE TABLE IF NOT EXISTS` for the control table.
#[must_use]
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
         version SMALLINT NOT NULL PRIMARY KEY, \
         description VARCHAR(200) NOT NULL, \
         file VARCHAR(200) NOT NULL, \
         created BIGINT NULL)"
    )
}

/// Query for the highest completed version.
#[must_use]
pub fn current_version_sql(table: &str) -> String {
    format!("SELECT MAX(version) FROM {table} WHERE created IS NOT NULL")
}

/// Query for the version held by an in-flight row, if any.
#[must_use]
pub fn lock_version_sql(table: &str) -> String {
    format!("SELECT MIN(version) FROM {table} WHERE created IS NULL")
}

/// Query for the number of completed rows.
#[must_use]
pub fn completed_count_sql(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table} WHERE created IS NOT NULL")
}

/// Quotes a string as an SQL literal.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
