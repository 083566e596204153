//! Test fixtures and database helpers.
//!
//! Provides throwaway migration directories, SQLite databases and an
//! executor wrapper that counts what the runner sends to the database.

use auxkit_migrate::{ExecutorResult, MigrationStep, SqlExecutor, SqliteExecutor};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of migration files, removed on drop.
pub struct MigrationDir {
    dir: TempDir,
    steps: Vec<MigrationStep>,
}

impl MigrationDir {
    /// Creates an empty migration directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            steps: Vec::new(),
        }
    }

    /// Writes `<version>_<name>.sql` and records it as a step.
    pub fn add(&mut self, version: u16, name: &str, sql: &str) -> &mut Self {
        let path = self.dir.path().join(format!("{version:03}_{name}.sql"));
        fs::write(&path, sql).expect("Failed to write migration file");
        self.steps
            .push(MigrationStep::new(version, name.replace('_', " "), path));
        self
    }

    /// Records a step whose file does not exist.
    pub fn add_missing(&mut self, version: u16, name: &str) -> &mut Self {
        let path = self.dir.path().join(format!("{version:03}_{name}.sql"));
        self.steps.push(MigrationStep::new(version, name, path));
        self
    }

    /// Returns the steps added so far, in insertion order.
    pub fn steps(&self) -> Vec<MigrationStep> {
        self.steps.clone()
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for MigrationDir {
    fn default() -> Self {
        Self::new()
    }
}

/// A SQLite database for tests, optionally backed by a temporary file.
pub struct TestDatabase {
    /// The executor.
    pub db: SqliteExecutor,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
    path: Option<PathBuf>,
}

impl TestDatabase {
    /// Creates a new in-memory database.
    pub fn memory() -> Self {
        Self {
            db: SqliteExecutor::open_in_memory().expect("Failed to open in-memory database"),
            _temp_dir: None,
            path: None,
        }
    }

    /// Creates a new file-based database.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("test.db");
        let db = SqliteExecutor::open(&path).expect("Failed to open file database");

        Self {
            db,
            _temp_dir: Some(temp_dir),
            path: Some(path),
        }
    }

    /// Returns the database path if file-based, None if in-memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Opens a second connection to the same file.
    ///
    /// Panics for in-memory databases.
    pub fn reopen(&self) -> SqliteExecutor {
        let path = self.path().expect("Only file databases can be reopened");
        SqliteExecutor::open(path).expect("Failed to reopen database")
    }

    /// Returns true if `table` exists.
    pub fn table_exists(&mut self, table: &str) -> bool {
        self.db
            .table_exists(table)
            .expect("Failed to query sqlite_master")
    }

    /// Returns the row count of `table`.
    pub fn count_rows(&mut self, table: &str) -> i64 {
        self.db
            .query_for_long(&format!("SELECT COUNT(*) FROM {table}"))
            .expect("Failed to count rows")
            .unwrap_or(0)
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = SqliteExecutor;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl std::ops::DerefMut for TestDatabase {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.db
    }
}

/// Wraps an executor and records every call.
#[derive(Debug)]
pub struct CountingExecutor<E> {
    inner: E,
    /// Every `execute` call, in order.
    pub executed: Vec<String>,
    /// Number of `begin` calls.
    pub begins: usize,
    /// Number of `commit` calls.
    pub commits: usize,
    /// Number of `rollback` calls.
    pub rollbacks: usize,
}

impl<E: SqlExecutor> CountingExecutor<E> {
    /// Wraps `inner`.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            executed: Vec::new(),
            begins: 0,
            commits: 0,
            rollbacks: 0,
        }
    }

    /// Clears the recorded calls.
    pub fn reset(&mut self) {
        self.executed.clear();
        self.begins = 0;
        self.commits = 0;
        self.rollbacks = 0;
    }

    /// Number of executed statements that do not touch `table`.
    pub fn statements_outside(&self, table: &str) -> usize {
        self.executed.iter().filter(|sql| !sql.contains(table)).count()
    }
}

impl<E: SqlExecutor> SqlExecutor for CountingExecutor<E> {
    fn execute(&mut self, sql: &str) -> ExecutorResult<()> {
        self.executed.push(sql.to_string());
        self.inner.execute(sql)
    }

    fn query_for_long(&mut self, sql: &str) -> ExecutorResult<Option<i64>> {
        self.inner.query_for_long(sql)
    }

    fn table_exists(&mut self, table: &str) -> ExecutorResult<bool> {
        self.inner.table_exists(table)
    }

    fn begin(&mut self) -> ExecutorResult<()> {
        self.begins += 1;
        self.inner.begin()
    }

    fn commit(&mut self) -> ExecutorResult<()> {
        self.commits += 1;
        self.inner.commit()
    }

    fn rollback(&mut self) -> ExecutorResult<()> {
        self.rollbacks += 1;
        self.inner.rollback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_dir_writes_files() {
        let mut dir = MigrationDir::new();
        dir.add(1, "create_users", "CREATE TABLE users (id INTEGER);\n");

        let steps = dir.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].description, "create users");
        assert!(steps[0].file.exists());
        assert!(steps[0].file.starts_with(dir.path()));
    }

    #[test]
    fn migration_dir_missing_step() {
        let mut dir = MigrationDir::new();
        dir.add_missing(1, "ghost");
        assert!(!dir.steps()[0].file.exists());
    }

    #[test]
    fn file_database_reopens() {
        let mut test_db = TestDatabase::file();
        test_db.execute("CREATE TABLE t (a INTEGER)").unwrap();
        assert!(test_db.table_exists("t"));

        let mut other = test_db.reopen();
        assert_eq!(other.query_for_long("SELECT COUNT(*) FROM t").unwrap(), Some(0));
    }

    #[test]
    fn counting_executor_records_calls() {
        let mut counting = CountingExecutor::new(SqliteExecutor::open_in_memory().unwrap());
        counting.begin().unwrap();
        counting.execute("CREATE TABLE t (a INTEGER)").unwrap();
        counting.commit().unwrap();

        assert_eq!(counting.executed, vec!["CREATE TABLE t (a INTEGER)"]);
        assert_eq!((counting.begins, counting.commits, counting.rollbacks), (1, 1, 0));

        counting.reset();
        assert!(counting.executed.is_empty());
    }
}
