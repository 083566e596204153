//! SQLite executor.

use crate::error::ExecutorResult;
use crate::executor::SqlExecutor;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// A [`SqlExecutor`] over a `rusqlite` connection.
///
/// Statements go through `execute_batch`, so any statement kind is accepted,
/// including ones that return rows. Transactions are driven with plain
/// `BEGIN`/`COMMIT`/`ROLLBACK`.
///
/// # Example
///
/// ```
/// use auxkit_migrate::{SqlExecutor, SqliteExecutor};
///
/// let mut db = SqliteExecutor::open_in_memory().unwrap();
/// db.execute("CREATE TABLE t (n INTEGER)").unwrap();
/// db.execute("INSERT INTO t VALUES (41)").unwrap();
/// assert_eq!(db.query_for_long("SELECT n + 1 FROM t").unwrap(), Some(42));
/// ```
#[derive(Debug)]
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Opens or creates a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> ExecutorResult<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite fails to initialize.
    pub fn open_in_memory() -> ExecutorResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Wraps an existing connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Unwraps the underlying connection.
    #[must_use]
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl SqlExecutor for SqliteExecutor {
    fn execute(&mut self, sql: &str) -> ExecutorResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn query_for_long(&mut self, sql: &str) -> ExecutorResult<Option<i64>> {
        let value = self
            .conn
            .query_row(sql, [], |row| row.get::<_, Option<i64>>(0))
            .optional()?;
        Ok(value.flatten())
    }

    fn table_exists(&mut self, table: &str) -> ExecutorResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn begin(&mut self) -> ExecutorResult<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> ExecutorResult<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> ExecutorResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}
