//! SQL executor trait definition.

use crate::error::ExecutorResult;

/// The database connection a migration run talks to.
///
/// The runner never opens connections itself. It sends plain SQL text through
/// this trait and brackets each step with `begin`/`commit` or `rollback`.
///
/// # Invariants
///
/// - `execute` runs exactly one statement
/// - `query_for_long` reads the first column of the first row
/// - statements issued between `begin` and `rollback` leave no trace
///
/// # Implementors
///
/// - [`super::SqliteExecutor`] - SQLite through `rusqlite`
pub trait SqlExecutor {
    /// Executes a single statement, discarding any rows.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the statement fails.
    fn execute(&mut self, sql: &str) -> ExecutorResult<()>;

    /// Runs a query and returns its first column as an integer.
    ///
    /// Returns `None` if the query yields no rows or the value is NULL.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the query fails or the value is not an
    /// integer.
    fn query_for_long(&mut self, sql: &str) -> ExecutorResult<Option<i64>>;

    /// Returns true if a table named `table` exists.
    ///
    /// Must not create or change anything.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the catalog cannot be read.
    fn table_exists(&mut self, table: &str) -> ExecutorResult<bool>;

    /// Opens a transaction.
    ///
    /// # Errors
    ///
    /// Returns the driver error if a transaction cannot be started.
    fn begin(&mut self) -> ExecutorResult<()>;

    /// Commits the open transaction.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the commit fails.
    fn commit(&mut self) -> ExecutorResult<()>;

    /// Rolls back the open transaction.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the rollback fails.
    fn rollback(&mut self) -> ExecutorResult<()>;
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for &mut E {
    fn execute(&mut self, sql: &str) -> ExecutorResult<()> {
        (**self).execute(sql)
    }

    fn query_for_long(&mut self, sql: &str) -> ExecutorResult<Option<i64>> {
        (**self).query_for_long(sql)
    }

    fn table_exists(&mut self, table: &str) -> ExecutorResult<bool> {
        (**self).table_exists(table)
    }

    fn begin(&mut self) -> ExecutorResult<()> {
        (**self).begin()
    }

    fn commit(&mut self) -> ExecutorResult<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> ExecutorResult<()> {
        (**self).rollback()
    }
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for Box<E> {
    fn execute(&mut self, sql: &str) -> ExecutorResult<()> {
        (**self).execute(sql)
    }

    fn query_for_long(&mut self, sql: &str) -> ExecutorResult<Option<i64>> {
        (**self).query_for_long(sql)
    }

    fn table_exists(&mut self, table: &str) -> ExecutorResult<bool> {
        (**self).table_exists(table)
    }

    fn begin(&mut self) -> ExecutorResult<()> {
        (**self).begin()
    }

    fn commit(&mut self) -> ExecutorResult<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> ExecutorResult<()> {
        (**self).rollback()
    }
}
