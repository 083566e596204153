//! Migration runner.
//!
//! Applies versioned SQL files to a database exactly once each.
//!
//! ## Design Philosophy
//!
//! Migrations here are:
//! - **Dense**: versions start at 1 and increase by one, no gaps
//! - **Forward-only**: there is no down step (restore a backup instead)
//! - **Transactional**: each step runs in its own transaction
//! - **Fail-fast**: the first error ends the run, nothing is retried
//!
//! ## Control table
//!
//! Every step leaves one row in the control table. The row is inserted with a
//! NULL `created` column when the step starts and gets its completion time on
//! success. A row with NULL `created` found at startup means another runner is
//! active, or a previous one died without rolling back; either way the run
//! stops with [`MigrationError::Locked`] and an operator has to look.
//!
//! ## Usage
//!
//! ```
//! use auxkit_migrate::{MigrationConfig, MigrationRunner, MigrationStep, SqliteExecutor};
//! # let dir = tempfile::tempdir().unwrap();
//! # let file = dir.path().join("001_create_users.sql");
//! # std::fs::write(&file, "CREATE TABLE users (id INTEGER PRIMARY KEY);\n").unwrap();
//!
//! let mut db = SqliteExecutor::open_in_memory().unwrap();
//! let runner = MigrationRunner::new(MigrationConfig::default()).unwrap();
//! let steps = vec![MigrationStep::new(1, "create users", file)];
//!
//! let report = runner.apply(&mut db, &steps).unwrap();
//! assert_eq!(report.applied, vec![1]);
//! assert_eq!(report.final_version, 1);
//! ```

use crate::config::MigrationConfig;
use crate::error::{ExecutorError, MigrationError, MigrationResult};
use crate::executor::SqlExecutor;
use crate::record::{
    completed_count_sql, create_table_sql, current_version_sql, lock_version_sql,
    MigrationRecord,
};
use crate::script::load_statements;
use crate::step::{MigrationStep, MigrationVersion};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

/// Outcome of a successful [`MigrationRunner::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Versions applied by this run, in order.
    pub applied: Vec<MigrationVersion>,
    /// Number of supplied steps that were already applied.
    pub skipped: usize,
    /// Number of migration statements executed.
    pub statements_executed: usize,
    /// Schema version after the run.
    pub final_version: MigrationVersion,
}

/// Snapshot of the control table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    /// Highest completed version, 0 if none.
    pub current_version: MigrationVersion,
    /// Version of an in-flight row, if one exists.
    pub locked_version: Option<MigrationVersion>,
    /// Number of completed rows.
    pub applied_count: u64,
}

impl MigrationStatus {
    /// Returns true if an in-flight row blocks new runs.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked_version.is_some()
    }
}

/// Applies migration steps and tracks them in the control table.
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    config: MigrationConfig,
}

impl MigrationRunner {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::InvalidTableName`] if the configured table
    /// name is not a plain identifier.
    pub fn new(config: MigrationConfig) -> MigrationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the runner configuration.
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    fn table(&self) -> &str {
        &self.config.table_name
    }

    /// Creates the control table if it does not exist.
    pub fn ensure_control_table<E>(&self, executor: &mut E) -> MigrationResult<()>
    where
        E: SqlExecutor + ?Sized,
    {
        executor.execute(&create_table_sql(self.table()))?;
        Ok(())
    }

    /// Returns the highest completed version, 0 if none.
    pub fn current_version<E>(&self, executor: &mut E) -> MigrationResult<MigrationVersion>
    where
        E: SqlExecutor + ?Sized,
    {
        let version = executor.query_for_long(&current_version_sql(self.table()))?;
        version.map_or(Ok(0), to_version)
    }

    /// Returns the version of an in-flight row, if any.
    pub fn locked_version<E>(&self, executor: &mut E) -> MigrationResult<Option<MigrationVersion>>
    where
        E: SqlExecutor + ?Sized,
    {
        let version = executor.query_for_long(&lock_version_sql(self.table()))?;
        version.map(to_version).transpose()
    }

    /// Reads the control table without modifying the database.
    ///
    /// A missing control table reads as version 0 with nothing applied.
    pub fn status<E>(&self, executor: &mut E) -> MigrationResult<MigrationStatus>
    where
        E: SqlExecutor + ?Sized,
    {
        if !executor.table_exists(self.table())? {
            return Ok(MigrationStatus {
                current_version: 0,
                locked_version: None,
                applied_count: 0,
            });
        }
        let applied_count = executor
            .query_for_long(&completed_count_sql(self.table()))?
            .unwrap_or(0);

        Ok(MigrationStatus {
            current_version: self.current_version(executor)?,
            locked_version: self.locked_version(executor)?,
            applied_count: u64::try_from(applied_count).unwrap_or(0),
        })
    }

    /// Returns the steps a call to [`MigrationRunner::apply`] would run.
    ///
    /// Read-only, like [`MigrationRunner::status`].
    pub fn pending<E>(
        &self,
        executor: &mut E,
        steps: &[MigrationStep],
    ) -> MigrationResult<Vec<MigrationStep>>
    where
        E: SqlExecutor + ?Sized,
    {
        let current = self.status(executor)?.current_version;
        Ok(steps
            .iter()
            .filter(|step| step.version > current)
            .cloned()
            .collect())
    }

    /// Applies every step above the current version, in order.
    ///
    /// Steps at or below the current version are skipped. The next step must
    /// be exactly one above the current version. Each step runs in its own
    /// transaction; the first failure rolls that step back and ends the run,
    /// leaving earlier steps committed.
    ///
    /// # Errors
    ///
    /// - [`MigrationError::Locked`] if an in-flight row exists (nothing runs)
    /// - [`MigrationError::NonContiguous`] on a gap, duplicate or reordering
    /// - [`MigrationError::FileRead`] if a step's file cannot be read
    /// - [`MigrationError::StatementExecution`] if a statement fails
    /// - [`MigrationError::Executor`] if control table bookkeeping fails
    pub fn apply<E>(
        &self,
        executor: &mut E,
        steps: &[MigrationStep],
    ) -> MigrationResult<MigrationReport>
    where
        E: SqlExecutor + ?Sized,
    {
        self.ensure_control_table(executor)?;
        let mut current = self.current_version(executor)?;

        if let Some(version) = self.locked_version(executor)? {
            warn!(
                table = self.table(),
                version, "migration row in progress, refusing to run"
            );
            return Err(MigrationError::Locked { version });
        }

        info!(
            table = self.table(),
            current_version = current,
            steps = steps.len(),
            "checking migrations"
        );

        let mut report = MigrationReport {
            final_version: current,
            ..MigrationReport::default()
        };
        let mut previous: Option<MigrationVersion> = None;

        for step in steps {
            if step.version == 0 {
                return Err(MigrationError::non_contiguous(1, 0));
            }
            if let Some(prev) = previous {
                if step.version <= prev {
                    return Err(MigrationError::non_contiguous(
                        prev.saturating_add(1),
                        step.version,
                    ));
                }
            }
            previous = Some(step.version);

            if step.version <= current {
                report.skipped += 1;
                continue;
            }

            let expected = current.saturating_add(1);
            if step.version != expected {
                error!(expected, found = step.version, "migration versions are not contiguous");
                return Err(MigrationError::non_contiguous(expected, step.version));
            }

            report.statements_executed += self.apply_step(executor, step)?;
            report.applied.push(step.version);
            current = step.version;
            report.final_version = current;
        }

        info!(
            applied = report.applied.len(),
            skipped = report.skipped,
            final_version = report.final_version,
            "migrations complete"
        );
        Ok(report)
    }

    /// Runs one step inside a transaction and returns its statement count.
    fn apply_step<E>(&self, executor: &mut E, step: &MigrationStep) -> MigrationResult<usize>
    where
        E: SqlExecutor + ?Sized,
    {
        let statements = load_statements(step)?;
        let mut record = MigrationRecord::in_flight(step);

        info!(
            version = step.version,
            description = %step.description,
            file = %record.file,
            statements = statements.len(),
            "applying migration"
        );

        executor.begin()?;
        if let Err(e) = executor.execute(&record.insert_sql(self.table())) {
            rollback(executor);
            return Err(e.into());
        }

        for statement in &statements {
            debug!(version = step.version, %statement, "executing statement");
            if let Err(source) = executor.execute(statement) {
                error!(
                    version = step.version,
                    %statement,
                    error = %source,
                    "migration statement failed, rolling back"
                );
                self.abandon(executor, &record);
                return Err(MigrationError::StatementExecution {
                    version: step.version,
                    file: record.file.clone(),
                    statement: statement.clone(),
                    source,
                });
            }
        }

        record.complete(unix_now());
        if let Err(e) = executor.execute(&record.complete_sql(self.table())) {
            self.abandon(executor, &record);
            return Err(e.into());
        }
        if let Err(e) = executor.commit() {
            rollback(executor);
            return Err(e.into());
        }

        Ok(statements.len())
    }

    /// Drops the in-flight row and rolls the step back.
    fn abandon<E>(&self, executor: &mut E, record: &MigrationRecord)
    where
        E: SqlExecutor + ?Sized,
    {
        if let Err(e) = executor.execute(&record.delete_sql(self.table())) {
            warn!(version = record.version, error = %e, "failed to delete in-flight migration row");
        }
        rollback(executor);
    }
}

fn rollback<E: SqlExecutor + ?Sized>(executor: &mut E) {
    if let Err(e) = executor.rollback() {
        warn!(error = %e, "rollback failed");
    }
}

fn to_version(value: i64) -> MigrationResult<MigrationVersion> {
    MigrationVersion::try_from(value).map_err(|_| {
        MigrationError::Executor(ExecutorError::driver(format!(
            "control table holds out-of-range version {value}"
        )))
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
