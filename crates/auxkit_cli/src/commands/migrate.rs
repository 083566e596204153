//! Migration commands.

use super::CommandError;
use auxkit_migrate::{
    discover_steps, MigrationConfig, MigrationRunner, MigrationStatus, MigrationStep,
    SqliteExecutor,
};
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Output format of `migrate status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFormat {
    /// Human-readable text.
    Text,
    /// JSON object.
    Json,
}

#[derive(Serialize)]
struct StatusReport {
    #[serde(flatten)]
    status: MigrationStatus,
    pending: Vec<PendingStep>,
}

#[derive(Serialize)]
struct PendingStep {
    version: u16,
    description: String,
    file: String,
}

impl From<&MigrationStep> for PendingStep {
    fn from(step: &MigrationStep) -> Self {
        Self {
            version: step.version,
            description: step.description.clone(),
            file: step.file_name(),
        }
    }
}

fn runner(table: &str) -> Result<MigrationRunner, Box<dyn std::error::Error>> {
    Ok(MigrationRunner::new(MigrationConfig::new().table_name(table))?)
}

/// Applies pending migrations from `dir` to the database at `db_path`.
pub fn run(
    db_path: &Path,
    dir: &Path,
    table: &str,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running migrations for {:?} from {:?}", db_path, dir);

    let runner = runner(table)?;
    let steps = discover_steps(dir)?;

    if dry_run {
        let pending = if db_path.exists() {
            runner.pending(&mut SqliteExecutor::open(db_path)?, &steps)?
        } else {
            steps
        };
        if pending.is_empty() {
            println!("✓ No pending migrations to run.");
        } else {
            println!("Dry run - would apply {} migration(s):", pending.len());
            for step in &pending {
                println!("  v{}: {} ({})", step.version, step.description, step.file_name());
            }
        }
        return Ok(());
    }

    let mut db = SqliteExecutor::open(db_path)?;
    let report = runner.apply(&mut db, &steps)?;

    if report.applied.is_empty() {
        println!("✓ No pending migrations to run.");
    } else {
        println!(
            "✓ Successfully applied {} migration(s), {} statement(s)",
            report.applied.len(),
            report.statements_executed
        );
    }
    println!("  Final version: {}", report.final_version);

    Ok(())
}

/// Prints the control table state, plus pending steps when `dir` is given.
pub fn status(
    db_path: &Path,
    dir: Option<&Path>,
    table: &str,
    format: StatusFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Checking migration status for {:?}", db_path);

    if !db_path.exists() {
        return Err(CommandError::DatabaseNotFound(db_path.to_path_buf()).into());
    }

    let runner = runner(table)?;
    let mut db = SqliteExecutor::open(db_path)?;
    let status = runner.status(&mut db)?;
    let pending = match dir {
        Some(dir) => runner.pending(&mut db, &discover_steps(dir)?)?,
        None => Vec::new(),
    };

    let report = StatusReport {
        status,
        pending: pending.iter().map(PendingStep::from).collect(),
    };

    match format {
        StatusFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        StatusFormat::Text => print_status(&report, dir.is_some()),
    }

    Ok(())
}

fn print_status(report: &StatusReport, listed_pending: bool) {
    println!("Migration Status");
    println!("================");
    println!("  Current version: {}", report.status.current_version);
    println!("  Applied migrations: {}", report.status.applied_count);

    if let Some(version) = report.status.locked_version {
        println!("\n⚠ Migration v{version} is in progress or was interrupted.");
        println!("  New runs are refused until its control row is removed.");
    }

    if listed_pending {
        if report.pending.is_empty() {
            println!("\n✓ Up to date.");
        } else {
            println!("\nPending Migrations:");
            for step in &report.pending {
                println!("  v{}: {} ({})", step.version, step.description, step.file);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auxkit_migrate::SqlExecutor;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn run_then_status() {
        let dir = tempdir().unwrap();
        let migrations = dir.path().join("migrations");
        fs::create_dir(&migrations).unwrap();
        fs::write(migrations.join("001_create_a.sql"), "CREATE TABLE a (x INTEGER);\n").unwrap();
        let db_path = dir.path().join("app.db");

        run(&db_path, &migrations, "schema_version", true).unwrap();
        assert!(!db_path.exists());

        run(&db_path, &migrations, "schema_version", false).unwrap();
        status(&db_path, Some(&migrations), "schema_version", StatusFormat::Json).unwrap();

        let runner = runner("schema_version").unwrap();
        let mut db = SqliteExecutor::open(&db_path).unwrap();
        assert_eq!(runner.status(&mut db).unwrap().current_version, 1);
    }

    #[test]
    fn status_does_not_create_control_table() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("app.db");
        SqliteExecutor::open(&db_path)
            .unwrap()
            .execute("CREATE TABLE other (x INTEGER)")
            .unwrap();

        status(&db_path, None, "schema_version", StatusFormat::Text).unwrap();
        run(&db_path, dir.path(), "schema_version", true).unwrap();

        let mut db = SqliteExecutor::open(&db_path).unwrap();
        assert!(!db.table_exists("schema_version").unwrap());
    }

    #[test]
    fn status_requires_existing_database() {
        let dir = tempdir().unwrap();
        let err = status(&dir.path().join("missing.db"), None, "schema_version", StatusFormat::Text)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn invalid_table_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(run(&dir.path().join("app.db"), dir.path(), "bad table", false).is_err());
    }
}
