//! AuxKit CLI
//!
//! Command-line tools for keyed hashing and SQL schema migrations.
//!
//! # Commands
//!
//! - `hash` - Compute a SipHash-2-4 digest of text, a file or a number
//! - `keygen` - Generate a random 128-bit key
//! - `migrate run` - Apply pending migrations to a SQLite database
//! - `migrate status` - Show the control table state

mod commands;

use clap::{Args, Parser, Subcommand};
use commands::hash::{HashInput, OutputFormat};
use commands::migrate::StatusFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// AuxKit command-line tools.
#[derive(Parser)]
#[command(name = "auxkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a keyed SipHash-2-4 digest
    Hash {
        /// 128-bit key as 32 hex characters
        #[arg(short, long)]
        key: String,

        #[command(flatten)]
        input: InputArgs,

        /// Lowercase text before hashing
        #[arg(long, requires = "text")]
        fold_case: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Generate a random 128-bit key
    Keygen,

    /// Manage schema migrations
    #[command(subcommand)]
    Migrate(MigrateCommands),

    /// Show version information
    Version,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Hash this text (UTF-8)
    #[arg(short, long)]
    text: Option<String>,

    /// Hash the contents of this file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Hash this integer as 8 big-endian bytes
    #[arg(short, long, allow_hyphen_values = true)]
    number: Option<i64>,
}

impl InputArgs {
    fn into_input(self) -> Option<HashInput> {
        if let Some(text) = self.text {
            Some(HashInput::Text(text))
        } else if let Some(path) = self.file {
            Some(HashInput::File(path))
        } else {
            self.number.map(HashInput::Number)
        }
    }
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Apply pending migrations
    Run {
        /// SQLite database file (created if missing)
        #[arg(long)]
        db: PathBuf,

        /// Directory of `<version>_<description>.sql` files
        #[arg(long)]
        dir: PathBuf,

        /// Control table name
        #[arg(long, default_value = auxkit_migrate::DEFAULT_TABLE_NAME)]
        table: String,

        /// Dry run - list pending migrations without applying them
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Show migration status
    Status {
        /// SQLite database file
        #[arg(long)]
        db: PathBuf,

        /// Directory of migration files, to list pending steps
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Control table name
        #[arg(long, default_value = auxkit_migrate::DEFAULT_TABLE_NAME)]
        table: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: StatusFormat,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Hash {
            key,
            input,
            fold_case,
            format,
        } => {
            let input = input.into_input().ok_or(commands::CommandError::MissingInput)?;
            commands::hash::run(&key, &input, fold_case, format)?;
        }
        Commands::Keygen => {
            commands::keygen::run();
        }
        Commands::Migrate(MigrateCommands::Run {
            db,
            dir,
            table,
            dry_run,
        }) => {
            commands::migrate::run(&db, &dir, &table, dry_run)?;
        }
        Commands::Migrate(MigrateCommands::Status {
            db,
            dir,
            table,
            format,
        }) => {
            commands::migrate::status(&db, dir.as_deref(), &table, format)?;
        }
        Commands::Version => {
            println!("AuxKit CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("AuxKit Hash v{}", auxkit_hash::VERSION);
            println!("AuxKit Migrate v{}", auxkit_migrate::VERSION);
        }
    }

    Ok(())
}
