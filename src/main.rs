//! # FSAL attachment CLI (`fsal`)
//!
//! Inspects and removes attachment files the same way the document tree
//! does.
//!
//! ## Usage
//!
//! ```bash
//! fsal --config ./config/fsal.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fsal inspect <path>...` | Print attachment metadata for files |
//! | `fsal remove <path>` | Move a file to the trash and detach it |
//!
//! ## Examples
//!
//! ```bash
//! # Human-readable summary
//! fsal inspect ~/notes/photo.png
//!
//! # Metadata as JSON
//! fsal inspect ~/notes/*.png --json
//!
//! # Trash a file, hard-deleting it if the trash is unavailable
//! fsal remove ~/notes/photo.png --delete-on-fail
//! ```

use clap::{Parser, Subcommand};
use fsal_attachments::{attachment, config, remove};
use std::path::PathBuf;

/// FSAL attachment CLI — inspect and remove non-document files.
#[derive(Parser)]
#[command(
    name = "fsal",
    about = "Inspect and remove attachment files",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Only `remove` requires it; `inspect` runs without one.
    #[arg(long, global = true, default_value = "./config/fsal.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print attachment metadata for one or more files.
    Inspect {
        /// Files to inspect.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print metadata as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Move a file to the trash.
    ///
    /// Uses the trash directory from the config file. Without
    /// `--delete-on-fail` (or `removal.delete_on_fail = true`), a file that
    /// cannot be trashed is left in place.
    Remove {
        /// File to remove.
        path: PathBuf,

        /// Hard-delete the file if it cannot be moved to the trash.
        #[arg(long)]
        delete_on_fail: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fsal=info,fsal_attachments=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { paths, json } => {
            attachment::run_inspect(&paths, json).await?;
        }
        Commands::Remove {
            path,
            delete_on_fail,
        } => {
            let cfg = config::load_config(&cli.config)?;
            remove::run_remove(&cfg, &path, delete_on_fail).await?;
        }
    }

    Ok(())
}
