//! Libris console entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the library.
//! - Hand the service to the interactive menu on stdin/stdout.

mod display;
mod menu;
mod seed;

use anyhow::{Context, Result};
use clap::Parser;
use libris_core::{default_log_level, init_logging, open_library, LibraryConfig};
use log::info;
use std::path::{Path, PathBuf};

/// Console inventory manager for a small lending library.
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Args {
    /// Directory holding books.json and loans.json.
    #[arg(long, env = "LIBRIS_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Directory for rotating log files [default: <data-dir>/logs].
    #[arg(long, env = "LIBRIS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error [default: debug in debug builds, info otherwise].
    #[arg(long, env = "LIBRIS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Do not add sample books to an empty catalogue.
    #[arg(long)]
    no_seed: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = absolute(&args.data_dir)?;
    let log_dir = match &args.log_dir {
        Some(dir) => absolute(dir)?,
        None => data_dir.join("logs"),
    };
    let log_level = args
        .log_level
        .unwrap_or_else(|| default_log_level().as_str().to_string());
    init_logging(&log_level, &log_dir).context("failed to initialize logging")?;

    let config = LibraryConfig::new(data_dir);
    let mut service = open_library(&config)
        .with_context(|| format!("failed to open library at `{}`", config.data_dir().display()))?;

    if !args.no_seed {
        seed::seed_if_fresh(&mut service).context("failed to add sample books")?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::Menu::new(&mut service, stdin.lock(), stdout.lock()).run()?;

    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    Ok(cwd.join(path))
}
