//! cli
//!
//! Command-line interface layer for the audio organizer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and set up logging
//! - Build the value registry once and hand it to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! handlers in [`commands`], which drive records through [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::core::metadata::Registry;
use crate::engine::{self, SystemRunner};
use crate::logging;
use crate::ui::output;
use anyhow::{Context as _, Result};
use tracing::debug;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    logging::init(cli.debug, cli.log_file.as_deref())?;

    let mut ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        config: Config::default(),
    };

    let work_dir = ctx.work_dir();
    ctx.config = Config::load(Some(&work_dir))
        .context("Failed to load configuration")?
        .config;
    debug!(
        work_dir = %work_dir.display(),
        user_config = ?ctx.config.user_config_loaded_from(),
        local_config = ?ctx.config.local_config_loaded_from(),
        "context ready"
    );

    if ctx.dry_run {
        output::warn("dry run: no outputs will be generated", ctx.verbosity());
    }

    let registry = Registry::standard();
    commands::dispatch(cli.command, &ctx, &registry, &SystemRunner)
}
