//! engine
//!
//! Runs subprogram work: the per-record batch loop and external tool calls.
//!
//! # Architecture
//!
//! Commands in [`crate::cli::commands`] describe *what* to do for one record.
//! The engine decides *how* it is driven:
//!
//! 1. **List**: read the input list ([`batch::read_list`])
//! 2. **Batch**: run the per-record closure with the error policy ([`batch::run_batch`])
//! 3. **Exec**: hand argument lists to external tools ([`exec::run_logged`])
//!
//! # Invariants
//!
//! - Dry-run never spawns a process and never touches the filesystem
//! - One record's failure does not stop the next, except for corrupt sidecars
//! - External tools are always invoked with an argument list, never a shell

pub mod batch;
pub mod exec;

pub use batch::{read_list, run_batch, BatchReport, Outcome};
pub use exec::{run_logged, CallOutcome, ExecError, ExternalCall, ProcessRunner, SystemRunner};

use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::paths::sidecar_path;
use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags and configuration.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Report each step, not just one line per record.
    pub verbose: bool,
    /// Validate and report only; no writes, no subprocesses.
    pub dry_run: bool,
    /// Loaded configuration.
    pub config: Config,
}

impl Context {
    /// Directory relative paths are resolved against.
    pub fn work_dir(&self) -> PathBuf {
        match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Resolve a path from the command line or a list file.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir().join(path)
        }
    }

    /// Sidecar path for a media file, using the configured extension.
    pub fn sidecar_for(&self, media: impl AsRef<Path>) -> PathBuf {
        sidecar_path(media.as_ref(), &self.config.sidecar_extension())
    }

    /// Output verbosity. Dry-run implies verbose.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose || self.dry_run)
    }
}
