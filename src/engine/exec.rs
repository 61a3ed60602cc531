//! engine::exec
//!
//! External tool invocation.
//!
//! # Design
//!
//! Every external program (sox, ffmpeg, shnsplit) is described as an
//! [`ExternalCall`]: a program plus an argument list. Calls are handed to a
//! [`ProcessRunner`]; production code uses [`SystemRunner`], tests substitute
//! a runner that records calls instead of spawning them.
//!
//! [`run_logged`] applies the context: dry-run reports the call without
//! running it, verbose mode prints `calling: ...`, and a non-zero exit
//! becomes an [`ExecError::NonZeroExit`] for the current record.
//!
//! # Example
//!
//! ```
//! use audio_organizer::engine::ExternalCall;
//! use std::path::Path;
//!
//! let call = ExternalCall::new("sox")
//!     .path_arg(Path::new("-live.flac"))
//!     .args(["-n", "spectrogram", "-o"])
//!     .path_arg(Path::new("-live.flac.png"));
//!
//! assert_eq!(call.to_string(), "sox ./-live.flac -n spectrogram -o ./-live.flac.png");
//! ```

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use super::Context;
use crate::core::naming::guard_leading_dash;
use crate::ui::output;

/// Errors from external calls.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("[NonZeroReturn] {command} (exit status: {})", describe_code(.code))]
    NonZeroExit { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "killed by signal".to_string(),
    }
}

/// A program and its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCall {
    program: String,
    args: Vec<String>,
}

impl ExternalCall {
    /// Start a call to `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a file path, guarded so it cannot be read as an option.
    pub fn path_arg(self, path: &Path) -> Self {
        let shown = guard_leading_dash(&path.to_string_lossy());
        self.arg(shown)
    }

    /// Append `flag` only when `enabled`.
    pub fn flag_if(self, enabled: bool, flag: &str) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    /// The program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument list.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ExternalCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display if it contains whitespace or quotes.
fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

/// Something that can run an external call to completion.
pub trait ProcessRunner {
    /// Run `call` in `cwd`, blocking until it exits.
    ///
    /// Returns the exit code, or `None` if the process was killed by a signal.
    fn run(&self, call: &ExternalCall, cwd: &Path) -> io::Result<Option<i32>>;
}

/// Runs calls as child processes that inherit stdio and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, call: &ExternalCall, cwd: &Path) -> io::Result<Option<i32>> {
        let status = Command::new(&call.program)
            .args(&call.args)
            .current_dir(cwd)
            .status()?;
        Ok(status.code())
    }
}

/// What happened to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The program ran and exited with status 0.
    Completed,
    /// Dry-run: the call was reported but not run.
    DryRun,
}

/// Run a call honoring dry-run and verbosity.
///
/// # Errors
///
/// - `ExecError::Spawn` if the program cannot be started
/// - `ExecError::NonZeroExit` if it exits unsuccessfully
pub fn run_logged(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    call: &ExternalCall,
) -> Result<CallOutcome, ExecError> {
    output::verbose(format!("calling: {}", call), ctx.verbosity());

    if ctx.dry_run {
        debug!(command = %call, "dry run, not spawning");
        return Ok(CallOutcome::DryRun);
    }

    let cwd = ctx.work_dir();
    debug!(command = %call, cwd = %cwd.display(), "spawning");
    let code = runner
        .run(call, &cwd)
        .map_err(|source| ExecError::Spawn {
            program: call.program.clone(),
            source,
        })?;
    debug!(command = %call, ?code, "exited");

    match code {
        Some(0) => Ok(CallOutcome::Completed),
        code => Err(ExecError::NonZeroExit {
            command: call.to_string(),
            code,
        }),
    }
}
