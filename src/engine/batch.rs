//! engine::batch
//!
//! Per-record batch driver.
//!
//! Batch subprograms read a list of inputs (one per line) and apply the same
//! action to each. The error policy lives here so every subprogram shares it:
//!
//! - A failing record is reported with its cause and the batch moves on.
//! - A corrupt sidecar (bad header or malformed line) halts the batch.
//! - If any record failed, the batch as a whole returns an error so the
//!   process exits non-zero.

use std::io::{self, Read};

use anyhow::{bail, Context as _, Result};
use tracing::{debug, info, warn};

use super::Context;
use crate::core::metadata::MetadataError;
use crate::ui::output;

/// List argument meaning "read the list from standard input".
pub const STDIN_LIST: &str = "-";

/// The result of one record's action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran; the message describes what was done.
    Done(String),
    /// Nothing to do for this record; the message says why.
    Skipped(String),
}

/// Tally of a finished batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub done: usize,
    pub skipped: usize,
    /// Failed inputs with their error message.
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    /// Total records processed.
    pub fn total(&self) -> usize {
        self.done + self.skipped + self.failed.len()
    }

    /// Convert into an error if any record failed.
    pub fn finish(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            bail!("{} of {} records failed", self.failed.len(), self.total())
        }
    }
}

/// Read a list of inputs from `list` (a file, or `-` for stdin).
///
/// Blank lines are skipped; a trailing `\r` is stripped.
pub fn read_list(ctx: &Context, list: &str) -> Result<Vec<String>> {
    let text = if list == STDIN_LIST {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read list from stdin")?;
        buf
    } else {
        let path = ctx.resolve(list);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read list file '{}'", path.display()))?
    };
    let entries = parse_list(&text);
    debug!(list, count = entries.len(), "read input list");
    Ok(entries)
}

fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the error chain contains a corrupt-sidecar error.
fn is_corruption(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<MetadataError>()
            .is_some_and(MetadataError::is_corruption)
    })
}

/// Run `action` over each item, reporting one line per record.
///
/// # Errors
///
/// Returns an error immediately if a record fails on a corrupt sidecar.
/// Other record failures are collected in the report; call
/// [`BatchReport::finish`] to turn them into a final error.
pub fn run_batch<I, F>(ctx: &Context, action: &str, items: I, mut f: F) -> Result<BatchReport>
where
    I: IntoIterator<Item = String>,
    F: FnMut(&str) -> Result<Outcome>,
{
    let verbosity = ctx.verbosity();
    let mut report = BatchReport::default();

    for item in items {
        debug!(action, item = %item, "processing record");
        match f(&item) {
            Ok(Outcome::Done(message)) => {
                report.done += 1;
                output::print(message, verbosity);
            }
            Ok(Outcome::Skipped(reason)) => {
                report.skipped += 1;
                output::print(format!("skipped: {}: {}", item, reason), verbosity);
            }
            Err(err) if is_corruption(&err) => {
                warn!(action, item = %item, error = %err, "halting batch on corrupt input");
                return Err(err.context(format!("{action}: halted at '{item}'")));
            }
            Err(err) => {
                warn!(action, item = %item, error = %err, "record failed");
                output::error(format!("{}: {:#}", item, err));
                report.failed.push((item, format!("{:#}", err)));
            }
        }
    }

    info!(
        action,
        done = report.done,
        skipped = report.skipped,
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}
