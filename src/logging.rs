//! logging
//!
//! Diagnostic logging setup.
//!
//! Events go to stderr through `tracing-subscriber`. The filter defaults to
//! `warn`, `--debug` raises it to `debug`, and `AO_LOG` (an `EnvFilter`
//! directive string) overrides both. With `--log-file` every event is also
//! appended to that file without ANSI colors.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "AO_LOG";

/// Build the event filter.
fn build_filter(debug: bool, directive: Option<&str>) -> Result<EnvFilter> {
    let filter_string = match directive {
        Some(custom) => custom.to_string(),
        None if debug => "warn,audio_organizer=debug,ao=debug".to_string(),
        None => "warn".to_string(),
    };
    EnvFilter::try_new(&filter_string)
        .with_context(|| format!("invalid log filter '{}'", filter_string))
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless: later calls keep the first
/// subscriber and record a debug event through it.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let directive = std::env::var(LOG_ENV).ok();
    let filter = build_filter(debug, directive.as_deref())?;

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(debug)
        .with_writer(io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            Some(fmt::layer().with_ansi(false).with_writer(file))
        }
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    if let Err(err) = installed {
        debug!(%err, "keeping the subscriber that is already installed");
    }

    Ok(())
}
