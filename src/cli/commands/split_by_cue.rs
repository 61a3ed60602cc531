//! split-by-cue command - Split a single-piece audio file with shnsplit

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::paths::{change_extension, extension_of};
use crate::engine::{self, Context, ExternalCall, ProcessRunner};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};
use tracing::debug;

/// Output naming handed to shnsplit: `<track>. <title> - <performer>`.
pub const SPLIT_NAME_FORMAT: &str = "%n. %t - %p";

/// Options for [`split_by_cue`].
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Single-piece audio file.
    pub input: PathBuf,
    /// Cue sheet.
    pub cue: PathBuf,
    /// Format to transcode to before splitting.
    pub transcode: Option<String>,
    /// Overwrite existing outputs.
    pub force: bool,
    pub ffmpeg: Option<String>,
    pub shnsplit: Option<String>,
}

/// Transcode `input` if the target format differs; returns the file to split.
fn transcode(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    opts: &SplitOptions,
) -> Result<PathBuf> {
    let Some(format) = opts.transcode.as_deref() else {
        return Ok(opts.input.clone());
    };
    if format.is_empty() || extension_of(&opts.input) == format {
        output::verbose(
            format!("skipping transcoding: '{}'", opts.input.display()),
            ctx.verbosity(),
        );
        return Ok(opts.input.clone());
    }

    let output = change_extension(&opts.input, format);
    let ffmpeg = opts.ffmpeg.clone().unwrap_or_else(|| ctx.config.ffmpeg());
    let call = ExternalCall::new(ffmpeg)
        .flag_if(opts.force, "-y")
        .arg("-i")
        .path_arg(&opts.input)
        .path_arg(&output);
    engine::run_logged(ctx, runner, &call)?;
    Ok(output)
}

fn split(ctx: &Context, runner: &dyn ProcessRunner, opts: &SplitOptions, input: &Path) -> Result<()> {
    let shnsplit = opts
        .shnsplit
        .clone()
        .unwrap_or_else(|| ctx.config.shnsplit());
    let call = ExternalCall::new(shnsplit);
    let call = if opts.force {
        call.args(["-O", "always"])
    } else {
        call
    };
    let call = call
        .args(["-t", SPLIT_NAME_FORMAT, "-f"])
        .path_arg(&opts.cue)
        .arg("-o")
        .arg(extension_of(input))
        .path_arg(input);
    engine::run_logged(ctx, runner, &call)?;
    Ok(())
}

/// Split a single-piece audio file by its cue sheet.
///
/// With a transcode format, the input is first converted with ffmpeg; the
/// temporary transcode is removed after a successful split.
pub fn split_by_cue(ctx: &Context, runner: &dyn ProcessRunner, opts: &SplitOptions) -> Result<()> {
    for (what, path) in [("input", &opts.input), ("cue sheet", &opts.cue)] {
        if !ctx.resolve(path).is_file() {
            bail!("{} '{}' does not exist", what, path.display());
        }
    }

    let split_input = transcode(ctx, runner, opts)?;
    split(ctx, runner, opts, &split_input)?;

    if split_input != opts.input {
        let temp = ctx.resolve(&split_input);
        output::verbose(format!("removing: {}", split_input.display()), ctx.verbosity());
        if !ctx.dry_run {
            debug!(path = %temp.display(), "removing temporary transcode");
            fs::remove_file(&temp)
                .with_context(|| format!("failed to remove '{}'", temp.display()))?;
        }
    }

    output::print(
        if ctx.dry_run {
            format!("[dry-run] split: {}", opts.input.display())
        } else {
            format!("split: {}", opts.input.display())
        },
        ctx.verbosity(),
    );
    Ok(())
}
