//! remap-metadata command - Write sidecar tags back into audio files
//!
//! The output lands next to the input, named by the rename template (or the
//! input's own stem) plus the output extension. Reserved characters are
//! replaced. When the output would be the input itself, the configured
//! conflict prefix is added so the source is never overwritten in place.

use std::path::{Path, PathBuf};

use crate::core::metadata::{MetadataError, Record, Registry};
use crate::core::naming::safe_component;
use crate::core::paths::{append_extension, extension_of, same_file, stem_of, with_name_prefix};
use crate::engine::{self, Context, ExternalCall, ProcessRunner};
use crate::ui::output;
use anyhow::Result;

use super::{copy_file, done};

/// How the output file is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapMode {
    /// ffmpeg stream copy with the sidecar's tags.
    Remap,
    /// Plain file copy under the new name; contents untouched.
    CopyOnly,
    /// ffmpeg transcode to the given format with the sidecar's tags.
    Transcode(String),
}

/// Options for [`remap_metadata`].
#[derive(Debug, Clone)]
pub struct RemapOptions {
    /// List file (`-` for stdin).
    pub list: String,
    /// Output name template, without extension.
    pub rename_pattern: Option<String>,
    pub mode: RemapMode,
    /// Overwrite existing outputs.
    pub force: bool,
    /// ffmpeg override.
    pub ffmpeg: Option<String>,
}

/// Compute the output path for one input.
fn output_path(
    ctx: &Context,
    registry: &Registry,
    media: &Path,
    record: &Record,
    opts: &RemapOptions,
) -> Result<PathBuf, MetadataError> {
    let extension = match &opts.mode {
        RemapMode::Transcode(format) => format.clone(),
        _ => extension_of(media),
    };
    let base = match &opts.rename_pattern {
        Some(pattern) => record.format(registry, pattern)?,
        None => stem_of(media),
    };
    let name = if extension.is_empty() {
        base
    } else {
        append_extension(Path::new(&base), &extension)
            .to_string_lossy()
            .into_owned()
    };
    let name = safe_component(&name);

    let output = match media.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    };

    if output == media || same_file(&ctx.resolve(media), &ctx.resolve(&output)) {
        Ok(with_name_prefix(&output, &ctx.config.conflict_prefix()))
    } else {
        Ok(output)
    }
}

/// Re-map sidecar metadata into listed audio files.
pub fn remap_metadata(
    ctx: &Context,
    registry: &Registry,
    runner: &dyn ProcessRunner,
    opts: &RemapOptions,
) -> Result<()> {
    let ffmpeg = opts
        .ffmpeg
        .clone()
        .unwrap_or_else(|| ctx.config.ffmpeg());
    let verbosity = ctx.verbosity();
    let items = engine::read_list(ctx, &opts.list)?;

    engine::run_batch(ctx, "remap-metadata", items, |item| {
        let media = Path::new(item);
        let sidecar = ctx.sidecar_for(media);
        let record = Record::read_sidecar(registry, &ctx.resolve(&sidecar))?;

        let output = output_path(ctx, registry, media, &record, opts)?;
        if !opts.force && ctx.resolve(&output).exists() {
            return Err(MetadataError::ExistingOutput(output).into());
        }

        match &opts.mode {
            RemapMode::CopyOnly => {
                output::verbose(
                    format!("copying: {} -> {}", item, output.display()),
                    verbosity,
                );
                if !ctx.dry_run {
                    copy_file(&ctx.resolve(media), &ctx.resolve(&output))?;
                }
            }
            mode => {
                let call = ExternalCall::new(ffmpeg.as_str())
                    .flag_if(opts.force, "-y")
                    .arg("-i")
                    .path_arg(media)
                    .arg("-i")
                    .path_arg(&sidecar)
                    .args(["-map_metadata", "1"]);
                let call = match mode {
                    RemapMode::Transcode(_) => call,
                    _ => call.args(["-codec", "copy"]),
                };
                engine::run_logged(ctx, runner, &call.path_arg(&output))?;
            }
        }

        Ok(done(
            ctx,
            format!("remapped: {} -> {}", item, output.display()),
        ))
    })?
    .finish()?;

    Ok(())
}
