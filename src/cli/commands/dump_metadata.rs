//! dump-metadata command - Dump tags of listed audio files into sidecars

use std::path::Path;

use crate::core::metadata::MetadataError;
use crate::engine::{self, Context, ExternalCall, ProcessRunner};
use anyhow::Result;

use super::done;

/// Dump metadata of every listed file with ffmpeg.
///
/// An existing sidecar is an [`MetadataError::ExistingOutput`] for that file
/// unless `force` is set, in which case ffmpeg is told to overwrite.
pub fn dump_metadata(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    list: &str,
    force: bool,
    ffmpeg: Option<&str>,
) -> Result<()> {
    let ffmpeg = ffmpeg.map_or_else(|| ctx.config.ffmpeg(), str::to_string);
    let items = engine::read_list(ctx, list)?;

    engine::run_batch(ctx, "dump-metadata", items, |item| {
        let media = Path::new(item);
        let sidecar = ctx.sidecar_for(media);

        if !force && ctx.resolve(&sidecar).exists() {
            return Err(MetadataError::ExistingOutput(sidecar).into());
        }

        let call = ExternalCall::new(ffmpeg.as_str())
            .flag_if(force, "-y")
            .arg("-i")
            .path_arg(media)
            .args(["-c:a", "discard", "-f", "ffmetadata"])
            .path_arg(&sidecar);
        engine::run_logged(ctx, runner, &call)?;

        Ok(done(
            ctx,
            format!("dumped: {} -> {}", item, sidecar.display()),
        ))
    })?
    .finish()?;

    Ok(())
}
