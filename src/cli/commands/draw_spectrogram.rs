//! draw-spectrogram command - Render a spectrogram image per audio file

use std::path::Path;

use crate::core::config::SpectrogramDefaults;
use crate::core::paths::append_extension;
use crate::engine::{self, Context, ExternalCall, ProcessRunner};
use anyhow::Result;

use super::done;

/// Draw `<file>.<format>` for every listed file with sox.
pub fn draw_spectrogram(
    ctx: &Context,
    runner: &dyn ProcessRunner,
    list: &str,
    image_format: Option<&str>,
    sox: Option<&str>,
) -> Result<()> {
    let format = image_format.map_or_else(|| ctx.config.image_format(), str::to_string);
    SpectrogramDefaults {
        image_format: Some(format.clone()),
    }
    .validate()?;
    let sox = sox.map_or_else(|| ctx.config.sox(), str::to_string);
    let items = engine::read_list(ctx, list)?;

    engine::run_batch(ctx, "draw-spectrogram", items, |item| {
        let media = Path::new(item);
        let image = append_extension(media, &format);
        let call = ExternalCall::new(sox.as_str())
            .path_arg(media)
            .args(["-n", "spectrogram", "-o"])
            .path_arg(&image);
        engine::run_logged(ctx, runner, &call)?;
        Ok(done(ctx, format!("drawn: {} -> {}", item, image.display())))
    })?
    .finish()?;

    Ok(())
}
