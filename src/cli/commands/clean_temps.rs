//! clean-temps command - Remove listed files and their sidecars

use std::fs;
use std::path::Path;

use crate::engine::{self, Context, Outcome};
use crate::ui::output;
use anyhow::{Context as _, Result};

use super::done;

/// Remove every listed file and its sidecar. Missing files are skipped.
pub fn clean_temps(ctx: &Context, list: &str) -> Result<()> {
    let verbosity = ctx.verbosity();
    let items = engine::read_list(ctx, list)?;

    engine::run_batch(ctx, "clean-temps", items, |item| {
        let media = Path::new(item);
        let sidecar = ctx.sidecar_for(media);

        let mut removed = Vec::new();
        for path in [media, sidecar.as_path()] {
            let resolved = ctx.resolve(path);
            if !resolved.exists() {
                output::verbose(format!("skipping: {} (not found)", path.display()), verbosity);
                continue;
            }
            output::verbose(format!("removing: {}", path.display()), verbosity);
            if !ctx.dry_run {
                fs::remove_file(&resolved)
                    .with_context(|| format!("failed to remove '{}'", resolved.display()))?;
            }
            removed.push(path.display().to_string());
        }

        if removed.is_empty() {
            Ok(Outcome::Skipped("not found".into()))
        } else {
            Ok(done(ctx, format!("removed: {}", removed.join(", "))))
        }
    })?
    .finish()?;

    Ok(())
}
