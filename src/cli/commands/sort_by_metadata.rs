//! sort-by-metadata command - Move files into metadata-named directories

use std::fs;
use std::path::Path;

use crate::core::metadata::{Record, Registry};
use crate::core::naming::safe_component;
use crate::core::paths::file_name_of;
use crate::engine::{self, Context, Outcome};
use crate::ui::output;
use anyhow::{Context as _, Result};

use super::{copy_file, done, move_file};

/// Sort listed files (and their sidecars) into directories named by
/// `pattern`, relative to the working directory.
///
/// A file already present in the destination is kept unless `force`; the
/// record's single report line names the files that were kept.
pub fn sort_by_metadata(
    ctx: &Context,
    registry: &Registry,
    pattern: &str,
    list: &str,
    copy: bool,
    force: bool,
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let verb = if copy { "copying" } else { "moving" };
    let items = engine::read_list(ctx, list)?;

    engine::run_batch(ctx, "sort-by-metadata", items, |item| {
        let media = Path::new(item);
        let sidecar = ctx.sidecar_for(media);
        let record = Record::read_sidecar(registry, &ctx.resolve(&sidecar))?;

        let subdir = safe_component(&record.format(registry, pattern)?);
        let target_dir = ctx.resolve(&subdir);
        if !ctx.dry_run {
            fs::create_dir_all(&target_dir).with_context(|| {
                format!("failed to create directory '{}'", target_dir.display())
            })?;
        }

        let mut placed = 0;
        let mut kept = Vec::new();
        for src in [media, sidecar.as_path()] {
            let name = file_name_of(src);
            let dst = target_dir.join(&name);
            if dst.exists() && !force {
                kept.push(name);
                continue;
            }
            output::verbose(
                format!("{}: {} -> {}", verb, src.display(), dst.display()),
                verbosity,
            );
            if !ctx.dry_run {
                let src = ctx.resolve(src);
                if copy {
                    copy_file(&src, &dst)?;
                } else {
                    move_file(&src, &dst)?;
                }
            }
            placed += 1;
        }

        if placed == 0 {
            Ok(Outcome::Skipped(format!("already in '{}'", subdir)))
        } else if kept.is_empty() {
            Ok(done(ctx, format!("sorted: {} -> {}", item, subdir)))
        } else {
            Ok(done(
                ctx,
                format!(
                    "sorted: {} -> {} (kept existing {})",
                    item,
                    subdir,
                    kept.join(", ")
                ),
            ))
        }
    })?
    .finish()?;

    Ok(())
}
