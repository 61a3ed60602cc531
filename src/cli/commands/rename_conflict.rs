//! rename-conflict command - Drop the conflict prefix from file names

use std::fs;

use crate::engine::{self, Context, Outcome};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

use super::{done, move_file};

/// Names in `dir` starting with `prefix` (and longer than it), sorted.
fn prefixed_names(dir: &std::path::Path, prefix: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read '{}'", dir.display()))?;
        if let Some(name) = entry.file_name().to_str() {
            if name.len() > prefix.len() && name.starts_with(prefix) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Rename every `<prefix><name>` in the working directory to `<name>`.
///
/// An existing `<name>` is left alone (and reported) unless `force`.
pub fn rename_conflict(ctx: &Context, prefix: Option<&str>, force: bool) -> Result<()> {
    let prefix = prefix.map_or_else(|| ctx.config.conflict_prefix(), str::to_string);
    if prefix.is_empty() {
        bail!("conflict prefix must not be empty");
    }
    let verbosity = ctx.verbosity();
    let work_dir = ctx.work_dir();
    let names = prefixed_names(&work_dir, &prefix)?;

    engine::run_batch(ctx, "rename-conflict", names, |name| {
        let target = &name[prefix.len()..];
        let src = work_dir.join(name);
        let dst = work_dir.join(target);

        if dst.exists() && !force {
            return Ok(Outcome::Skipped(format!("existing: {}", target)));
        }
        output::verbose(format!("renaming: {} -> {}", name, target), verbosity);
        if !ctx.dry_run {
            move_file(&src, &dst)?;
        }
        Ok(done(ctx, format!("renamed: {} -> {}", name, target)))
    })?
    .finish()?;

    Ok(())
}
