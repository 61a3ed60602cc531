//! strip-cv command - Remove a pattern from file names

use std::path::Path;

use crate::core::naming::strip_pattern;
use crate::core::paths::file_name_of;
use crate::engine::{self, Context, Outcome};
use crate::ui::output;
use anyhow::{Context as _, Result};
use regex::Regex;

use super::{done, move_file};

/// Rename each file with every match of `pattern` removed from its name.
///
/// The directory part of each path is kept as is. Names the pattern does
/// not match are skipped; an existing target is left alone unless `force`.
pub fn strip_cv(ctx: &Context, files: &[String], pattern: &str, force: bool) -> Result<()> {
    let regex =
        Regex::new(pattern).with_context(|| format!("invalid pattern '{}'", pattern))?;
    let verbosity = ctx.verbosity();

    engine::run_batch(ctx, "strip-cv", files.iter().cloned(), |item| {
        let path = Path::new(item);
        let name = file_name_of(path);
        let Some(stripped) = strip_pattern(&name, &regex) else {
            return Ok(Outcome::Skipped("nothing to strip".into()));
        };
        let target = path.with_file_name(&stripped);

        if ctx.resolve(&target).exists() && !force {
            return Ok(Outcome::Skipped(format!("existing: {}", target.display())));
        }
        output::verbose(
            format!("renaming: {} -> {}", item, target.display()),
            verbosity,
        );
        if !ctx.dry_run {
            move_file(&ctx.resolve(path), &ctx.resolve(&target))?;
        }
        Ok(done(ctx, format!("renamed: {} -> {}", item, target.display())))
    })?
    .finish()?;

    Ok(())
}
