//! parse-metadata command - Extract tags from file names into sidecars
//!
//! For each listed file the name is matched against the template, the result
//! is optionally merged with the existing sidecar, manual overrides are
//! applied on top, and the sidecar is written.

use std::path::Path;

use crate::core::metadata::{compile_matcher, MetadataError, Record, Registry};
use crate::core::paths::{file_name_of, stem_of};
use crate::engine::{self, Context};
use crate::ui::output;
use anyhow::{Context as _, Result};

use super::done;

/// How parsed tags combine with an existing sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Keep existing tags; add only tags the sidecar lacks.
    Append,
    /// Parsed tags replace existing ones.
    Overwrite,
}

/// Options for [`parse_metadata`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// File name template.
    pub pattern: String,
    /// List file (`-` for stdin).
    pub list: String,
    /// Overwrite existing sidecars.
    pub force: bool,
    /// Merge with the existing sidecar. Implies `force`.
    pub merge: Option<MergeMode>,
    /// Match the whole file name instead of the stem.
    pub with_extension: bool,
    /// Manual `(tag, value)` overrides in formatted form.
    pub overrides: Vec<(String, String)>,
}

/// Decode manual overrides into a record.
fn decode_overrides(registry: &Registry, overrides: &[(String, String)]) -> Result<Record> {
    let mut record = Record::new();
    for (tag, raw) in overrides {
        let descriptor = registry.lookup_by_tag(tag, false)?;
        let value = descriptor
            .kind()
            .from_formatted(descriptor.tag(), raw)
            .with_context(|| format!("invalid --{} override", tag))?;
        record.set(descriptor.tag(), value);
    }
    Ok(record)
}

/// Parse metadata from listed file names.
///
/// # Errors
///
/// The template and the overrides are validated before any file is touched;
/// an unknown placeholder or an invalid override fails the whole command.
pub fn parse_metadata(ctx: &Context, registry: &Registry, opts: &ParseOptions) -> Result<()> {
    let matcher = compile_matcher(registry, &opts.pattern)?;
    let overrides = decode_overrides(registry, &opts.overrides)?;
    let force = opts.force || opts.merge.is_some();
    let verbosity = ctx.verbosity();

    let items = engine::read_list(ctx, &opts.list)?;

    engine::run_batch(ctx, "parse-metadata", items, |item| {
        let media = Path::new(item);
        let text = if opts.with_extension {
            file_name_of(media)
        } else {
            stem_of(media)
        };

        output::verbose(format!("parsing: '{}'", item), verbosity);
        let parsed = Record::from_matcher(&matcher, &text)?;

        let sidecar = ctx.resolve(ctx.sidecar_for(media));
        let mut record = match opts.merge {
            Some(mode) if sidecar.exists() => {
                let mut existing = Record::read_sidecar(registry, &sidecar)?;
                match mode {
                    MergeMode::Append => existing.merge_append(parsed),
                    MergeMode::Overwrite => existing.merge_overwrite(parsed),
                };
                existing
            }
            _ => parsed,
        };
        record.merge_overwrite(overrides.clone());

        if !force && sidecar.exists() {
            return Err(MetadataError::ExistingOutput(sidecar).into());
        }

        output::verbose(format!("writing: '{}'", sidecar.display()), verbosity);
        if !ctx.dry_run {
            record.write_sidecar(&sidecar, force)?;
        }

        let tags: Vec<String> = record
            .iter()
            .map(|(tag, value)| format!("{}={}", tag, value.to_formatted()))
            .collect();
        Ok(done(ctx, format!("parsed: {} [{}]", item, tags.join(", "))))
    })?
    .finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_decode_with_formatted_rule() {
        let registry = Registry::standard();
        let record = decode_overrides(
            &registry,
            &[
                ("artist".into(), "Alice,Bob".into()),
                ("disc".into(), "2".into()),
            ],
        )
        .unwrap();
        assert_eq!(
            record.get("artist").map(|v| v.to_formatted()).as_deref(),
            Some("Alice,Bob")
        );
        assert_eq!(record.get("disc").map(|v| v.to_sidecar()).as_deref(), Some("2"));
    }

    #[test]
    fn invalid_override_rejected() {
        let registry = Registry::standard();
        let err = decode_overrides(&registry, &[("track".into(), "0".into())]).unwrap_err();
        assert!(err.to_string().contains("--track"));
    }

    #[test]
    fn unknown_override_tag_rejected() {
        let registry = Registry::standard();
        assert!(decode_overrides(&registry, &[("mood".into(), "x".into())]).is_err());
    }
}
