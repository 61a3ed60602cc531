//! sort-disc-track command - Split continuous track numbers into disc/track

use std::path::Path;

use crate::core::metadata::{Record, Registry, Value};
use crate::core::types::TrackCounts;
use crate::engine::{self, Context, Outcome};
use crate::ui::output;
use anyhow::{bail, Result};

use super::done;

/// Rewrite listed sidecars in place with `disc` and per-disc `track`.
///
/// Skips sidecars that already have `disc`, have no `track`, or whose
/// shifted track number exceeds the total of `counts`.
pub fn sort_disc_track(
    ctx: &Context,
    registry: &Registry,
    counts: &TrackCounts,
    track_offset: i64,
    list: &str,
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let items = engine::read_list(ctx, list)?;

    engine::run_batch(ctx, "sort-disc-track", items, |item| {
        let sidecar = ctx.resolve(ctx.sidecar_for(Path::new(item)));
        let mut record = Record::read_sidecar(registry, &sidecar)?;

        if record.contains("disc") {
            return Ok(Outcome::Skipped("tag 'disc' already exists".into()));
        }
        let Some(track) = record.get("track") else {
            return Ok(Outcome::Skipped("tag 'track' does not exist".into()));
        };
        let Some(continuous) = track.as_number() else {
            bail!("tag 'track' is not a number: '{}'", track);
        };

        let Some(shifted) = i64::from(continuous.get()).checked_add(track_offset) else {
            return Ok(Outcome::Skipped(format!(
                "track {} with offset {} is out of range",
                continuous, track_offset
            )));
        };
        if shifted < 1 {
            bail!(
                "track {} with offset {} is not positive",
                continuous,
                track_offset
            );
        }
        let Some((disc, split)) = counts.split(continuous, track_offset) else {
            return Ok(Outcome::Skipped(format!(
                "track {} exceeds the {} tracks of --num-track-list",
                shifted,
                counts.total()
            )));
        };

        output::verbose(
            format!("parsing: T{} -> D{},T{} ({})", continuous, disc, split, item),
            verbosity,
        );
        record
            .set("disc", Value::number(disc))
            .set("track", Value::number(split));

        output::verbose(format!("saving: {}", sidecar.display()), verbosity);
        if !ctx.dry_run {
            record.write_sidecar(&sidecar, true)?;
        }

        Ok(done(
            ctx,
            format!("split: {} T{} -> D{},T{}", item, continuous, disc, split),
        ))
    })?
    .finish()?;

    Ok(())
}
