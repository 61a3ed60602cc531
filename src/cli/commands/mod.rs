//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments up front (templates, overrides)
//! 2. Hands the per-record action to [`engine::run_batch`]
//! 3. Runs external tools through [`engine::run_logged`]
//!
//! Handlers take the registry and process runner as parameters so tests can
//! drive them with a custom registry or a recording runner.

mod clean_temps;
mod completion;
mod config_cmd;
mod draw_spectrogram;
mod dump_metadata;
mod fields;
mod parse_metadata;
mod remap_metadata;
mod rename_conflict;
mod sort_by_metadata;
mod sort_disc_track;
mod split_by_cue;
mod strip_cv;

// Re-export command functions for testing and direct invocation
pub use clean_temps::clean_temps;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use draw_spectrogram::draw_spectrogram;
pub use dump_metadata::dump_metadata;
pub use fields::fields;
pub use parse_metadata::{parse_metadata, MergeMode, ParseOptions};
pub use remap_metadata::{remap_metadata, RemapMode, RemapOptions};
pub use rename_conflict::rename_conflict;
pub use sort_by_metadata::sort_by_metadata;
pub use sort_disc_track::sort_disc_track;
pub use split_by_cue::{split_by_cue, SplitOptions};
pub use strip_cv::strip_cv;

use std::fs;
use std::io;
use std::path::Path;

use crate::cli::args::{Command, ConfigAction};
use crate::core::metadata::Registry;
use crate::engine::{self, Context, Outcome, ProcessRunner};
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(
    command: Command,
    ctx: &Context,
    registry: &Registry,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    match command {
        Command::DumpMetadata {
            list,
            force,
            ffmpeg,
        } => dump_metadata(ctx, runner, &list, force, ffmpeg.as_deref()),

        Command::ParseMetadata {
            pattern,
            list,
            force,
            append_merge,
            overwrite_merge,
            with_extension,
            album,
            title,
            artist,
            disc,
            track,
            year,
            genre,
        } => {
            let merge = if append_merge {
                Some(MergeMode::Append)
            } else if overwrite_merge {
                Some(MergeMode::Overwrite)
            } else {
                None
            };
            let overrides = [
                ("album", album),
                ("title", title),
                ("artist", artist),
                ("disc", disc),
                ("track", track),
                ("year", year),
                ("genre", genre),
            ]
            .into_iter()
            .filter_map(|(tag, value)| value.map(|v| (tag.to_string(), v)))
            .collect();

            let opts = ParseOptions {
                pattern,
                list,
                force,
                merge,
                with_extension,
                overrides,
            };
            parse_metadata(ctx, registry, &opts)
        }

        Command::RemapMetadata {
            list,
            rename_pattern,
            copy_only,
            transcode,
            force,
            ffmpeg,
        } => {
            let mode = match (copy_only, transcode) {
                (true, _) => RemapMode::CopyOnly,
                (false, Some(format)) => RemapMode::Transcode(format),
                (false, None) => RemapMode::Remap,
            };
            let opts = RemapOptions {
                list,
                rename_pattern,
                mode,
                force,
                ffmpeg,
            };
            remap_metadata(ctx, registry, runner, &opts)
        }

        Command::SortByMetadata {
            pattern,
            list,
            copy,
            force,
        } => sort_by_metadata(ctx, registry, &pattern, &list, copy, force),

        Command::SortDiscTrack {
            counts,
            track_offset,
            list,
        } => sort_disc_track(ctx, registry, &counts, track_offset, &list),

        Command::SplitByCue {
            input,
            cue,
            transcode,
            force,
            ffmpeg,
            shnsplit,
        } => {
            let opts = SplitOptions {
                input,
                cue,
                transcode,
                force,
                ffmpeg,
                shnsplit,
            };
            split_by_cue(ctx, runner, &opts)
        }

        Command::DrawSpectrogram {
            list,
            image_format,
            sox,
        } => draw_spectrogram(ctx, runner, &list, image_format.as_deref(), sox.as_deref()),

        Command::CleanTemps { list } => clean_temps(ctx, &list),

        Command::RenameConflict {
            conflict_prefix,
            force,
        } => rename_conflict(ctx, conflict_prefix.as_deref(), force),

        Command::StripCv {
            files,
            pattern,
            force,
        } => strip_cv(ctx, &files, &pattern, force),

        Command::Fields => fields(ctx, registry),

        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },

        Command::Completion { shell } => completion(shell),
    }
}

/// Report line for a finished action, marked when nothing was actually done.
fn done(ctx: &Context, message: String) -> Outcome {
    if ctx.dry_run {
        Outcome::Done(format!("[dry-run] {message}"))
    } else {
        Outcome::Done(message)
    }
}

/// Move a file, falling back to copy-and-delete across filesystems.
fn move_file(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(err)
            .with_context(|| format!("failed to move '{}': no such file", src.display())),
        Err(_) => {
            copy_file(src, dst)?;
            fs::remove_file(src)
                .with_context(|| format!("failed to remove '{}' after copy", src.display()))
        }
    }
}

/// Copy a file's contents and permissions.
fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).with_context(|| {
        format!("failed to copy '{}' to '{}'", src.display(), dst.display())
    })?;
    Ok(())
}
