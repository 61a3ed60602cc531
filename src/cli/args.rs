//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--log-file <path>`: Mirror log events into a file
//! - `--quiet` / `-q`: Errors only
//! - `--verbose` / `-v`: Report every step
//! - `--dry-run` / `-n`: Report only; no writes, no external calls
//!
//! Subcommands are kebab-case and also accept their snake_case spelling
//! (`parse-metadata` / `parse_metadata`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::IMAGE_FORMATS;
use crate::core::naming::DEFAULT_CV_PATTERN;
use crate::core::types::TrackCounts;

/// Placeholder summary shown in help for template arguments.
///
/// Kept in sync with `Registry::standard().fields_help()` by a unit test.
pub const FIELDS_HELP: &str = "%A=album, %a=artist, %d=disc, %g=genre, %T=title, %t=track, %y=year";

const PATTERN_HELP: &str = "File name template. Must match the whole name (the stem unless \
    --with-extension is set). Fields: %A=album, %a=artist, %d=disc, %g=genre, %T=title, \
    %t=track, %y=year; %% is a literal percent sign";

const FORMAT_HELP: &str = "Output template filled from the sidecar. Fields: %A=album, \
    %a=artist, %d=disc, %g=genre, %T=title, %t=track, %y=year; %% is a literal percent sign";

/// Audio organizer - sidecar metadata tools for audio collections
#[derive(Parser, Debug)]
#[command(name = "ao")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if ao was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also write log events to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report every step, including external commands
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Validate and report without writing files or running tools; implies --verbose
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dump metadata of listed audio files into sidecar files
    #[command(
        name = "dump-metadata",
        visible_alias = "dump_metadata",
        long_about = "Dump metadata of listed audio files into sidecar files.\n\n\
            Runs ffmpeg once per listed file and writes <file>.metadata next to it \
            in ffmetadata format. An existing sidecar is an error for that file \
            unless --force is given.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Dump sidecars for every file in ./list
    ao dump-metadata

    # Read the list from stdin
    ls *.flac | ao dump-metadata -

    # Preview the ffmpeg calls
    ao -n dump-metadata"
    )]
    DumpMetadata {
        /// File listing audio files, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,

        /// Overwrite existing sidecars
        #[arg(short, long)]
        force: bool,

        /// Path to ffmpeg
        #[arg(long = "ffmpeg-path", value_name = "PATH")]
        ffmpeg: Option<String>,
    },

    /// Parse metadata from file names into sidecar files
    #[command(
        name = "parse-metadata",
        visible_alias = "parse_metadata",
        long_about = "Parse metadata from file names into sidecar files.\n\n\
            Each listed file name is matched against the template. The extracted \
            tags are written to the file's sidecar, optionally merged with the \
            sidecar that already exists. Manual overrides (-A, -T, ...) are applied \
            last and win over everything else.",
        after_help = "\
WORKFLOW EXAMPLES:
    # 'Alice - MySong.mp3' -> artist=Alice, title=MySong
    ao parse-metadata '%a - %T'

    # Keep dumped tags, fill in only what is missing
    ao dump-metadata && ao parse-metadata --append-merge '%t. %T'

    # Replace tags from the file name and set the album by hand
    ao parse-metadata --overwrite-merge -A 'Live 1999' '%t - %a - %T'"
    )]
    ParseMetadata {
        #[arg(help = PATTERN_HELP)]
        pattern: String,

        /// File listing audio files, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,

        /// Overwrite existing sidecars
        #[arg(short, long)]
        force: bool,

        /// Merge into an existing sidecar, keeping its tags (implies --force)
        #[arg(long, conflicts_with = "overwrite_merge")]
        append_merge: bool,

        /// Merge into an existing sidecar, replacing its tags (implies --force)
        #[arg(long)]
        overwrite_merge: bool,

        /// Match the template against the whole file name, extension included
        #[arg(long)]
        with_extension: bool,

        /// Override the album tag
        #[arg(short = 'A', long, value_name = "TEXT")]
        album: Option<String>,

        /// Override the title tag
        #[arg(short = 'T', long, value_name = "TEXT")]
        title: Option<String>,

        /// Override the artist tag (comma-separated for several)
        #[arg(short = 'a', long, value_name = "TEXT")]
        artist: Option<String>,

        /// Override the disc tag (positive integer)
        #[arg(short = 'd', long, value_name = "INT")]
        disc: Option<String>,

        /// Override the track tag (positive integer)
        #[arg(short = 't', long, value_name = "INT")]
        track: Option<String>,

        /// Override the year tag (positive integer)
        #[arg(short = 'y', long, value_name = "INT")]
        year: Option<String>,

        /// Override the genre tag
        #[arg(short = 'g', long, value_name = "TEXT")]
        genre: Option<String>,
    },

    /// Write sidecar metadata back into audio files
    #[command(
        name = "remap-metadata",
        visible_alias = "remap_metadata",
        long_about = "Write sidecar metadata back into audio files.\n\n\
            For each listed file, ffmpeg copies the audio stream into a new file \
            carrying the tags of the sidecar. The new file is named by the rename \
            template and placed next to the input. If that name is the input \
            itself, the conflict prefix is added.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Re-tag in place (output is CONFLICT.<name>)
    ao remap-metadata

    # Re-tag and rename to '01. Title.flac'
    ao remap-metadata -p '%t. %T'

    # Rename only, without touching file contents
    ao remap-metadata -m -p '%a - %T'

    # Transcode to opus while re-tagging
    ao remap-metadata -R opus -p '%t. %T'"
    )]
    RemapMetadata {
        /// File listing audio files, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,

        #[arg(short = 'p', long, value_name = "PATTERN", help = FORMAT_HELP)]
        rename_pattern: Option<String>,

        /// Copy the file under its new name without re-tagging
        #[arg(short = 'm', long, alias = "move-only", conflicts_with = "transcode")]
        copy_only: bool,

        /// Transcode the audio to this format/extension
        #[arg(short = 'R', long, value_name = "FORMAT")]
        transcode: Option<String>,

        /// Overwrite existing outputs
        #[arg(short, long)]
        force: bool,

        /// Path to ffmpeg
        #[arg(long = "ffmpeg-path", value_name = "PATH")]
        ffmpeg: Option<String>,
    },

    /// Sort audio files into directories named from their metadata
    #[command(
        name = "sort-by-metadata",
        visible_alias = "sort_by_metadata",
        after_help = "\
WORKFLOW EXAMPLES:
    # Move into 'Artist/Album' style directories (reserved characters are replaced)
    ao sort-by-metadata '%a - %A'

    # Copy instead of moving
    ao sort-by-metadata -c '%y %A'"
    )]
    SortByMetadata {
        #[arg(help = FORMAT_HELP)]
        pattern: String,

        /// File listing audio files, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,

        /// Copy into the directory, keeping the source files
        #[arg(short, long, alias = "keep-source")]
        copy: bool,

        /// Overwrite files already in the destination
        #[arg(short, long)]
        force: bool,
    },

    /// Split continuous track numbers into disc and track tags
    #[command(
        name = "sort-disc-track",
        visible_alias = "sort_disc_track",
        long_about = "Split continuous track numbers into disc and track tags.\n\n\
            Given the number of tracks on each disc, a sidecar with track=13 and \
            counts 10,8 is rewritten in place to disc=2, track=3. Sidecars that \
            already have a disc tag, have no track tag, or whose track number is \
            beyond the total are skipped.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Two discs with 10 and 8 tracks
    ao sort-disc-track -T 10,8

    # The first file is track 3 of the set
    ao sort-disc-track -T 12,12 --track-offset 2"
    )]
    SortDiscTrack {
        /// Number of tracks on each disc, in disc order
        #[arg(short = 'T', long = "num-track-list", value_name = "INT[,INT...]")]
        counts: TrackCounts,

        /// Add this to each track number before splitting
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        track_offset: i64,

        /// File listing audio files, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,
    },

    /// Split a single-piece audio file by a cue sheet
    #[command(
        name = "split-by-cue",
        visible_alias = "split_by_cue",
        after_help = "\
WORKFLOW EXAMPLES:
    # Split an image into tracks in the same format
    ao split-by-cue -i CD1.flac -c CD1.cue

    # Transcode an APE image to FLAC before splitting
    ao split-by-cue -i CD1.ape -c CD1.cue -R flac"
    )]
    SplitByCue {
        /// Single-piece audio file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Cue sheet
        #[arg(short, long, value_name = "FILE")]
        cue: PathBuf,

        /// Transcode to this format first (default: keep the input format)
        #[arg(short = 'R', long, value_name = "FORMAT")]
        transcode: Option<String>,

        /// Overwrite existing outputs
        #[arg(short, long)]
        force: bool,

        /// Path to ffmpeg (used for transcoding)
        #[arg(long = "ffmpeg-path", value_name = "PATH")]
        ffmpeg: Option<String>,

        /// Path to shnsplit
        #[arg(long = "shnsplit-path", value_name = "PATH")]
        shnsplit: Option<String>,
    },

    /// Draw a spectrogram image for each listed audio file
    #[command(name = "draw-spectrogram", visible_alias = "draw_spectrogram")]
    DrawSpectrogram {
        /// File listing audio files, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,

        /// Image format (default: png, or spectrogram.image_format from config)
        #[arg(short = 'g', long, value_parser = clap::builder::PossibleValuesParser::new(IMAGE_FORMATS))]
        image_format: Option<String>,

        /// Path to sox
        #[arg(long = "sox-path", value_name = "PATH")]
        sox: Option<String>,
    },

    /// Remove listed files and their sidecars
    #[command(name = "clean-temps", visible_alias = "clean_temps")]
    CleanTemps {
        /// File listing files to remove, one per line ('-' for stdin)
        #[arg(default_value = "list")]
        list: String,
    },

    /// Remove the conflict prefix from file names in the working directory
    #[command(
        name = "rename-conflict",
        visible_alias = "rename_conflict",
        after_help = "\
WORKFLOW EXAMPLES:
    # After 'ao remap-metadata', replace the originals with the re-tagged copies
    ao clean-temps && ao rename-conflict"
    )]
    RenameConflict {
        /// Prefix to remove (default: CONFLICT., or conflict_prefix from config)
        #[arg(short = 'C', long, value_name = "PREFIX")]
        conflict_prefix: Option<String>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Strip a pattern (by default voice-actor credits) from file names
    #[command(name = "strip-cv", visible_alias = "strip_cv")]
    StripCv {
        /// Files to rename
        #[arg(required = true, num_args = 1..)]
        files: Vec<String>,

        /// Regular expression to remove
        #[arg(short, long, value_name = "REGEX", default_value = DEFAULT_CV_PATTERN)]
        pattern: String,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List template placeholders and the tags they stand for
    #[command(name = "fields")]
    Fields,

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "Get, set, or list configuration values.\n\n\
            Values come from the user config (~/.audio-organizer/config.toml) and \
            an optional .audio-organizer.toml in the working directory. 'set' \
            writes the user config.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    ao config list

    # Get a specific value
    ao config get tools.ffmpeg

    # Set a value
    ao config set spectrogram.image_format jpg"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    ao completion bash >> ~/.bashrc

    # Zsh
    ao completion zsh > ~/.zfunc/_ao

    # Fish
    ao completion fish > ~/.config/fish/completions/ao.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
