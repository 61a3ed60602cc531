//! Integration tests for subprogram handlers.
//!
//! These tests drive the command functions directly against a temporary
//! directory. External tools are replaced by a recording runner, so the
//! exact argument lists can be checked without ffmpeg, sox, or shnsplit.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use audio_organizer::cli::commands::{
    self, MergeMode, ParseOptions, RemapMode, RemapOptions, SplitOptions,
};
use audio_organizer::core::metadata::Registry;
use audio_organizer::core::types::TrackCounts;
use audio_organizer::engine::{Context, ExternalCall, ProcessRunner};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A working directory with helpers to create media files and sidecars.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn ctx(&self) -> Context {
        Context {
            cwd: Some(self.path().to_path_buf()),
            quiet: true,
            ..Default::default()
        }
    }

    fn dry_ctx(&self) -> Context {
        Context {
            dry_run: true,
            ..self.ctx()
        }
    }

    fn write(&self, name: &str, contents: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).unwrap()
    }

    fn exists(&self, name: &str) -> bool {
        self.path().join(name).exists()
    }

    /// Write the list file with one entry per line.
    fn list(&self, entries: &[&str]) {
        self.write("list", &format!("{}\n", entries.join("\n")));
    }
}

/// Records calls instead of spawning processes.
#[derive(Default)]
struct RecordingRunner {
    calls: RefCell<Vec<(ExternalCall, PathBuf)>>,
    /// Exit code to report for every call.
    exit_code: Option<i32>,
    /// Create the file named by the last argument, like a real tool would.
    create_output: bool,
}

impl RecordingRunner {
    fn new() -> Self {
        Self {
            exit_code: Some(0),
            ..Default::default()
        }
    }

    fn creating_outputs() -> Self {
        Self {
            create_output: true,
            ..Self::new()
        }
    }

    fn failing(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Default::default()
        }
    }

    fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(call, _)| call.program().to_string())
            .collect()
    }

    fn args(&self, index: usize) -> Vec<String> {
        self.calls.borrow()[index].0.arguments().to_vec()
    }

    fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, call: &ExternalCall, cwd: &Path) -> io::Result<Option<i32>> {
        self.calls
            .borrow_mut()
            .push((call.clone(), cwd.to_path_buf()));
        if self.create_output {
            if let Some(last) = call.arguments().last() {
                fs::write(cwd.join(last), "")?;
            }
        }
        Ok(self.exit_code)
    }
}

fn strs(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn parse_opts(pattern: &str) -> ParseOptions {
    ParseOptions {
        pattern: pattern.to_string(),
        list: "list".to_string(),
        force: false,
        merge: None,
        with_extension: false,
        overrides: Vec::new(),
    }
}

fn remap_opts(pattern: Option<&str>, mode: RemapMode) -> RemapOptions {
    RemapOptions {
        list: "list".to_string(),
        rename_pattern: pattern.map(str::to_string),
        mode,
        force: false,
        ffmpeg: None,
    }
}

// =============================================================================
// parse-metadata
// =============================================================================

mod parse_metadata {
    use super::*;

    #[test]
    fn overwrite_merge_into_existing_sidecar() {
        let ws = Workspace::new();
        ws.write("Alice - MySong.mp3", "");
        ws.write("Alice - MySong.mp3.metadata", ";FFMETADATA1\nalbum=X\n");
        ws.list(&["Alice - MySong.mp3"]);

        let opts = ParseOptions {
            merge: Some(MergeMode::Overwrite),
            ..parse_opts("%a - %T")
        };
        commands::parse_metadata(&ws.ctx(), &Registry::standard(), &opts).unwrap();

        assert_eq!(
            ws.read("Alice - MySong.mp3.metadata"),
            ";FFMETADATA1\nalbum=X\nartist=Alice\ntitle=MySong\n"
        );
    }

    #[test]
    fn append_merge_keeps_existing_tags() {
        let ws = Workspace::new();
        ws.write("01. New.flac.metadata", ";FFMETADATA1\ntitle=Old\n");
        ws.list(&["01. New.flac"]);

        let opts = ParseOptions {
            merge: Some(MergeMode::Append),
            ..parse_opts("%t. %T")
        };
        commands::parse_metadata(&ws.ctx(), &Registry::standard(), &opts).unwrap();

        assert_eq!(
            ws.read("01. New.flac.metadata"),
            ";FFMETADATA1\ntitle=Old\ntrack=1\n"
        );
    }

    #[test]
    fn with_extension_matches_whole_name() {
        let ws = Workspace::new();
        ws.list(&["03 Intro.wav"]);

        let opts = ParseOptions {
            with_extension: true,
            ..parse_opts("%t %T.wav")
        };
        commands::parse_metadata(&ws.ctx(), &Registry::standard(), &opts).unwrap();

        assert_eq!(
            ws.read("03 Intro.wav.metadata"),
            ";FFMETADATA1\ntitle=Intro\ntrack=3\n"
        );
    }

    #[test]
    fn overrides_win() {
        let ws = Workspace::new();
        ws.list(&["Alice - MySong.mp3"]);

        let opts = ParseOptions {
            overrides: vec![
                ("artist".into(), "Bob,Carol".into()),
                ("disc".into(), "2".into()),
            ],
            ..parse_opts("%a - %T")
        };
        commands::parse_metadata(&ws.ctx(), &Registry::standard(), &opts).unwrap();

        assert_eq!(
            ws.read("Alice - MySong.mp3.metadata"),
            ";FFMETADATA1\nartist=Bob\\; Carol\ndisc=2\ntitle=MySong\n"
        );
    }

    #[test]
    fn existing_sidecar_fails_record_but_batch_continues() {
        let ws = Workspace::new();
        ws.write("A - One.mp3.metadata", ";FFMETADATA1\ntitle=Keep\n");
        ws.list(&["A - One.mp3", "B - Two.mp3"]);

        let err = commands::parse_metadata(&ws.ctx(), &Registry::standard(), &parse_opts("%a - %T"))
            .unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 records failed");
        assert_eq!(ws.read("A - One.mp3.metadata"), ";FFMETADATA1\ntitle=Keep\n");
        assert!(ws.exists("B - Two.mp3.metadata"));
    }

    #[test]
    fn mismatched_name_fails_that_record_only() {
        let ws = Workspace::new();
        ws.list(&["no separator.mp3", "A - B.mp3"]);

        let result =
            commands::parse_metadata(&ws.ctx(), &Registry::standard(), &parse_opts("%a - %T"));

        assert!(result.is_err());
        assert!(!ws.exists("no separator.mp3.metadata"));
        assert!(ws.exists("A - B.mp3.metadata"));
    }

    #[test]
    fn corrupt_sidecar_halts_batch() {
        let ws = Workspace::new();
        ws.write("A - One.mp3.metadata", "album=no header\n");
        ws.list(&["A - One.mp3", "B - Two.mp3"]);

        let opts = ParseOptions {
            merge: Some(MergeMode::Append),
            ..parse_opts("%a - %T")
        };
        let err = commands::parse_metadata(&ws.ctx(), &Registry::standard(), &opts).unwrap_err();

        assert!(format!("{err:#}").contains("halted"));
        assert!(!ws.exists("B - Two.mp3.metadata"));
    }

    #[test]
    fn unknown_placeholder_fails_before_any_write() {
        let ws = Workspace::new();
        ws.list(&["A - B.mp3"]);

        let err = commands::parse_metadata(&ws.ctx(), &Registry::standard(), &parse_opts("%a - %x"))
            .unwrap_err();

        assert!(err.to_string().contains("%x"));
        assert!(!ws.exists("A - B.mp3.metadata"));
    }

    #[test]
    fn invalid_override_fails_before_any_write() {
        let ws = Workspace::new();
        ws.list(&["A - B.mp3"]);

        let opts = ParseOptions {
            overrides: vec![("year".into(), "-1".into())],
            ..parse_opts("%a - %T")
        };
        assert!(commands::parse_metadata(&ws.ctx(), &Registry::standard(), &opts).is_err());
        assert!(!ws.exists("A - B.mp3.metadata"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let ws = Workspace::new();
        ws.list(&["A - B.mp3"]);

        commands::parse_metadata(&ws.dry_ctx(), &Registry::standard(), &parse_opts("%a - %T"))
            .unwrap();

        assert!(!ws.exists("A - B.mp3.metadata"));
    }

    #[test]
    fn missing_list_file_is_error() {
        let ws = Workspace::new();
        let err = commands::parse_metadata(&ws.ctx(), &Registry::standard(), &parse_opts("%T"))
            .unwrap_err();
        assert!(err.to_string().contains("list"));
    }
}

// =============================================================================
// dump-metadata
// =============================================================================

mod dump_metadata {
    use super::*;

    #[test]
    fn calls_ffmpeg_per_file() {
        let ws = Workspace::new();
        ws.list(&["a.mp3", "-b.mp3"]);
        let runner = RecordingRunner::new();

        commands::dump_metadata(&ws.ctx(), &runner, "list", false, None).unwrap();

        assert_eq!(runner.programs(), strs(&["ffmpeg", "ffmpeg"]));
        assert_eq!(
            runner.args(0),
            strs(&["-i", "a.mp3", "-c:a", "discard", "-f", "ffmetadata", "a.mp3.metadata"])
        );
        assert_eq!(
            runner.args(1),
            strs(&[
                "-i",
                "./-b.mp3",
                "-c:a",
                "discard",
                "-f",
                "ffmetadata",
                "./-b.mp3.metadata"
            ])
        );
        assert_eq!(runner.calls.borrow()[0].1, ws.path());
    }

    #[test]
    fn force_passes_overwrite_flag() {
        let ws = Workspace::new();
        ws.write("a.mp3.metadata", ";FFMETADATA1\n");
        ws.list(&["a.mp3"]);
        let runner = RecordingRunner::new();

        commands::dump_metadata(&ws.ctx(), &runner, "list", true, Some("/opt/ffmpeg")).unwrap();

        assert_eq!(runner.programs(), strs(&["/opt/ffmpeg"]));
        assert_eq!(runner.args(0)[0], "-y");
    }

    #[test]
    fn existing_sidecar_without_force_is_skipped_with_error() {
        let ws = Workspace::new();
        ws.write("a.mp3.metadata", ";FFMETADATA1\n");
        ws.list(&["a.mp3", "b.mp3"]);
        let runner = RecordingRunner::new();

        let err = commands::dump_metadata(&ws.ctx(), &runner, "list", false, None).unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 records failed");
        assert_eq!(runner.count(), 1);
        assert_eq!(runner.args(0)[1], "b.mp3");
    }

    #[test]
    fn non_zero_exit_fails_record_and_continues() {
        let ws = Workspace::new();
        ws.list(&["a.mp3", "b.mp3"]);
        let runner = RecordingRunner::failing(1);

        let err = commands::dump_metadata(&ws.ctx(), &runner, "list", false, None).unwrap_err();

        assert_eq!(err.to_string(), "2 of 2 records failed");
        assert_eq!(runner.count(), 2);
    }

    #[test]
    fn dry_run_spawns_nothing() {
        let ws = Workspace::new();
        ws.list(&["a.mp3"]);
        let runner = RecordingRunner::new();

        commands::dump_metadata(&ws.dry_ctx(), &runner, "list", false, None).unwrap();

        assert_eq!(runner.count(), 0);
    }
}

// =============================================================================
// remap-metadata
// =============================================================================

mod remap_metadata {
    use super::*;

    fn fixture() -> Workspace {
        let ws = Workspace::new();
        ws.write("a.flac", "audio");
        ws.write(
            "a.flac.metadata",
            ";FFMETADATA1\nartist=Alice\ntitle=Song\ntrack=1\n",
        );
        ws.list(&["a.flac"]);
        ws
    }

    #[test]
    fn stream_copy_with_rename() {
        let ws = fixture();
        let runner = RecordingRunner::new();

        commands::remap_metadata(
            &ws.ctx(),
            &Registry::standard(),
            &runner,
            &remap_opts(Some("%t. %T"), RemapMode::Remap),
        )
        .unwrap();

        assert_eq!(
            runner.args(0),
            strs(&[
                "-i",
                "a.flac",
                "-i",
                "a.flac.metadata",
                "-map_metadata",
                "1",
                "-codec",
                "copy",
                "1. Song.flac"
            ])
        );
    }

    #[test]
    fn transcode_changes_extension_without_stream_copy() {
        let ws = fixture();
        let runner = RecordingRunner::new();

        commands::remap_metadata(
            &ws.ctx(),
            &Registry::standard(),
            &runner,
            &remap_opts(Some("%a - %T"), RemapMode::Transcode("opus".into())),
        )
        .unwrap();

        let args = runner.args(0);
        assert!(!args.contains(&"-codec".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("Alice - Song.opus"));
    }

    #[test]
    fn same_name_gets_conflict_prefix() {
        let ws = fixture();
        let runner = RecordingRunner::new();

        commands::remap_metadata(
            &ws.ctx(),
            &Registry::standard(),
            &runner,
            &remap_opts(None, RemapMode::Remap),
        )
        .unwrap();

        assert_eq!(
            runner.args(0).last().map(String::as_str),
            Some("CONFLICT.a.flac")
        );
    }

    #[test]
    fn copy_only_copies_without_ffmpeg() {
        let ws = fixture();
        let runner = RecordingRunner::new();

        commands::remap_metadata(
            &ws.ctx(),
            &Registry::standard(),
            &runner,
            &remap_opts(Some("%a - %T"), RemapMode::CopyOnly),
        )
        .unwrap();

        assert_eq!(runner.count(), 0);
        assert_eq!(ws.read("Alice - Song.flac"), "audio");
        assert!(ws.exists("a.flac"));
    }

    #[test]
    fn existing_output_without_force_fails() {
        let ws = fixture();
        ws.write("1. Song.flac", "");
        let runner = RecordingRunner::new();

        let result = commands::remap_metadata(
            &ws.ctx(),
            &Registry::standard(),
            &runner,
            &remap_opts(Some("%t. %T"), RemapMode::Remap),
        );

        assert!(result.is_err());
        assert_eq!(runner.count(), 0);
    }

    #[test]
    fn missing_field_fails_record() {
        let ws = fixture();
        let runner = RecordingRunner::new();

        let result = commands::remap_metadata(
            &ws.ctx(),
            &Registry::standard(),
            &runner,
            &remap_opts(Some("%A"), RemapMode::Remap),
        );

        assert!(result.is_err());
        assert_eq!(runner.count(), 0);
    }
}

// =============================================================================
// sort-by-metadata / sort-disc-track
// =============================================================================

mod sorting {
    use super::*;

    #[test]
    fn moves_media_and_sidecar_into_directory() {
        let ws = Workspace::new();
        ws.write("a.flac", "audio");
        ws.write("a.flac.metadata", ";FFMETADATA1\nalbum=Live: 1999\nartist=AC/DC\n");
        ws.list(&["a.flac"]);

        commands::sort_by_metadata(
            &ws.ctx(),
            &Registry::standard(),
            "%a - %A",
            "list",
            false,
            false,
        )
        .unwrap();

        let dir = "AC／DC - Live： 1999";
        assert!(ws.exists(&format!("{dir}/a.flac")));
        assert!(ws.exists(&format!("{dir}/a.flac.metadata")));
        assert!(!ws.exists("a.flac"));
    }

    #[test]
    fn copy_keeps_sources() {
        let ws = Workspace::new();
        ws.write("a.flac", "audio");
        ws.write("a.flac.metadata", ";FFMETADATA1\nyear=1999\n");
        ws.list(&["a.flac"]);

        commands::sort_by_metadata(&ws.ctx(), &Registry::standard(), "%y", "list", true, false)
            .unwrap();

        assert!(ws.exists("1999/a.flac"));
        assert!(ws.exists("a.flac"));
    }

    #[test]
    fn existing_destination_is_skipped() {
        let ws = Workspace::new();
        ws.write("a.flac", "new");
        ws.write("a.flac.metadata", ";FFMETADATA1\nyear=1999\n");
        ws.write("1999/a.flac", "old");
        ws.list(&["a.flac"]);

        commands::sort_by_metadata(&ws.ctx(), &Registry::standard(), "%y", "list", false, false)
            .unwrap();

        assert_eq!(ws.read("1999/a.flac"), "old");
        assert!(ws.exists("a.flac"));
        assert!(ws.exists("1999/a.flac.metadata"));
    }

    #[test]
    fn dot_directory_stays_inside_working_dir() {
        let ws = Workspace::new();
        ws.write("a.flac", "audio");
        ws.write("a.flac.metadata", ";FFMETADATA1\nalbum=..\n");
        ws.list(&["a.flac"]);

        commands::sort_by_metadata(&ws.ctx(), &Registry::standard(), "%A", "list", false, false)
            .unwrap();

        assert!(ws.exists("．．/a.flac"));
        assert!(ws.exists("．．/a.flac.metadata"));
        assert!(!ws.path().parent().unwrap().join("a.flac").exists());
    }

    #[test]
    fn splits_continuous_track() {
        let ws = Workspace::new();
        ws.write("x.flac.metadata", ";FFMETADATA1\ntitle=X\ntrack=13\n");
        ws.list(&["x.flac"]);

        commands::sort_disc_track(
            &ws.ctx(),
            &Registry::standard(),
            &TrackCounts::new(vec![10, 8]),
            0,
            "list",
        )
        .unwrap();

        assert_eq!(
            ws.read("x.flac.metadata"),
            ";FFMETADATA1\ndisc=2\ntitle=X\ntrack=3\n"
        );
    }

    #[test]
    fn offset_is_applied() {
        let ws = Workspace::new();
        ws.write("x.flac.metadata", ";FFMETADATA1\ntrack=1\n");
        ws.list(&["x.flac"]);

        commands::sort_disc_track(
            &ws.ctx(),
            &Registry::standard(),
            &TrackCounts::new(vec![2, 2]),
            2,
            "list",
        )
        .unwrap();

        assert_eq!(ws.read("x.flac.metadata"), ";FFMETADATA1\ndisc=2\ntrack=1\n");
    }

    #[test]
    fn extreme_offsets_do_not_overflow() {
        let ws = Workspace::new();
        let sidecar = ";FFMETADATA1\ntrack=5\n";
        ws.write("x.flac.metadata", sidecar);
        ws.list(&["x.flac"]);
        let counts = TrackCounts::new(vec![10, 8]);

        commands::sort_disc_track(&ws.ctx(), &Registry::standard(), &counts, i64::MAX, "list")
            .unwrap();
        assert_eq!(ws.read("x.flac.metadata"), sidecar);

        let err =
            commands::sort_disc_track(&ws.ctx(), &Registry::standard(), &counts, i64::MIN, "list")
                .unwrap_err();
        assert_eq!(err.to_string(), "1 of 1 records failed");
        assert_eq!(ws.read("x.flac.metadata"), sidecar);
    }

    #[test]
    fn skips_without_rewriting() {
        let ws = Workspace::new();
        let with_disc = ";FFMETADATA1\ndisc=1\ntrack=3\n";
        let no_track = ";FFMETADATA1\ntitle=T\n";
        let too_far = ";FFMETADATA1\ntrack=30\n";
        ws.write("a.metadata", with_disc);
        ws.write("b.metadata", no_track);
        ws.write("c.metadata", too_far);
        ws.list(&["a", "b", "c"]);

        commands::sort_disc_track(
            &ws.ctx(),
            &Registry::standard(),
            &TrackCounts::new(vec![10, 8]),
            0,
            "list",
        )
        .unwrap();

        assert_eq!(ws.read("a.metadata"), with_disc);
        assert_eq!(ws.read("b.metadata"), no_track);
        assert_eq!(ws.read("c.metadata"), too_far);
    }
}

// =============================================================================
// split-by-cue / draw-spectrogram
// =============================================================================

mod external_tools {
    use super::*;

    fn split_opts(transcode: Option<&str>) -> SplitOptions {
        SplitOptions {
            input: PathBuf::from("CD1.ape"),
            cue: PathBuf::from("CD1.cue"),
            transcode: transcode.map(str::to_string),
            force: false,
            ffmpeg: None,
            shnsplit: None,
        }
    }

    #[test]
    fn split_without_transcode() {
        let ws = Workspace::new();
        ws.write("CD1.ape", "");
        ws.write("CD1.cue", "");
        let runner = RecordingRunner::new();

        commands::split_by_cue(&ws.ctx(), &runner, &split_opts(None)).unwrap();

        assert_eq!(runner.programs(), strs(&["shnsplit"]));
        assert_eq!(
            runner.args(0),
            strs(&["-t", "%n. %t - %p", "-f", "CD1.cue", "-o", "ape", "CD1.ape"])
        );
    }

    #[test]
    fn split_with_transcode_removes_temporary() {
        let ws = Workspace::new();
        ws.write("CD1.ape", "");
        ws.write("CD1.cue", "");
        let runner = RecordingRunner::creating_outputs();

        let opts = SplitOptions {
            force: true,
            ..split_opts(Some("flac"))
        };
        commands::split_by_cue(&ws.ctx(), &runner, &opts).unwrap();

        assert_eq!(runner.programs(), strs(&["ffmpeg", "shnsplit"]));
        assert_eq!(runner.args(0), strs(&["-y", "-i", "CD1.ape", "CD1.flac"]));
        assert_eq!(
            runner.args(1),
            strs(&["-O", "always", "-t", "%n. %t - %p", "-f", "CD1.cue", "-o", "flac", "CD1.flac"])
        );
        assert!(!ws.exists("CD1.flac"));
        assert!(ws.exists("CD1.ape"));
    }

    #[test]
    fn split_requires_existing_inputs() {
        let ws = Workspace::new();
        let runner = RecordingRunner::new();

        let err = commands::split_by_cue(&ws.ctx(), &runner, &split_opts(None)).unwrap_err();

        assert!(err.to_string().contains("CD1.ape"));
        assert_eq!(runner.count(), 0);
    }

    #[test]
    fn spectrogram_per_file() {
        let ws = Workspace::new();
        ws.list(&["a.flac"]);
        let runner = RecordingRunner::new();

        commands::draw_spectrogram(&ws.ctx(), &runner, "list", Some("jpg"), None).unwrap();

        assert_eq!(runner.programs(), strs(&["sox"]));
        assert_eq!(
            runner.args(0),
            strs(&["a.flac", "-n", "spectrogram", "-o", "a.flac.jpg"])
        );
    }

    #[test]
    fn spectrogram_rejects_unknown_format() {
        let ws = Workspace::new();
        ws.list(&["a.flac"]);
        let runner = RecordingRunner::new();

        assert!(commands::draw_spectrogram(&ws.ctx(), &runner, "list", Some("gif"), None).is_err());
        assert_eq!(runner.count(), 0);
    }
}

// =============================================================================
// clean-temps / rename-conflict / strip-cv
// =============================================================================

mod file_ops {
    use super::*;

    #[test]
    fn clean_temps_removes_file_and_sidecar() {
        let ws = Workspace::new();
        ws.write("a.flac", "");
        ws.write("a.flac.metadata", "");
        ws.write("b.flac", "");
        ws.list(&["a.flac", "b.flac", "missing.flac"]);

        commands::clean_temps(&ws.ctx(), "list").unwrap();

        assert!(!ws.exists("a.flac"));
        assert!(!ws.exists("a.flac.metadata"));
        assert!(!ws.exists("b.flac"));
    }

    #[test]
    fn clean_temps_dry_run_keeps_files() {
        let ws = Workspace::new();
        ws.write("a.flac", "");
        ws.list(&["a.flac"]);

        commands::clean_temps(&ws.dry_ctx(), "list").unwrap();

        assert!(ws.exists("a.flac"));
    }

    #[test]
    fn rename_conflict_drops_prefix() {
        let ws = Workspace::new();
        ws.write("CONFLICT.a.flac", "new");
        ws.write("CONFLICT.b.flac", "new");
        ws.write("b.flac", "old");

        commands::rename_conflict(&ws.ctx(), None, false).unwrap();

        assert_eq!(ws.read("a.flac"), "new");
        assert_eq!(ws.read("b.flac"), "old");
        assert!(ws.exists("CONFLICT.b.flac"));
    }

    #[test]
    fn rename_conflict_force_overwrites() {
        let ws = Workspace::new();
        ws.write("DUP.b.flac", "new");
        ws.write("b.flac", "old");

        commands::rename_conflict(&ws.ctx(), Some("DUP."), true).unwrap();

        assert_eq!(ws.read("b.flac"), "new");
        assert!(!ws.exists("DUP.b.flac"));
    }

    #[test]
    fn strip_cv_renames_matching_files() {
        let ws = Workspace::new();
        ws.write("Song (CV： Someone).flac", "");
        ws.write("Plain.flac", "");

        commands::strip_cv(
            &ws.ctx(),
            &strs(&["Song (CV： Someone).flac", "Plain.flac"]),
            r" \(CV： [^)]+\)",
            false,
        )
        .unwrap();

        assert!(ws.exists("Song.flac"));
        assert!(ws.exists("Plain.flac"));
        assert!(!ws.exists("Song (CV： Someone).flac"));
    }

    #[test]
    fn strip_cv_rejects_bad_regex() {
        let ws = Workspace::new();
        assert!(commands::strip_cv(&ws.ctx(), &strs(&["a"]), "(", false).is_err());
    }
}
