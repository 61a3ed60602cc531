//! core::paths
//!
//! Path helpers for media files and their sidecars.
//!
//! # Layout
//!
//! Every media file `<name>` may have a sidecar `<name>.<ext>` next to it,
//! where `<ext>` is the configured sidecar extension (default `metadata`).
//! Files renamed to avoid clobbering their source carry a conflict prefix
//! (default `CONFLICT.`).
//!
//! # Example
//!
//! ```
//! use audio_organizer::core::paths::{append_extension, sidecar_path};
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(
//!     sidecar_path(Path::new("music/song.mp3"), "metadata"),
//!     PathBuf::from("music/song.mp3.metadata")
//! );
//! assert_eq!(append_extension(Path::new("song.flac"), "png"), PathBuf::from("song.flac.png"));
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Default sidecar extension.
pub const DEFAULT_SIDECAR_EXTENSION: &str = "metadata";

/// Default prefix marking a renamed conflicting output.
pub const DEFAULT_CONFLICT_PREFIX: &str = "CONFLICT.";

/// Append `.ext` to a path, keeping any existing extension.
pub fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Replace the extension of a path (or add one if there is none).
pub fn change_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext)
}

/// The sidecar path for a media file.
pub fn sidecar_path(media: &Path, sidecar_ext: &str) -> PathBuf {
    append_extension(media, sidecar_ext)
}

/// Extension of a path without the dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File stem (name without its last extension) as a string.
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name as a string.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Prefix the file name component of `path`.
pub fn with_name_prefix(path: &Path, prefix: &str) -> PathBuf {
    let name = format!("{}{}", prefix, file_name_of(path));
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// True if both paths exist and refer to the same file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn change_and_append() {
        assert_eq!(change_extension(Path::new("a.ape"), "flac"), PathBuf::from("a.flac"));
        assert_eq!(change_extension(Path::new("a"), "flac"), PathBuf::from("a.flac"));
        assert_eq!(append_extension(Path::new("a"), "flac"), PathBuf::from("a.flac"));
    }

    #[test]
    fn name_parts() {
        let p = Path::new("dir/Alice - Song.mp3");
        assert_eq!(extension_of(p), "mp3");
        assert_eq!(stem_of(p), "Alice - Song");
        assert_eq!(file_name_of(p), "Alice - Song.mp3");
        assert_eq!(extension_of(Path::new("noext")), "");
    }

    #[test]
    fn prefix_keeps_directory() {
        assert_eq!(
            with_name_prefix(Path::new("dir/a.mp3"), DEFAULT_CONFLICT_PREFIX),
            PathBuf::from("dir/CONFLICT.a.mp3")
        );
        assert_eq!(
            with_name_prefix(Path::new("a.mp3"), "X."),
            PathBuf::from("X.a.mp3")
        );
    }

    #[test]
    fn same_file_requires_existence() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        assert!(!same_file(&a, &a));
        fs::write(&a, "x").unwrap();
        assert!(same_file(&a, &dir.path().join(".").join("a")));
        assert!(!same_file(&a, &dir.path().join("b")));
    }
}
