//! core::naming
//!
//! File name rules applied to templated names.
//!
//! # Features
//!
//! - Replace characters that are path separators or reserved on Windows
//! - Keep `.` and `..` from naming the current or parent directory
//! - Protect names that would be parsed as command-line options
//! - Strip a pattern (such as voice actor credits) from names

use regex::Regex;

/// Characters that must not appear in a path component, with the
/// full-width look-alike each one becomes.
pub const RESERVED_CHAR_MAP: [(char, char); 8] = [
    ('\\', '＼'),
    ('/', '／'),
    ('*', '＊'),
    ('?', '？'),
    (':', '：'),
    ('<', '＜'),
    ('>', '＞'),
    ('|', '｜'),
];

/// Default pattern removed by `strip-cv`: a voice actor credit such as
/// ` (CV： Someone)`.
pub const DEFAULT_CV_PATTERN: &str = r" \(CV： [^)]+\)";

/// Replace reserved characters with safe visual analogs.
///
/// A double quote becomes two single quotes.
///
/// # Example
///
/// ```
/// use audio_organizer::core::naming::replace_reserved_chars;
///
/// assert_eq!(replace_reserved_chars("AC/DC: \"Live\""), "AC／DC： ''Live''");
/// ```
pub fn replace_reserved_chars(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '"' {
            out.push_str("''");
        } else if let Some(&(_, safe)) = RESERVED_CHAR_MAP.iter().find(|(from, _)| *from == c) {
            out.push(safe);
        } else {
            out.push(c);
        }
    }
    out
}

/// Turn a templated name into one safe path component.
///
/// Reserved characters are replaced as in [`replace_reserved_chars`], and a
/// name that is exactly `.` or `..` becomes full-width dots so it cannot
/// refer to the current or parent directory.
///
/// ```
/// use audio_organizer::core::naming::safe_component;
///
/// assert_eq!(safe_component(".."), "．．");
/// assert_eq!(safe_component("AC/DC"), "AC／DC");
/// assert_eq!(safe_component("...And Justice"), "...And Justice");
/// ```
pub fn safe_component(name: &str) -> String {
    match name {
        "." | ".." => name.replace('.', "．"),
        _ => replace_reserved_chars(name),
    }
}

/// Prefix `./` to a name starting with `-` so external tools do not read
/// it as an option.
///
/// ```
/// use audio_organizer::core::naming::guard_leading_dash;
///
/// assert_eq!(guard_leading_dash("-live.flac"), "./-live.flac");
/// assert_eq!(guard_leading_dash("live.flac"), "live.flac");
/// ```
pub fn guard_leading_dash(name: &str) -> String {
    if name.starts_with('-') {
        format!("./{name}")
    } else {
        name.to_string()
    }
}

/// Remove every match of `pattern` from `name`.
///
/// Returns `None` when nothing matched.
pub fn strip_pattern(name: &str, pattern: &Regex) -> Option<String> {
    let stripped = pattern.replace_all(name, "");
    (stripped != name).then(|| stripped.into_owned())
}
