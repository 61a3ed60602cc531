//! core::metadata::record
//!
//! The metadata record: tagged values with ffmetadata and template
//! conversions.
//!
//! # Invariants
//!
//! - Tags are unique and lower case. Every insertion path lower-cases.
//! - Serialization order is ascending by tag, so output is reproducible.
//!
//! # Example
//!
//! ```
//! use audio_organizer::core::metadata::{Record, Registry};
//!
//! let registry = Registry::standard();
//! let mut record = Record::parse(&registry, ";FFMETADATA1\nalbum=X\n").unwrap();
//! let parsed = Record::parse_from_template(&registry, "%a - %T", "Alice - MySong").unwrap();
//! record.merge_overwrite(parsed);
//!
//! assert_eq!(
//!     record.serialize(),
//!     ";FFMETADATA1\nalbum=X\nartist=Alice\ntitle=MySong\n"
//! );
//! assert_eq!(record.format(&registry, "%a/%A").unwrap(), "Alice/X");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::template::{self, Matcher, Segment};
use super::{MetadataError, Registry, Value};

/// Required first line of an ffmetadata file.
pub const HEADER_LINE: &str = ";FFMETADATA1";

/// Lines starting with this are comments.
pub const COMMENT_PREFIX: char = ';';

/// Separates tag from value on each line.
pub const TAG_SEP: char = '=';

/// An ordered set of tagged metadata values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: BTreeMap<String, Value>,
    source: Option<PathBuf>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse ffmetadata text.
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` if the first non-empty line is not [`HEADER_LINE`]
    /// - `MalformedLine` for a content line without `=`
    /// - `InvalidValue` if a typed tag has an undecodable value
    pub fn parse(registry: &Registry, text: &str) -> Result<Self, MetadataError> {
        Self::parse_with_source(registry, text, None)
    }

    fn parse_with_source(
        registry: &Registry,
        text: &str,
        source: Option<PathBuf>,
    ) -> Result<Self, MetadataError> {
        let first = text.lines().find(|line| !line.is_empty());
        if first != Some(HEADER_LINE) {
            return Err(MetadataError::MalformedHeader {
                source_path: source,
            });
        }

        let mut record = Record {
            entries: BTreeMap::new(),
            source: None,
        };
        for (index, line) in text.lines().enumerate() {
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let (tag, raw) = line
                .split_once(TAG_SEP)
                .ok_or_else(|| MetadataError::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                    source_path: source.clone(),
                })?;
            let tag = tag.to_lowercase();
            let descriptor = registry.lookup_by_tag(&tag, true)?;
            let value = descriptor.kind().from_sidecar(&tag, raw)?;
            record.entries.insert(tag, value);
        }
        record.source = source;
        Ok(record)
    }

    /// Read and parse a sidecar file.
    ///
    /// The returned record remembers `path` as its source.
    ///
    /// # Errors
    ///
    /// `MetadataError::Io` if the file cannot be read, otherwise as
    /// [`parse`](Self::parse).
    pub fn read_sidecar(registry: &Registry, path: &Path) -> Result<Self, MetadataError> {
        let text = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with_source(registry, &text, Some(path.to_path_buf()))
    }

    /// Serialize to ffmetadata text, tags in ascending order.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(HEADER_LINE.len() + 1 + self.entries.len() * 16);
        out.push_str(HEADER_LINE);
        out.push('\n');
        for (tag, value) in &self.entries {
            out.push_str(tag);
            out.push(TAG_SEP);
            out.push_str(&value.to_sidecar());
            out.push('\n');
        }
        out
    }

    /// Write the serialized record to `path`.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::ExistingOutput` if `path` exists and `force`
    /// is false, and `MetadataError::Io` if writing fails.
    pub fn write_sidecar(&self, path: &Path, force: bool) -> Result<(), MetadataError> {
        if path.exists() && !force {
            return Err(MetadataError::ExistingOutput(path.to_path_buf()));
        }
        let io_err = |source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = fs::File::create(path).map_err(io_err)?;
        file.write_all(self.serialize().as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)
    }

    /// Render a template with this record's formatted values.
    ///
    /// # Errors
    ///
    /// - `UnknownField` for a placeholder that is not registered
    /// - `MissingField` if the placeholder's tag is not in this record
    pub fn format(&self, registry: &Registry, template: &str) -> Result<String, MetadataError> {
        let mut out = String::new();
        for segment in template::resolve(registry, template)? {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Field(descriptor) => {
                    let value = self.entries.get(descriptor.tag()).ok_or_else(|| {
                        MetadataError::MissingField {
                            tag: descriptor.tag().to_string(),
                            placeholder: descriptor.placeholder().to_string(),
                            source_path: self.source.clone(),
                        }
                    })?;
                    out.push_str(&value.to_formatted());
                }
            }
        }
        Ok(out)
    }

    /// Extract a record from `text` using a template.
    ///
    /// # Errors
    ///
    /// - `PatternMismatch` unless `text` matches the template completely
    /// - `InvalidValue` if a captured group fails its type's decoding
    /// - `UnknownField` for unregistered placeholders
    pub fn parse_from_template(
        registry: &Registry,
        template: &str,
        text: &str,
    ) -> Result<Self, MetadataError> {
        let matcher = template::compile_matcher(registry, template)?;
        Self::from_matcher(&matcher, text)
    }

    /// Extract a record with an already compiled template.
    pub fn from_matcher(matcher: &Matcher<'_>, text: &str) -> Result<Self, MetadataError> {
        let mut record = Record::new();
        for (descriptor, captured) in matcher.captures(text)? {
            let value = descriptor.kind().from_formatted(descriptor.tag(), captured)?;
            record.entries.insert(descriptor.tag().to_string(), value);
        }
        Ok(record)
    }

    /// Add every tag of `other` that this record does not have yet.
    pub fn merge_append(&mut self, other: Record) -> &mut Self {
        for (tag, value) in other.entries {
            self.entries.entry(tag).or_insert(value);
        }
        self
    }

    /// Take every tag of `other`, replacing existing values.
    pub fn merge_overwrite(&mut self, other: Record) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    /// Set a single tag. The tag is lower-cased.
    pub fn set(&mut self, tag: &str, value: Value) -> &mut Self {
        self.entries.insert(tag.to_lowercase(), value);
        self
    }

    /// Get the value of a tag.
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.entries.get(tag)
    }

    /// Check whether a tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Iterate `(tag, value)` pairs in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the record has no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sidecar this record was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Keep only the given tags.
    pub fn restricted_to<'a>(&self, tags: impl IntoIterator<Item = &'a str>) -> Record {
        let mut out = Record::new();
        for tag in tags {
            if let Some(value) = self.entries.get(tag) {
                out.entries.insert(tag.to_string(), value.clone());
            }
        }
        out
    }
}
