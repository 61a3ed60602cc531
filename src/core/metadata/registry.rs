//! core::metadata::registry
//!
//! The value type registry: which tags exist, which placeholder each one is
//! bound to, and how its values are matched and decoded.
//!
//! # Construction
//!
//! Descriptors are added to a [`RegistryBuilder`] once at startup. Building
//! yields an immutable [`Registry`] that is passed by reference to every
//! record and template operation.
//!
//! ```
//! use audio_organizer::core::metadata::{Registry, ValueKind};
//!
//! let mut builder = Registry::builder();
//! builder.register("album", "%A", ".+", ValueKind::Text).unwrap();
//! builder.register_default().unwrap();
//! assert!(builder.register("album", "%X", ".+", ValueKind::Text).is_err());
//!
//! let registry = builder.build();
//! assert_eq!(registry.lookup_by_placeholder("%A", false).unwrap().tag(), "album");
//! assert!(registry.lookup_by_tag("comment", false).is_err());
//! assert!(registry.lookup_by_tag("comment", true).unwrap().is_default());
//! ```

use std::collections::HashMap;

use super::{MetadataError, ValueKind};

/// Tag and placeholder of the catch-all descriptor.
pub const DEFAULT_TAG: &str = "*";

/// A registered value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    tag: String,
    placeholder: String,
    regex: String,
    kind: ValueKind,
}

impl Descriptor {
    /// The tag this descriptor decodes (e.g. `"artist"`).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The template placeholder (e.g. `"%a"`).
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Regex fragment used when matching file names.
    pub fn regex(&self) -> &str {
        &self.regex
    }

    /// Encoding rules for values of this tag.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// True for the catch-all descriptor.
    pub fn is_default(&self) -> bool {
        self.tag == DEFAULT_TAG
    }
}

/// Collects descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    descriptors: Vec<Descriptor>,
}

impl RegistryBuilder {
    /// Register a value type.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::DuplicateDescriptor` if the tag or the
    /// placeholder is already taken.
    pub fn register(
        &mut self,
        tag: &str,
        placeholder: &str,
        regex: &str,
        kind: ValueKind,
    ) -> Result<&mut Self, MetadataError> {
        if let Some(existing) = self
            .descriptors
            .iter()
            .find(|d| d.tag == tag || d.placeholder == placeholder)
        {
            return Err(MetadataError::DuplicateDescriptor(format!(
                "'{}' ({}) conflicts with '{}' ({})",
                tag, placeholder, existing.tag, existing.placeholder
            )));
        }
        self.push(tag, placeholder, regex, kind);
        Ok(self)
    }

    fn push(&mut self, tag: &str, placeholder: &str, regex: &str, kind: ValueKind) {
        self.descriptors.push(Descriptor {
            tag: tag.to_string(),
            placeholder: placeholder.to_string(),
            regex: regex.to_string(),
            kind,
        });
    }

    /// Register the catch-all descriptor used for unrecognized tags.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::DuplicateDescriptor` if called twice.
    pub fn register_default(&mut self) -> Result<&mut Self, MetadataError> {
        self.register(DEFAULT_TAG, DEFAULT_TAG, ".+", ValueKind::Text)
    }

    /// Freeze the registry.
    pub fn build(self) -> Registry {
        let mut by_tag = HashMap::new();
        let mut by_placeholder = HashMap::new();
        let mut default = None;
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            by_tag.insert(descriptor.tag.clone(), index);
            by_placeholder.insert(descriptor.placeholder.clone(), index);
            if descriptor.is_default() {
                default = Some(index);
            }
        }
        let registered: Vec<usize> = self
            .descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_default())
            .map(|(index, _)| index)
            .collect();
        let mut sorted = registered.clone();
        sorted.sort_by(|&a, &b| self.descriptors[a].tag.cmp(&self.descriptors[b].tag));
        Registry {
            descriptors: self.descriptors,
            by_tag,
            by_placeholder,
            default,
            registered,
            sorted,
        }
    }
}

/// Immutable lookup tables from tags and placeholders to descriptors.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: Vec<Descriptor>,
    by_tag: HashMap<String, usize>,
    by_placeholder: HashMap<String, usize>,
    default: Option<usize>,
    /// Non-default descriptor indices in registration order.
    registered: Vec<usize>,
    /// The same indices ordered by tag.
    sorted: Vec<usize>,
}

impl Registry {
    /// Start an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The standard field table used by every subprogram.
    ///
    /// | Placeholder | Tag | Kind |
    /// |---|---|---|
    /// | `%A` | album | text |
    /// | `%T` | title | text |
    /// | `%a` | artist | list |
    /// | `%d` | disc | positive integer |
    /// | `%t` | track | positive integer |
    /// | `%y` | year | positive integer |
    /// | `%g` | genre | text |
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        let table: [(&str, &str, &str, ValueKind); 7] = [
            ("album", "%A", ".+", ValueKind::Text),
            ("title", "%T", ".+", ValueKind::Text),
            ("artist", "%a", ".+", ValueKind::List),
            ("disc", "%d", "\\d+", ValueKind::PositiveInt),
            ("track", "%t", "\\d+", ValueKind::PositiveInt),
            ("year", "%y", "\\d+", ValueKind::PositiveInt),
            ("genre", "%g", ".+", ValueKind::Text),
        ];
        // The table is fixed and conflict-free (checked in tests), so the
        // duplicate checks of `register` are skipped here.
        for (tag, placeholder, regex, kind) in table {
            builder.push(tag, placeholder, regex, kind);
        }
        builder.push(DEFAULT_TAG, DEFAULT_TAG, ".+", ValueKind::Text);
        builder.build()
    }

    /// Look up a descriptor by placeholder (e.g. `"%a"`).
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::UnknownField` if the placeholder is not
    /// registered and `allow_default` is false (or there is no default).
    pub fn lookup_by_placeholder(
        &self,
        placeholder: &str,
        allow_default: bool,
    ) -> Result<&Descriptor, MetadataError> {
        self.resolve(self.by_placeholder.get(placeholder), allow_default)
            .ok_or_else(|| MetadataError::UnknownField(placeholder.to_string()))
    }

    /// Look up a descriptor by tag (e.g. `"artist"`).
    ///
    /// # Errors
    ///
    /// Same as [`lookup_by_placeholder`](Self::lookup_by_placeholder).
    pub fn lookup_by_tag(&self, tag: &str, allow_default: bool) -> Result<&Descriptor, MetadataError> {
        self.resolve(self.by_tag.get(tag), allow_default)
            .ok_or_else(|| MetadataError::UnknownField(tag.to_string()))
    }

    fn resolve(&self, found: Option<&usize>, allow_default: bool) -> Option<&Descriptor> {
        let index = match found {
            Some(&index) => Some(index),
            None if allow_default => self.default,
            None => None,
        }?;
        self.descriptors.get(index)
    }

    /// Iterate registered tags, excluding the default.
    ///
    /// Each call returns a fresh iterator.
    pub fn list_tags(&self, sorted: bool) -> impl Iterator<Item = &str> + '_ {
        let order = if sorted { &self.sorted } else { &self.registered };
        order
            .iter()
            .filter_map(move |&index| self.descriptors.get(index))
            .map(|d| d.tag.as_str())
    }

    /// Iterate non-default descriptors sorted by tag.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> + '_ {
        self.sorted
            .iter()
            .filter_map(move |&index| self.descriptors.get(index))
    }

    /// Short help listing such as `"%A=album, %a=artist"`.
    pub fn fields_help(&self) -> String {
        self.descriptors()
            .map(|d| format!("{}={}", d.placeholder, d.tag))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
