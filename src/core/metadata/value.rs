//! core::metadata::value
//!
//! Typed metadata values and their two text encodings.
//!
//! # Encodings
//!
//! Every value has a *sidecar* form (what appears after `tag=` in an
//! ffmetadata file) and a *formatted* form (what appears in file names and
//! templates). The two only differ for lists:
//!
//! | Kind | Sidecar | Formatted |
//! |------|---------|-----------|
//! | text | `My Song` | `My Song` |
//! | list | `Alice\; Bob` | `Alice,Bob` |
//! | positive integer | `7` | `7` |
//!
//! # Example
//!
//! ```
//! use audio_organizer::core::metadata::{Value, ValueKind};
//!
//! let artists = ValueKind::List.from_sidecar("artist", "Alice\\; Bob").unwrap();
//! assert_eq!(artists, Value::list(["Alice", "Bob"]));
//! assert_eq!(artists.to_formatted(), "Alice,Bob");
//! ```

use std::fmt;

use super::MetadataError;
use crate::core::types::PosInt;

/// Separator between list items in the sidecar form.
pub const SIDECAR_LIST_SEP: &str = "\\; ";

/// Separator between list items in the formatted form.
pub const FORMATTED_LIST_SEP: &str = ",";

/// The encoding rules a descriptor applies to its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free text, identical in both forms.
    Text,
    /// List of strings, joined differently per form.
    List,
    /// Strictly positive integer.
    PositiveInt,
}

impl ValueKind {
    /// Decode the sidecar form of a value.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::InvalidValue` if a numeric kind gets text that
    /// is not a positive integer.
    pub fn from_sidecar(self, tag: &str, raw: &str) -> Result<Value, MetadataError> {
        match self {
            ValueKind::List => Ok(Value::List(
                raw.split(SIDECAR_LIST_SEP).map(str::to_string).collect(),
            )),
            _ => self.decode_scalar(tag, raw),
        }
    }

    /// Decode the formatted form of a value.
    ///
    /// # Errors
    ///
    /// Same as [`from_sidecar`](Self::from_sidecar).
    pub fn from_formatted(self, tag: &str, raw: &str) -> Result<Value, MetadataError> {
        match self {
            ValueKind::List => Ok(Value::List(
                raw.split(FORMATTED_LIST_SEP).map(str::to_string).collect(),
            )),
            _ => self.decode_scalar(tag, raw),
        }
    }

    fn decode_scalar(self, tag: &str, raw: &str) -> Result<Value, MetadataError> {
        match self {
            ValueKind::PositiveInt => {
                PosInt::parse(raw)
                    .map(Value::Number)
                    .map_err(|source| MetadataError::InvalidValue {
                        tag: tag.to_string(),
                        source,
                    })
            }
            _ => Ok(Value::Text(raw.to_string())),
        }
    }
}

/// A decoded metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    List(Vec<String>),
    Number(PosInt),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Create a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Create a numeric value.
    pub fn number(n: PosInt) -> Self {
        Value::Number(n)
    }

    /// Encode for an ffmetadata sidecar line.
    pub fn to_sidecar(&self) -> String {
        match self {
            Value::List(items) => items.join(SIDECAR_LIST_SEP),
            _ => self.scalar_string(),
        }
    }

    /// Encode for file names and templates.
    pub fn to_formatted(&self) -> String {
        match self {
            Value::List(items) => items.join(FORMATTED_LIST_SEP),
            _ => self.scalar_string(),
        }
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<PosInt> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn scalar_string(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::List(items) => items.join(FORMATTED_LIST_SEP),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sidecar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_forms_identical() {
        let v = ValueKind::Text.from_sidecar("title", "My Song").unwrap();
        assert_eq!(v, Value::text("My Song"));
        assert_eq!(v.to_sidecar(), "My Song");
        assert_eq!(v.to_formatted(), "My Song");
    }

    #[test]
    fn list_sidecar_form() {
        let v = ValueKind::List.from_sidecar("artist", "Alice\\; Bob").unwrap();
        assert_eq!(v, Value::list(["Alice", "Bob"]));
        assert_eq!(v.to_sidecar(), "Alice\\; Bob");
        assert_eq!(v.to_formatted(), "Alice,Bob");
    }

    #[test]
    fn list_formatted_form() {
        let v = ValueKind::List.from_formatted("artist", "Alice,Bob").unwrap();
        assert_eq!(v, Value::list(["Alice", "Bob"]));
    }

    #[test]
    fn single_item_list() {
        let v = ValueKind::List.from_formatted("artist", "Alice").unwrap();
        assert_eq!(v, Value::list(["Alice"]));
        assert_eq!(v.to_sidecar(), "Alice");
    }

    #[test]
    fn number_roundtrip() {
        let v = ValueKind::PositiveInt.from_sidecar("track", "7").unwrap();
        assert_eq!(v.as_number().map(PosInt::get), Some(7));
        assert_eq!(v.to_sidecar(), "7");
        assert_eq!(v.to_formatted(), "7");
    }

    #[test]
    fn number_rejects_non_positive() {
        for raw in ["0", "-1", "abc"] {
            for kind_tag in ["disc", "track", "year"] {
                let err = ValueKind::PositiveInt
                    .from_formatted(kind_tag, raw)
                    .unwrap_err();
                assert!(
                    matches!(err, MetadataError::InvalidValue { ref tag, .. } if tag == kind_tag),
                    "{raw} for {kind_tag}: {err}"
                );
            }
        }
    }
}
