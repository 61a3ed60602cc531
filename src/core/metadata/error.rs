//! core::metadata::error
//!
//! Errors raised by the metadata engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from registry, record and template operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata header line ';FFMETADATA1' missing{}", source_suffix(.source_path))]
    MalformedHeader { source_path: Option<PathBuf> },

    #[error("line {line} is not 'tag=value': '{content}'{}", source_suffix(.source_path))]
    MalformedLine {
        line: usize,
        content: String,
        source_path: Option<PathBuf>,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("tag '{tag}' required by '{placeholder}' is not defined{}", source_suffix(.source_path))]
    MissingField {
        tag: String,
        placeholder: String,
        source_path: Option<PathBuf>,
    },

    #[error("'{text}' does not match pattern '{template}'")]
    PatternMismatch { text: String, template: String },

    #[error("invalid value for tag '{tag}': {source}")]
    InvalidValue {
        tag: String,
        #[source]
        source: TypeError,
    },

    #[error("descriptor already registered: {0}")]
    DuplicateDescriptor(String),

    #[error("file '{}' already exists", .0.display())]
    ExistingOutput(PathBuf),

    #[error("invalid match pattern for '{template}': {message}")]
    InvalidPattern { template: String, message: String },

    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MetadataError {
    /// True if the error means a sidecar file on disk is corrupt.
    ///
    /// Batch drivers halt on these instead of moving to the next record.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            MetadataError::MalformedHeader { .. } | MetadataError::MalformedLine { .. }
        )
    }
}

fn source_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in '{}'", p.display()),
        None => String::new(),
    }
}
