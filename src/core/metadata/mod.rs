//! core::metadata
//!
//! The metadata format engine.
//!
//! # Modules
//!
//! - [`registry`] - Value type descriptors and their lookup tables
//! - [`value`] - Typed values and their sidecar/formatted encodings
//! - [`template`] - Template scanning and match pattern compilation
//! - [`record`] - The tagged record with ffmetadata and template conversions
//! - [`error`] - Error kinds shared by the above
//!
//! # Sidecar Format
//!
//! ```text
//! ;FFMETADATA1
//! album=Some Album
//! artist=Alice\; Bob
//! track=3
//! ```
//!
//! # Example
//!
//! ```
//! use audio_organizer::core::metadata::{Record, Registry};
//!
//! let registry = Registry::standard();
//! let record = Record::parse_from_template(&registry, "%t. %a - %T", "03. Alice - Song").unwrap();
//! assert_eq!(record.format(&registry, "%a/%t").unwrap(), "Alice/3");
//! ```

pub mod error;
pub mod record;
pub mod registry;
pub mod template;
pub mod value;

pub use error::MetadataError;
pub use record::{Record, HEADER_LINE};
pub use registry::{Descriptor, Registry, RegistryBuilder, DEFAULT_TAG};
pub use template::{compile_matcher, Matcher};
pub use value::{Value, ValueKind};
