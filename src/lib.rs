//! audio-organizer - sidecar metadata tools for audio collections
//!
//! Audio files are organized through editable text sidecars in ffmetadata
//! format (`<file>.metadata`). Tags are dumped from files, parsed from file
//! names with `%`-templates, edited by hand, and written back; files are
//! renamed and sorted into directories from the same templates.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, dispatches to handlers)
//! - [`engine`] - Batch driver and external tool calls
//! - [`core`] - Domain types, the metadata engine, naming rules, configuration
//! - [`ui`] - User-facing output
//! - [`logging`] - Diagnostic logging setup
//!
//! # Correctness Invariants
//!
//! 1. A sidecar always starts with `;FFMETADATA1` and is written in tag order
//! 2. A template must match a whole file name or nothing is extracted
//! 3. Outputs never silently overwrite existing files without `--force`
//! 4. Dry-run performs no writes and spawns no processes

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod ui;
