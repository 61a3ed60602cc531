//! core
//!
//! Core domain types, the metadata engine, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: PosInt, TrackCounts
//! - [`metadata`] - Value registry, records, and templates
//! - [`naming`] - File name substitution rules
//! - [`paths`] - Sidecar and extension path helpers
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - The registry is built once and passed explicitly; there is no global state
//! - Nothing in `core` spawns processes or prints

pub mod config;
pub mod metadata;
pub mod naming;
pub mod paths;
pub mod types;
