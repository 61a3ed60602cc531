//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Report lines, verbosity, and list formatting
//!
//! # Design
//!
//! All report output goes through this module so quiet, normal, and
//! verbose modes behave the same in every subprogram.

pub mod output;
