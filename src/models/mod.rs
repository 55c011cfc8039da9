//! Display models for CLI output
//!
//! Converts API records into CLI-friendly rows for table and JSON output.

pub mod display;

pub use display::{PipelineDisplay, PrivilegeDisplay, RepoDisplay};
