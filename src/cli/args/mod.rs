//! Argument types shared by the CLI commands

pub mod common;
pub mod global;

pub use common::{GrantLevel, OutputFormat};
pub use global::GlobalOptions;
