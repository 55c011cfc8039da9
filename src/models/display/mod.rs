//! Display model implementations for table and JSON output

mod common;
mod pipeline;
mod privilege;
mod repo;

pub use pipeline::PipelineDisplay;
pub use privilege::PrivilegeDisplay;
pub use repo::RepoDisplay;
