//! Bitbucket API data models
//!
//! Raw types mirror the JSON returned by each endpoint. Each one converts
//! into a flattened record with explicit defaults for missing fields.

mod auth;
mod pipeline;
mod privilege;
mod repo;

pub use auth::TokenResponse;
pub use pipeline::{PipelineRun, RawPipelineRun};
pub use privilege::{GroupPrivilege, Permission, RawGroupPrivilege};
pub use repo::{RawRepository, Repository};
