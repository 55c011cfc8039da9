//! Listing API trait for collection operations

use async_trait::async_trait;

use crate::client::models::{GroupPrivilege, PipelineRun, Repository};
use crate::error::Result;

/// Collection reads. Every method walks all pages before returning.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// All repositories owned by `account`
    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>>;

    /// Repositories visible for `user`
    async fn list_user_repositories(&self, user: &str) -> Result<Vec<Repository>>;

    /// Pipeline runs of one repository
    async fn list_pipelines(&self, account: &str, repo: &str) -> Result<Vec<PipelineRun>>;

    /// Privileges `group` holds on the repositories of `account`
    async fn list_group_privileges(&self, account: &str, group: &str)
    -> Result<Vec<GroupPrivilege>>;
}
