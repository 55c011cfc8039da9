//! Permission API trait

use async_trait::async_trait;

use crate::client::models::Permission;
use crate::error::Result;

/// Group privilege writes on the legacy 1.0 API
#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// Create or replace the privilege `group` holds on `repo`.
    ///
    /// One request per call; there is no batching and nothing to roll back.
    async fn set_group_privilege(
        &self,
        account: &str,
        repo: &str,
        group: &str,
        permission: Permission,
    ) -> Result<()>;
}
