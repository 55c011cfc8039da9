//! Mock Bitbucket API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{ListingApi, PermissionApi};
use super::models::{GroupPrivilege, Permission, PipelineRun, Repository};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockBitbucketClient::new()
///     .with_repositories(vec![repo("r1", "2024-01-02")])
///     .await;
///
/// let repos = mock.list_repositories("acme").await?;
/// assert_eq!(repos.len(), 1);
/// ```
#[derive(Default)]
pub struct MockBitbucketClient {
    repositories: Arc<Mutex<Vec<Repository>>>,
    user_repositories: Arc<Mutex<Vec<Repository>>>,
    pipelines: Arc<Mutex<Vec<PipelineRun>>>,
    privileges: Arc<Mutex<Vec<GroupPrivilege>>>,
    /// Error to return on the next call, consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Repositories whose privilege PUT fails with the given status
    failing_repos: Arc<Mutex<HashMap<String, u16>>>,
    call_count: Arc<Mutex<CallCounts>>,
    /// Every privilege write, in call order
    grants: Arc<Mutex<Vec<CapturedGrant>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_repositories: usize,
    pub list_user_repositories: usize,
    pub list_pipelines: usize,
    pub list_group_privileges: usize,
    pub set_group_privilege: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_repositories
            + self.list_user_repositories
            + self.list_pipelines
            + self.list_group_privileges
            + self.set_group_privilege
    }
}

/// A captured privilege write for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedGrant {
    pub account: String,
    pub repo: String,
    pub group: String,
    pub permission: Permission,
}

impl MockBitbucketClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_repositories(self, repositories: Vec<Repository>) -> Self {
        *self.repositories.lock().await = repositories;
        self
    }

    pub async fn with_user_repositories(self, repositories: Vec<Repository>) -> Self {
        *self.user_repositories.lock().await = repositories;
        self
    }

    pub async fn with_pipelines(self, pipelines: Vec<PipelineRun>) -> Self {
        *self.pipelines.lock().await = pipelines;
        self
    }

    pub async fn with_privileges(self, privileges: Vec<GroupPrivilege>) -> Self {
        *self.privileges.lock().await = privileges;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Make the privilege write for `repo` fail with `status`.
    pub async fn with_failing_repo(self, repo: &str, status: u16) -> Self {
        self.failing_repos
            .lock()
            .await
            .insert(repo.to_string(), status);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all privilege writes for test assertions.
    pub async fn grants(&self) -> Vec<CapturedGrant> {
        self.grants.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ListingApi for MockBitbucketClient {
    async fn list_repositories(&self, _account: &str) -> Result<Vec<Repository>> {
        self.check_error().await?;
        self.call_count.lock().await.list_repositories += 1;
        Ok(self.repositories.lock().await.clone())
    }

    async fn list_user_repositories(&self, _user: &str) -> Result<Vec<Repository>> {
        self.check_error().await?;
        self.call_count.lock().await.list_user_repositories += 1;
        Ok(self.user_repositories.lock().await.clone())
    }

    async fn list_pipelines(&self, _account: &str, repo: &str) -> Result<Vec<PipelineRun>> {
        self.check_error().await?;
        self.call_count.lock().await.list_pipelines += 1;

        let pipelines = self.pipelines.lock().await;
        Ok(pipelines.iter().filter(|p| p.repo == repo).cloned().collect())
    }

    async fn list_group_privileges(
        &self,
        _account: &str,
        group: &str,
    ) -> Result<Vec<GroupPrivilege>> {
        self.check_error().await?;
        self.call_count.lock().await.list_group_privileges += 1;

        let privileges = self.privileges.lock().await;
        Ok(privileges
            .iter()
            .filter(|p| p.group.as_deref().is_none_or(|g| g == group))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PermissionApi for MockBitbucketClient {
    async fn set_group_privilege(
        &self,
        account: &str,
        repo: &str,
        group: &str,
        permission: Permission,
    ) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.set_group_privilege += 1;

        if let Some(status) = self.failing_repos.lock().await.get(repo) {
            return Err(ApiError::Endpoint {
                status: *status,
                url: format!("mock://1.0/group-privileges/{}/{}/{}/{}", account, repo, account, group),
            }
            .into());
        }

        self.grants.lock().await.push(CapturedGrant {
            account: account.to_string(),
            repo: repo.to_string(),
            group: group.to_string(),
            permission,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privilege(repo: &str, group: &str, privilege: Permission) -> GroupPrivilege {
        GroupPrivilege {
            repo: repo.to_string(),
            privilege,
            group: Some(group.to_string()),
        }
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockBitbucketClient::new();
        assert!(mock.list_repositories("acme").await.unwrap().is_empty());
        assert!(mock.list_pipelines("acme", "r").await.unwrap().is_empty());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockBitbucketClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.list_repositories("acme").await.is_err());
        // consumed
        assert!(mock.list_repositories("acme").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_filters_privileges_by_group() {
        let mock = MockBitbucketClient::new()
            .with_privileges(vec![
                privilege("a", "devs", Permission::Read),
                privilege("b", "ops", Permission::Admin),
            ])
            .await;

        let devs = mock.list_group_privileges("acme", "devs").await.unwrap();
        assert_eq!(devs.len(), 1);
        assert_eq!(devs[0].repo, "a");
    }

    #[tokio::test]
    async fn test_mock_client_records_grants_and_failures() {
        let mock = MockBitbucketClient::new().with_failing_repo("bad", 403).await;

        mock.set_group_privilege("acme", "good", "devs", Permission::Write)
            .await
            .unwrap();
        assert!(
            mock.set_group_privilege("acme", "bad", "devs", Permission::Write)
                .await
                .is_err()
        );

        let grants = mock.grants().await;
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].repo, "good");
        assert_eq!(mock.call_counts().await.set_group_privilege, 2);
    }
}
