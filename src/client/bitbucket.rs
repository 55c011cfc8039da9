//! Bitbucket API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::Client as HttpClient;
use url::Url;

use super::api::{ListingApi, PermissionApi};
use super::models::{
    GroupPrivilege, Permission, PipelineRun, RawGroupPrivilege, RawPipelineRun, RawRepository,
    Repository,
};
use super::oauth::Session;
use super::pagination::{PageSource, fetch_all};
use crate::config::Endpoints;
use crate::error::{ApiError, ConfigError, Result};

/// Bitbucket allows 1000 authenticated API requests per hour per user
const REQUESTS_PER_HOUR: u32 = 1000;

/// Bitbucket REST API client bound to one authenticated session
pub struct BitbucketClient {
    http: HttpClient,
    endpoints: Endpoints,
    session: Session,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl BitbucketClient {
    /// Create a client that sends requests with `session`'s token
    pub fn new(http: HttpClient, endpoints: Endpoints, session: Session) -> Self {
        let quota = Quota::per_hour(NonZeroU32::new(REQUESTS_PER_HOUR).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            http,
            endpoints,
            session,
            rate_limiter,
        }
    }

    /// `GET /2.0/repositories/{account}`
    pub fn repositories_url(&self, account: &str) -> Result<Url> {
        join(&self.endpoints.api_url, &["2.0", "repositories", account])
    }

    /// `GET /2.0/users/{user}/repositories`
    pub fn user_repositories_url(&self, user: &str) -> Result<Url> {
        join(&self.endpoints.api_url, &["2.0", "users", user, "repositories"])
    }

    /// `GET /2.0/repositories/{account}/{repo}/pipelines/`
    pub fn pipelines_url(&self, account: &str, repo: &str) -> Result<Url> {
        join(
            &self.endpoints.api_url,
            &["2.0", "repositories", account, repo, "pipelines", ""],
        )
    }

    /// `GET /1.0/group-privileges/{account}/{account}/{group}`
    pub fn group_privileges_url(&self, account: &str, group: &str) -> Result<Url> {
        join(
            &self.endpoints.legacy_api_url,
            &["1.0", "group-privileges", account, account, group],
        )
    }

    /// `PUT /1.0/group-privileges/{account}/{repo}/{account}/{group}`
    pub fn repo_group_privilege_url(&self, account: &str, repo: &str, group: &str) -> Result<Url> {
        join(
            &self.endpoints.legacy_api_url,
            &["1.0", "group-privileges", account, repo, account, group],
        )
    }

    fn endpoint_error(status: reqwest::StatusCode, url: &Url) -> ApiError {
        ApiError::Endpoint {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}

/// Append path segments to a base URL, percent-encoding each one.
fn join(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ConfigError::InvalidUrl {
            name: "API base URL",
            reason: format!("{} cannot be used as a base", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl PageSource for BitbucketClient {
    async fn get_page(&self, url: &Url) -> Result<String> {
        self.rate_limiter.until_ready().await;

        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(self.session.access_token())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::endpoint_error(status, url).into());
        }

        Ok(response.text().await.map_err(ApiError::from)?)
    }
}

#[async_trait]
impl ListingApi for BitbucketClient {
    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>> {
        let url = self.repositories_url(account)?;
        fetch_all(self, url, |raw: RawRepository| Repository::from(raw)).await
    }

    async fn list_user_repositories(&self, user: &str) -> Result<Vec<Repository>> {
        let url = self.user_repositories_url(user)?;
        fetch_all(self, url, |raw: RawRepository| Repository::from(raw)).await
    }

    async fn list_pipelines(&self, account: &str, repo: &str) -> Result<Vec<PipelineRun>> {
        let url = self.pipelines_url(account, repo)?;
        fetch_all(self, url, |raw: RawPipelineRun| PipelineRun::from(raw)).await
    }

    async fn list_group_privileges(
        &self,
        account: &str,
        group: &str,
    ) -> Result<Vec<GroupPrivilege>> {
        let url = self.group_privileges_url(account, group)?;
        fetch_all(self, url, |raw: RawGroupPrivilege| GroupPrivilege::from(raw)).await
    }
}

#[async_trait]
impl PermissionApi for BitbucketClient {
    async fn set_group_privilege(
        &self,
        account: &str,
        repo: &str,
        group: &str,
        permission: Permission,
    ) -> Result<()> {
        let url = self.repo_group_privilege_url(account, repo, group)?;
        self.rate_limiter.until_ready().await;

        debug!("PUT {} ({})", url, permission);
        let response = self
            .http
            .put(url.clone())
            .bearer_auth(self.session.access_token())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(permission.as_str())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::endpoint_error(status, &url).into());
        }
        Ok(())
    }
}
