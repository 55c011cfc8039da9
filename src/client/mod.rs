//! Bitbucket API client

use reqwest::Client as HttpClient;

use crate::error::{ApiError, Result};

pub mod api;
pub mod bitbucket;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod oauth;
pub mod pagination;

pub use api::{ListingApi, PermissionApi};
pub use bitbucket::BitbucketClient;
#[cfg(test)]
pub use mock::MockBitbucketClient;
pub use oauth::{Authenticator, TerminalPrompt};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("bbcli/", env!("CARGO_PKG_VERSION"));

/// Full Bitbucket API surface used by the commands.
///
/// Blanket-implemented for anything providing every sub-trait.
pub trait BitbucketApi: ListingApi + PermissionApi {}

impl<T: ListingApi + PermissionApi> BitbucketApi for T {}

/// Shared HTTP client for the token exchange and API calls.
pub fn http_client() -> Result<HttpClient> {
    HttpClient::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ApiError::Network(e.to_string()).into())
}
