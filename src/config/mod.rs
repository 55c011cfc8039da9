//! Configuration management for bbcli
//!
//! Everything is sourced from the environment. Credentials are validated
//! here so that a misconfigured run stops before any network I/O.

use std::fmt;

use url::Url;

use crate::error::{ConfigError, Result};

/// Environment variable holding the Bitbucket workspace/account id
pub const ACCOUNT_ID_VAR: &str = "BB_ACCOUNT_ID";
/// Environment variable holding the OAuth consumer key
pub const CLIENT_ID_VAR: &str = "BB_OAUTH_ID";
/// Environment variable holding the OAuth consumer secret
pub const CLIENT_SECRET_VAR: &str = "BB_OAUTH_SECRET";

const AUTHORIZE_URL_VAR: &str = "BB_AUTH_URL";
const TOKEN_URL_VAR: &str = "BB_TOKEN_URL";
const API_URL_VAR: &str = "BB_API_URL";
const LEGACY_API_URL_VAR: &str = "BB_LEGACY_API_URL";

const DEFAULT_AUTHORIZE_URL: &str = "https://bitbucket.org/site/oauth2/authorize";
const DEFAULT_TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";
const DEFAULT_API_URL: &str = "https://api.bitbucket.org/";
const DEFAULT_LEGACY_API_URL: &str = "https://bitbucket.org/api/";

/// OAuth consumer credentials and the account they operate on.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub account_id: String,
}

impl Credentials {
    /// Check that every field is non-empty.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (CLIENT_ID_VAR, &self.client_id),
            (CLIENT_SECRET_VAR, &self.client_secret),
            (ACCOUNT_ID_VAR, &self.account_id),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingCredential(name).into());
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Remote endpoints used by the CLI.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// OAuth2 authorization page shown to the operator
    pub authorize_url: Url,
    /// OAuth2 token exchange endpoint
    pub token_url: Url,
    /// Base of the 2.0 REST API
    pub api_url: Url,
    /// Base of the legacy 1.0 API (group privileges)
    pub legacy_api_url: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize_url: Url::parse(DEFAULT_AUTHORIZE_URL).expect("valid default URL"),
            token_url: Url::parse(DEFAULT_TOKEN_URL).expect("valid default URL"),
            api_url: Url::parse(DEFAULT_API_URL).expect("valid default URL"),
            legacy_api_url: Url::parse(DEFAULT_LEGACY_API_URL).expect("valid default URL"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingCredential(name).into())
        };

        let credentials = Credentials {
            account_id: required(ACCOUNT_ID_VAR)?,
            client_id: required(CLIENT_ID_VAR)?,
            client_secret: required(CLIENT_SECRET_VAR)?,
        };

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            authorize_url: url_override(&lookup, AUTHORIZE_URL_VAR, defaults.authorize_url)?,
            token_url: url_override(&lookup, TOKEN_URL_VAR, defaults.token_url)?,
            api_url: url_override(&lookup, API_URL_VAR, defaults.api_url)?,
            legacy_api_url: url_override(&lookup, LEGACY_API_URL_VAR, defaults.legacy_api_url)?,
        };

        Ok(Self {
            credentials,
            endpoints,
        })
    }

    /// Account id every repository path is scoped to
    pub fn account_id(&self) -> &str {
        &self.credentials.account_id
    }
}

fn url_override<F>(lookup: &F, name: &'static str, default: Url) -> Result<Url>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => Url::parse(raw.trim()).map_err(|e| {
            ConfigError::InvalidUrl {
                name,
                reason: e.to_string(),
            }
            .into()
        }),
        None => Ok(default),
    }
}
