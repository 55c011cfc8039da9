//! OAuth2 authorization-code handshake
//!
//! The operator opens the printed authorization URL in a browser, approves
//! access, and pastes the URL Bitbucket redirected to. The code carried by
//! that URL is exchanged for an access token once per run.

use std::fmt;

use dialoguer::Input;
use log::debug;
use rand::Rng;
use rand::distributions::Alphanumeric;
use reqwest::Client as HttpClient;
use url::Url;

use super::models::TokenResponse;
use crate::config::{Credentials, Endpoints};
use crate::error::{AuthError, Result};

/// Length of the random `state` value sent with the authorization request
const STATE_LEN: usize = 30;

/// Authenticated session holding the access token for one run.
///
/// Never persisted. Expiry is not tracked: once the token lapses, API calls
/// fail with an endpoint error.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

impl Session {
    #[cfg(test)]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in: None,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Source of the redirect URL pasted by the operator.
pub trait RedirectPrompt: Send + Sync {
    /// Show `authorize_url` and return the full redirect URL.
    fn ask_redirect(&self, authorize_url: &Url) -> Result<String>;
}

impl<F> RedirectPrompt for F
where
    F: Fn(&Url) -> Result<String> + Send + Sync,
{
    fn ask_redirect(&self, authorize_url: &Url) -> Result<String> {
        self(authorize_url)
    }
}

/// Interactive prompt on the controlling terminal. Blocks with no timeout.
pub struct TerminalPrompt;

impl RedirectPrompt for TerminalPrompt {
    fn ask_redirect(&self, authorize_url: &Url) -> Result<String> {
        println!("Please go here and authorize: {}", authorize_url);
        let redirect: String = Input::new()
            .with_prompt("Paste the full redirect URL here")
            .interact_text()?;
        Ok(redirect)
    }
}

/// Runs the authorization-code flow for one set of credentials.
pub struct Authenticator<'a> {
    http: &'a HttpClient,
    credentials: &'a Credentials,
    endpoints: &'a Endpoints,
}

impl<'a> Authenticator<'a> {
    pub fn new(http: &'a HttpClient, credentials: &'a Credentials, endpoints: &'a Endpoints) -> Self {
        Self {
            http,
            credentials,
            endpoints,
        }
    }

    /// Perform the full handshake and return the resulting session.
    ///
    /// Credentials are validated before anything else, so a misconfigured
    /// run never reaches the network or the prompt.
    pub async fn authenticate(&self, prompt: &dyn RedirectPrompt) -> Result<Session> {
        self.credentials.validate()?;

        let state = generate_state();
        let authorize_url =
            authorization_url(&self.endpoints.authorize_url, &self.credentials.client_id, &state);
        debug!("Authorization URL: {}", authorize_url);

        let redirect = prompt.ask_redirect(&authorize_url)?;
        let code = extract_code(&redirect, &state)?;

        self.exchange_code(&code).await
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<Session> {
        let Credentials {
            client_id,
            client_secret,
            ..
        } = self.credentials;

        debug!("Requesting access token from {}", self.endpoints.token_url);
        let response = self
            .http
            .post(self.endpoints.token_url.clone())
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("username", client_id.as_str()),
                ("password", client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::TokenRequest(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::TokenRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;
        debug!(
            "Access token received (type {:?}, expires in {:?}s)",
            token.token_type, token.expires_in
        );

        Ok(Session::from(token))
    }
}

/// Random alphanumeric `state` for one authorization request.
pub fn generate_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LEN)
        .map(char::from)
        .collect()
}

/// Authorization page URL for `client_id` with the given `state`.
pub fn authorization_url(endpoint: &Url, client_id: &str, state: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("state", state);
    url
}

/// Pull the authorization code out of a pasted redirect URL.
pub fn extract_code(redirect: &str, expected_state: &str) -> Result<String> {
    let url = Url::parse(redirect.trim())
        .map_err(|e| AuthError::InvalidRedirect(format!("{} ({})", redirect.trim(), e)))?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(error) = param("error") {
        let reason = param("error_description").unwrap_or(error);
        return Err(AuthError::Denied(reason).into());
    }

    if param("state").as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch.into());
    }

    param("code")
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AuthError::MissingCode.into())
}
