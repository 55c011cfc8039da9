//! Error types for bbcli

use thiserror::Error;

/// Result type alias for bbcli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors raised while talking to the Bitbucket REST API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Any non-2xx response. Fatal for the operation in progress.
    #[error("API request error, code {status} ({url})")]
    Endpoint { status: u16, url: String },

    /// Body could not be decoded as a page. The fetcher logs this and
    /// treats the page as empty instead of returning it.
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// OAuth2 authorization-code handshake failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization was denied: {0}")]
    Denied(String),

    #[error("Redirect URL is not valid: {0}")]
    InvalidRedirect(String),

    #[error("Redirect URL does not contain an authorization code")]
    MissingCode,

    #[error("Redirect URL state does not match the issued authorization request")]
    StateMismatch,

    #[error("Token request failed: {0}")]
    TokenRequest(String),

    #[error("Token endpoint returned status {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("Token endpoint returned an unreadable response: {0}")]
    InvalidTokenResponse(String),
}

/// Configuration-related errors, all raised before any network call
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("You must set all the environment variables for the OAuth flow to work ({0} is missing)")]
    MissingCredential(&'static str),

    #[error("Invalid URL in {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("missing group name")]
    MissingGroup,

    #[error("wrong backup file: no path given")]
    MissingBackupPath,

    #[error("wrong backup file: {0} does not exist")]
    BackupNotFound(String),

    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),
}
