//! Command execution context
//!
//! Loads configuration, runs the OAuth handshake and builds the API client
//! that every networked command needs.

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{Authenticator, BitbucketApi, BitbucketClient, TerminalPrompt, http_client};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    pub config: Config,
    /// Authenticated API client
    pub client: Box<dyn BitbucketApi>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// Configuration is loaded and validated first, so missing credentials
    /// fail before the prompt is shown or any request is made.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        Self::with_config(Config::from_env()?, opts).await
    }

    /// Create a context from an already loaded configuration.
    pub async fn with_config(config: Config, opts: &GlobalOptions) -> Result<Self> {
        config.credentials.validate()?;

        let http = http_client()?;
        let session = Authenticator::new(&http, &config.credentials, &config.endpoints)
            .authenticate(&TerminalPrompt)
            .await?;
        debug!(
            "Authenticated for account {} ({} token, expires in {:?}s)",
            config.account_id(),
            session.token_type().unwrap_or("bearer"),
            session.expires_in()
        );

        let client = Box::new(BitbucketClient::new(http, config.endpoints.clone(), session));

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }

    /// Account every repository path is scoped to
    pub fn account_id(&self) -> &str {
        self.config.account_id()
    }
}
