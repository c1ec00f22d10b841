//! Configuration for the Railway API client.
//!
//! Configuration is read from the environment exactly once at startup and
//! passed into [`crate::GraphQlClient`]; request handlers never touch the
//! environment themselves.

use crate::error::{Error, Result};
use url::Url;

/// Public GraphQL endpoint of the Railway control plane.
pub const DEFAULT_API_URL: &str = "https://backboard.railway.app/graphql/v2";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "RAILWAY_API_TOKEN";

/// Environment variable overriding the GraphQL endpoint (self-hosted
/// gateways, tests).
pub const API_URL_ENV_VAR: &str = "RAILWAY_API_URL";

/// Configuration for the GraphQL client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endpoint GraphQL operations are POSTed to.
    pub endpoint: Url,

    /// API token. `None` means every call fails with a configuration error
    /// instead of reaching the network.
    pub token: Option<String>,
}

impl ApiConfig {
    /// Create a config with the default public endpoint.
    pub fn new(token: Option<String>) -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_API_URL).expect("default endpoint is a valid URL"),
            token,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// A missing token is not an error here: the server should start (and
    /// serve `tools/list`) without credentials, failing per call instead.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
        let mut config = Self::new(token);

        if let Ok(raw) = std::env::var(API_URL_ENV_VAR) {
            config.endpoint = Url::parse(&raw)
                .map_err(|e| Error::Config(format!("invalid {}: {}", API_URL_ENV_VAR, e)))?;
        }

        Ok(config)
    }

    /// Override the endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// The configured token, or the configuration error naming the missing
    /// variable.
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::Config(format!("{} is not set", TOKEN_ENV_VAR)))
    }
}
