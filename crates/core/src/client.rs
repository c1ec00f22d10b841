//! GraphQL transport client for the Railway API.
//!
//! One shared client per process. Each call is a single bearer-authenticated
//! POST; there is no retry, no local timeout, and no HTTP status inspection
//! beyond what JSON parsing implies. Application-level errors in the
//! response body are aggregated into a single failure.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A single GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// The GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

/// One application-level error entry.
#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Client for executing GraphQL operations against the Railway API.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    config: Arc<ApiConfig>,
}

impl GraphQlClient {
    /// Create a client from configuration.
    ///
    /// A missing token is deliberately not an error here; it is reported per
    /// call so the server can start without credentials.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("railway-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Execute a GraphQL operation and return its `data` payload.
    ///
    /// Fails with [`Error::Config`] before any network I/O when no token is
    /// configured, and with [`Error::Api`] when the response carries error
    /// entries (messages `"; "`-joined, order preserved). A response with
    /// errors is never partially extracted.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let token = self.config.require_token()?;

        debug!(endpoint = %self.config.endpoint, "GraphQL request");

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .bearer_auth(token)
            .json(&GraphQlRequest {
                query,
                variables: &variables,
            })
            .send()
            .await?;

        let body: GraphQlResponse = response.json().await?;

        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(Error::Api(message));
            }
        }

        Ok(body.data.unwrap_or(Value::Null))
    }
}
