// Profile tool: who the configured token belongs to.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool, ToolRegistry};
use anyhow::{Context, Result};
use railway_core::types::User;
use railway_core::{format, GraphQlClient};
use serde_json::json;
use std::sync::Arc;

const PROFILE_QUERY: &str = "\
query me {
  me {
    id
    name
    email
    username
    workspaces {
      id
      name
    }
  }
}";

/// Tool returning the authenticated user's profile and workspaces.
pub struct GetProfileTool {
    client: Arc<GraphQlClient>,
}

impl GetProfileTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetProfileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_get_profile".to_string(),
            description: "Get the authenticated user's profile, including their workspaces"
                .to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let data = self.client.execute(PROFILE_QUERY, json!({})).await?;

        let user: User =
            serde_json::from_value(data["me"].clone()).context("Unexpected profile shape")?;

        Ok(CallToolResult::text(format::to_text(
            &serde_json::to_value(&user)?,
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(GetProfileTool::new(client.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use railway_core::ApiConfig;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"me": {
                    "id": "U1",
                    "name": "Dev",
                    "email": "dev@example.com",
                    "username": "dev",
                    "workspaces": [{"id": "W1", "name": "personal"}]
                }}
            })))
            .mount(&server)
            .await;

        let config = ApiConfig::new(Some("t".to_string()))
            .with_endpoint(Url::parse(&server.uri()).unwrap());
        let tool = GetProfileTool::new(Arc::new(GraphQlClient::new(config).unwrap()));

        let result = tool.execute(json!({})).await.unwrap();
        assert!(result.is_error.is_none());
        let crate::protocol::ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("dev@example.com"));
        assert!(text.contains("personal"));
    }
}
