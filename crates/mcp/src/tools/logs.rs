// Log tools: build and deploy log retrieval.
//
// The log endpoints return plain lists, not paginated connections, so their
// results bypass the connection normalizer entirely.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    clamped_limit, json_schema_number, json_schema_object, json_schema_string, Tool, ToolRegistry,
};
use anyhow::{Context, Result};
use railway_core::types::LogLine;
use railway_core::{format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Line count used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: u64 = 100;

/// Hard ceiling on one batch of log lines.
pub const MAX_LIMIT: u64 = 500;

const BUILD_LOGS_QUERY: &str = "\
query buildLogs($deploymentId: String!, $limit: Int!) {
  buildLogs(deploymentId: $deploymentId, limit: $limit) {
    message
    severity
    timestamp
  }
}";

const DEPLOY_LOGS_QUERY: &str = "\
query deploymentLogs($deploymentId: String!, $limit: Int!) {
  deploymentLogs(deploymentId: $deploymentId, limit: $limit) {
    message
    severity
    timestamp
  }
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogArgs {
    deployment_id: String,
    #[serde(default)]
    limit: Option<u64>,
}

/// A log retrieval tool; build and deploy logs differ only in the query and
/// the field the lines come back under.
struct LogsTool {
    client: Arc<GraphQlClient>,
    name: &'static str,
    description: &'static str,
    query: &'static str,
    result_field: &'static str,
}

#[async_trait::async_trait]
impl Tool for LogsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: json_schema_object(
                json!({
                    "deploymentId": json_schema_string("The deployment ID"),
                    "limit": json_schema_number(&format!(
                        "Number of log lines to return (default {}, max {})",
                        DEFAULT_LIMIT, MAX_LIMIT
                    ))
                }),
                vec!["deploymentId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: LogArgs = serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}", self.name))?;

        let limit = clamped_limit(args.limit, DEFAULT_LIMIT, MAX_LIMIT);

        let data = self
            .client
            .execute(
                self.query,
                json!({"deploymentId": args.deployment_id, "limit": limit}),
            )
            .await?;

        // Plain list endpoint: no edge/node unwrapping.
        let lines: Vec<LogLine> = serde_json::from_value(data[self.result_field].clone())
            .with_context(|| format!("Unexpected log shape from {}", self.result_field))?;

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &lines,
        )?)))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(LogsTool {
        client: client.clone(),
        name: "railway_get_build_logs",
        description: "Get build logs for a deployment",
        query: BUILD_LOGS_QUERY,
        result_field: "buildLogs",
    }));
    registry.register(Arc::new(LogsTool {
        client: client.clone(),
        name: "railway_get_deploy_logs",
        description: "Get runtime (deploy) logs for a deployment",
        query: DEPLOY_LOGS_QUERY,
        result_field: "deploymentLogs",
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use railway_core::ApiConfig;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn deploy_logs_tool(server: &MockServer) -> LogsTool {
        let config = ApiConfig::new(Some("t".to_string()))
            .with_endpoint(Url::parse(&server.uri()).unwrap());
        LogsTool {
            client: Arc::new(GraphQlClient::new(config).unwrap()),
            name: "railway_get_deploy_logs",
            description: "Get runtime (deploy) logs for a deployment",
            query: DEPLOY_LOGS_QUERY,
            result_field: "deploymentLogs",
        }
    }

    #[tokio::test]
    async fn test_default_limit_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "variables": {"deploymentId": "D1", "limit": 100}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"deploymentLogs": [
                    {"message": "Listening on :8080", "severity": "info"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = deploy_logs_tool(&server);
        let result = tool.execute(json!({"deploymentId": "D1"})).await.unwrap();

        // The raw log list comes back untouched.
        let ToolContent::Text { text } = &result.content[0];
        let lines: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(lines.as_array().unwrap().len(), 1);
        assert_eq!(lines[0]["message"], "Listening on :8080");
    }

    #[tokio::test]
    async fn test_oversized_limit_is_clamped() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"limit": 500}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"deploymentLogs": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = deploy_logs_tool(&server);
        tool.execute(json!({"deploymentId": "D1", "limit": 99999}))
            .await
            .unwrap();
    }
}
