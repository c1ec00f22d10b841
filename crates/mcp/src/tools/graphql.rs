// Raw GraphQL escape hatch.
//
// The fixed catalog cannot cover every remote capability; this tool
// forwards an arbitrary operation unmodified so callers always have a
// fallback. The pass-through is deliberately unrestricted.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool, ToolRegistry};
use anyhow::{Context, Result};
use railway_core::{format, GraphQlClient};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RunGraphQlArgs {
    query: String,
    #[serde(default)]
    variables: Option<Value>,
}

/// Tool executing an arbitrary GraphQL operation against the Railway API.
pub struct RunGraphQlTool {
    client: Arc<GraphQlClient>,
}

impl RunGraphQlTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for RunGraphQlTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_run_graphql".to_string(),
            description:
                "Execute an arbitrary GraphQL query or mutation against the Railway API. Use \
                 this as a fallback for operations not covered by the other tools."
                    .to_string(),
            input_schema: json_schema_object(
                json!({
                    "query": json_schema_string("The GraphQL operation to execute"),
                    "variables": {
                        "type": "object",
                        "description": "Variables for the operation"
                    }
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: RunGraphQlArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_run_graphql")?;

        let data = self
            .client
            .execute(&args.query, args.variables.unwrap_or_else(|| json!({})))
            .await?;

        Ok(CallToolResult::text(format::to_text(&data)))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(RunGraphQlTool::new(client.clone())));
}
