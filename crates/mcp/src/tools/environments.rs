// Environment tools: list, create, delete.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry};
use anyhow::{Context, Result};
use railway_core::types::Environment;
use railway_core::{connection, format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_ENVIRONMENTS_QUERY: &str = "\
query environments($projectId: String!) {
  environments(projectId: $projectId) {
    edges {
      node {
        id
        name
        isEphemeral
        createdAt
        updatedAt
      }
    }
  }
}";

const CREATE_ENVIRONMENT_MUTATION: &str = "\
mutation environmentCreate($input: EnvironmentCreateInput!) {
  environmentCreate(input: $input) {
    id
    name
  }
}";

const DELETE_ENVIRONMENT_MUTATION: &str = "\
mutation environmentDelete($id: String!) {
  environmentDelete(id: $id)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEnvironmentsArgs {
    project_id: String,
}

/// Tool listing the environments of a project.
pub struct ListEnvironmentsTool {
    client: Arc<GraphQlClient>,
}

impl ListEnvironmentsTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListEnvironmentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_environments".to_string(),
            description: "List all environments in a project".to_string(),
            input_schema: json_schema_object(
                json!({"projectId": json_schema_string("The project ID")}),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListEnvironmentsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_environments")?;

        let data = self
            .client
            .execute(LIST_ENVIRONMENTS_QUERY, json!({"projectId": args.project_id}))
            .await?;

        let environments: Vec<Environment> =
            serde_json::from_value::<connection::Connection<Environment>>(
                data["environments"].clone(),
            )
            .context("Unexpected environment list shape")?
            .into_nodes();

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &environments,
        )?)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEnvironmentArgs {
    project_id: String,
    name: String,
}

/// Tool creating an environment within a project.
pub struct CreateEnvironmentTool {
    client: Arc<GraphQlClient>,
}

impl CreateEnvironmentTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateEnvironmentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_environment".to_string(),
            description: "Create a new environment in a project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "name": json_schema_string("Name for the new environment, e.g. staging")
                }),
                vec!["projectId", "name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateEnvironmentArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_environment")?;

        let input = InputObject::new()
            .set("projectId", args.project_id)
            .set("name", args.name)
            .into_value();

        let data = self
            .client
            .execute(CREATE_ENVIRONMENT_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format::to_text(
            &data["environmentCreate"],
        )))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteEnvironmentArgs {
    environment_id: String,
}

/// Tool deleting an environment.
pub struct DeleteEnvironmentTool {
    client: Arc<GraphQlClient>,
}

impl DeleteEnvironmentTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteEnvironmentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_environment".to_string(),
            description: "Delete an environment and its service configuration. Irreversible."
                .to_string(),
            input_schema: json_schema_object(
                json!({"environmentId": json_schema_string("The environment ID")}),
                vec!["environmentId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteEnvironmentArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_environment")?;

        self.client
            .execute(DELETE_ENVIRONMENT_MUTATION, json!({"id": args.environment_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "Deleted environment {}",
            args.environment_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListEnvironmentsTool::new(client.clone())));
    registry.register(Arc::new(CreateEnvironmentTool::new(client.clone())));
    registry.register(Arc::new(DeleteEnvironmentTool::new(client.clone())));
}
