// Deployment tools: listing plus the four lifecycle trigger mutations.
//
// The deployment lifecycle itself (queued, building, deploying, crashed, …)
// is owned by the remote platform; these tools read its status string or
// fire a single trigger, nothing more.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    clamped_limit, json_schema_number, json_schema_object, json_schema_string, InputObject, Tool,
    ToolRegistry,
};
use anyhow::{Context, Result};
use railway_core::types::Deployment;
use railway_core::{connection, format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Page size used when the caller does not pass `first`.
pub const DEFAULT_FIRST: u64 = 10;

/// Hard ceiling on one page of deployments.
pub const MAX_FIRST: u64 = 50;

const LIST_DEPLOYMENTS_QUERY: &str = "\
query deployments($input: DeploymentListInput!, $first: Int!) {
  deployments(input: $input, first: $first) {
    edges {
      node {
        id
        status
        createdAt
        updatedAt
        url
        staticUrl
        environmentId
        serviceId
        projectId
        meta
        canRedeploy
        canRollback
      }
    }
  }
}";

const GET_DEPLOYMENT_QUERY: &str = "\
query deployment($id: String!) {
  deployment(id: $id) {
    id
    status
    createdAt
    updatedAt
    url
    staticUrl
    environmentId
    serviceId
    projectId
    meta
    canRedeploy
    canRollback
  }
}";

const REDEPLOY_MUTATION: &str = "\
mutation deploymentRedeploy($id: String!) {
  deploymentRedeploy(id: $id) {
    id
    status
  }
}";

const RESTART_MUTATION: &str = "\
mutation deploymentRestart($id: String!) {
  deploymentRestart(id: $id)
}";

const CANCEL_MUTATION: &str = "\
mutation deploymentCancel($id: String!) {
  deploymentCancel(id: $id)
}";

const REMOVE_MUTATION: &str = "\
mutation deploymentRemove($id: String!) {
  deploymentRemove(id: $id)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDeploymentsArgs {
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    service_id: Option<String>,
    #[serde(default)]
    environment_id: Option<String>,
    #[serde(default)]
    first: Option<u64>,
}

/// Tool listing recent deployments, newest first.
pub struct ListDeploymentsTool {
    client: Arc<GraphQlClient>,
}

impl ListDeploymentsTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListDeploymentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_deployments".to_string(),
            description: format!(
                "List recent deployments, optionally filtered by project, service, or \
                 environment. Returns at most {} per call (default {})",
                MAX_FIRST, DEFAULT_FIRST
            ),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("Filter by project ID"),
                    "serviceId": json_schema_string("Filter by service ID"),
                    "environmentId": json_schema_string("Filter by environment ID"),
                    "first": json_schema_number("Number of deployments to return")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListDeploymentsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_deployments")?;

        let first = clamped_limit(args.first, DEFAULT_FIRST, MAX_FIRST);
        let input = InputObject::new()
            .set_opt("projectId", args.project_id)
            .set_opt("serviceId", args.service_id)
            .set_opt("environmentId", args.environment_id)
            .into_value();

        let data = self
            .client
            .execute(
                LIST_DEPLOYMENTS_QUERY,
                json!({"input": input, "first": first}),
            )
            .await?;

        let deployments: Vec<Deployment> =
            serde_json::from_value::<connection::Connection<Deployment>>(
                data["deployments"].clone(),
            )
            .context("Unexpected deployment list shape")?
            .into_nodes();

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &deployments,
        )?)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentIdArgs {
    deployment_id: String,
}

/// Tool fetching one deployment and its opaque lifecycle status.
pub struct GetDeploymentTool {
    client: Arc<GraphQlClient>,
}

impl GetDeploymentTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetDeploymentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_get_deployment".to_string(),
            description: "Get a deployment by ID, including its current status".to_string(),
            input_schema: json_schema_object(
                json!({"deploymentId": json_schema_string("The deployment ID")}),
                vec!["deploymentId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeploymentIdArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_get_deployment")?;

        let data = self
            .client
            .execute(GET_DEPLOYMENT_QUERY, json!({"id": args.deployment_id}))
            .await?;

        let deployment: Deployment = serde_json::from_value(data["deployment"].clone())
            .context("Unexpected deployment shape")?;

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &deployment,
        )?)))
    }
}

/// A deployment trigger mutation: redeploy, restart, cancel, or remove.
/// All four share the same single-ID shape.
struct DeploymentTrigger {
    client: Arc<GraphQlClient>,
    name: &'static str,
    description: &'static str,
    mutation: &'static str,
    confirmation: &'static str,
}

#[async_trait::async_trait]
impl Tool for DeploymentTrigger {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: json_schema_object(
                json!({"deploymentId": json_schema_string("The deployment ID")}),
                vec!["deploymentId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeploymentIdArgs = serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}", self.name))?;

        self.client
            .execute(self.mutation, json!({"id": args.deployment_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "{} {}",
            self.confirmation, args.deployment_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListDeploymentsTool::new(client.clone())));
    registry.register(Arc::new(GetDeploymentTool::new(client.clone())));
    registry.register(Arc::new(DeploymentTrigger {
        client: client.clone(),
        name: "railway_redeploy_deployment",
        description: "Redeploy an existing deployment",
        mutation: REDEPLOY_MUTATION,
        confirmation: "Triggered redeploy of deployment",
    }));
    registry.register(Arc::new(DeploymentTrigger {
        client: client.clone(),
        name: "railway_restart_deployment",
        description: "Restart a running deployment",
        mutation: RESTART_MUTATION,
        confirmation: "Restarted deployment",
    }));
    registry.register(Arc::new(DeploymentTrigger {
        client: client.clone(),
        name: "railway_cancel_deployment",
        description: "Cancel an in-progress deployment",
        mutation: CANCEL_MUTATION,
        confirmation: "Cancelled deployment",
    }));
    registry.register(Arc::new(DeploymentTrigger {
        client: client.clone(),
        name: "railway_remove_deployment",
        description: "Remove (take down) a deployment",
        mutation: REMOVE_MUTATION,
        confirmation: "Removed deployment",
    }));
}
