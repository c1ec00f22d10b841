// Domain tools: list, create service/custom domains, delete.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_number, json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry,
};
use anyhow::{Context, Result};
use railway_core::{format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_DOMAINS_QUERY: &str = "\
query domains($projectId: String!, $environmentId: String!, $serviceId: String!) {
  domains(projectId: $projectId, environmentId: $environmentId, serviceId: $serviceId) {
    serviceDomains {
      id
      domain
    }
    customDomains {
      id
      domain
    }
  }
}";

const CREATE_SERVICE_DOMAIN_MUTATION: &str = "\
mutation serviceDomainCreate($input: ServiceDomainCreateInput!) {
  serviceDomainCreate(input: $input) {
    id
    domain
  }
}";

const CREATE_CUSTOM_DOMAIN_MUTATION: &str = "\
mutation customDomainCreate($input: CustomDomainCreateInput!) {
  customDomainCreate(input: $input) {
    id
    domain
  }
}";

const DELETE_CUSTOM_DOMAIN_MUTATION: &str = "\
mutation customDomainDelete($id: String!) {
  customDomainDelete(id: $id)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDomainsArgs {
    project_id: String,
    environment_id: String,
    service_id: String,
}

/// Tool listing the generated and custom domains of a service.
pub struct ListDomainsTool {
    client: Arc<GraphQlClient>,
}

impl ListDomainsTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListDomainsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_domains".to_string(),
            description: "List the generated and custom domains attached to a service".to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("The service ID")
                }),
                vec!["projectId", "environmentId", "serviceId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListDomainsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_domains")?;

        let variables = json!({
            "projectId": args.project_id,
            "environmentId": args.environment_id,
            "serviceId": args.service_id
        });

        let data = self.client.execute(LIST_DOMAINS_QUERY, variables).await?;

        // The domains payload is already flat lists, no connection wrapping.
        Ok(CallToolResult::text(format::to_text(&data["domains"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateServiceDomainArgs {
    environment_id: String,
    service_id: String,
    #[serde(default)]
    target_port: Option<u64>,
}

/// Tool generating a `*.up.railway.app` domain for a service.
pub struct CreateServiceDomainTool {
    client: Arc<GraphQlClient>,
}

impl CreateServiceDomainTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateServiceDomainTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_service_domain".to_string(),
            description: "Generate a railway-provided domain for a service".to_string(),
            input_schema: json_schema_object(
                json!({
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("The service ID"),
                    "targetPort": json_schema_number("Optional port the domain should route to")
                }),
                vec!["environmentId", "serviceId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateServiceDomainArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_service_domain")?;

        let input = InputObject::new()
            .set("environmentId", args.environment_id)
            .set("serviceId", args.service_id)
            .set_opt("targetPort", args.target_port)
            .into_value();

        let data = self
            .client
            .execute(CREATE_SERVICE_DOMAIN_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format::to_text(
            &data["serviceDomainCreate"],
        )))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCustomDomainArgs {
    environment_id: String,
    service_id: String,
    domain: String,
}

/// Tool attaching a caller-owned domain to a service.
pub struct CreateCustomDomainTool {
    client: Arc<GraphQlClient>,
}

impl CreateCustomDomainTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateCustomDomainTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_custom_domain".to_string(),
            description: "Attach a custom domain to a service".to_string(),
            input_schema: json_schema_object(
                json!({
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("The service ID"),
                    "domain": json_schema_string("The domain to attach, e.g. app.example.com")
                }),
                vec!["environmentId", "serviceId", "domain"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateCustomDomainArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_custom_domain")?;

        let input = InputObject::new()
            .set("environmentId", args.environment_id)
            .set("serviceId", args.service_id)
            .set("domain", args.domain)
            .into_value();

        let data = self
            .client
            .execute(CREATE_CUSTOM_DOMAIN_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format::to_text(
            &data["customDomainCreate"],
        )))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCustomDomainArgs {
    domain_id: String,
}

/// Tool detaching a custom domain.
pub struct DeleteCustomDomainTool {
    client: Arc<GraphQlClient>,
}

impl DeleteCustomDomainTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteCustomDomainTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_custom_domain".to_string(),
            description: "Remove a custom domain from a service".to_string(),
            input_schema: json_schema_object(
                json!({"domainId": json_schema_string("The custom domain ID")}),
                vec!["domainId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteCustomDomainArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_custom_domain")?;

        self.client
            .execute(DELETE_CUSTOM_DOMAIN_MUTATION, json!({"id": args.domain_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "Deleted custom domain {}",
            args.domain_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListDomainsTool::new(client.clone())));
    registry.register(Arc::new(CreateServiceDomainTool::new(client.clone())));
    registry.register(Arc::new(CreateCustomDomainTool::new(client.clone())));
    registry.register(Arc::new(DeleteCustomDomainTool::new(client.clone())));
}
