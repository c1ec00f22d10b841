// Service tools: list, inspect, create, update, delete.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry};
use anyhow::{Context, Result};
use railway_core::types::Service;
use railway_core::{connection, format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_SERVICES_QUERY: &str = "\
query project($id: String!) {
  project(id: $id) {
    services {
      edges {
        node {
          id
          name
          icon
          createdAt
          updatedAt
        }
      }
    }
  }
}";

const GET_SERVICE_QUERY: &str = "\
query service($id: String!) {
  service(id: $id) {
    id
    name
    icon
    projectId
    createdAt
    updatedAt
    deployments(first: 5) {
      edges {
        node {
          id
          status
          createdAt
        }
      }
    }
  }
}";

const CREATE_SERVICE_MUTATION: &str = "\
mutation serviceCreate($input: ServiceCreateInput!) {
  serviceCreate(input: $input) {
    id
    name
  }
}";

const UPDATE_SERVICE_MUTATION: &str = "\
mutation serviceUpdate($id: String!, $input: ServiceUpdateInput!) {
  serviceUpdate(id: $id, input: $input) {
    id
    name
    icon
  }
}";

const DELETE_SERVICE_MUTATION: &str = "\
mutation serviceDelete($id: String!) {
  serviceDelete(id: $id)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListServicesArgs {
    project_id: String,
}

/// Tool listing the services of a project.
pub struct ListServicesTool {
    client: Arc<GraphQlClient>,
}

impl ListServicesTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListServicesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_services".to_string(),
            description: "List all services in a project".to_string(),
            input_schema: json_schema_object(
                json!({"projectId": json_schema_string("The project ID")}),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListServicesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_services")?;

        let data = self
            .client
            .execute(LIST_SERVICES_QUERY, json!({"id": args.project_id}))
            .await?;

        let services: Vec<Service> = serde_json::from_value::<connection::Connection<Service>>(
            data["project"]["services"].clone(),
        )
        .context("Unexpected service list shape")?
        .into_nodes();

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &services,
        )?)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetServiceArgs {
    service_id: String,
}

/// Tool fetching one service with its most recent deployments.
pub struct GetServiceTool {
    client: Arc<GraphQlClient>,
}

impl GetServiceTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetServiceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_get_service".to_string(),
            description: "Get a service by ID, including its most recent deployments".to_string(),
            input_schema: json_schema_object(
                json!({"serviceId": json_schema_string("The service ID")}),
                vec!["serviceId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_get_service")?;

        let data = self
            .client
            .execute(GET_SERVICE_QUERY, json!({"id": args.service_id}))
            .await?;

        let mut service = data["service"].clone();
        connection::flatten_fields(&mut service, &["deployments"]);

        Ok(CallToolResult::text(format::to_text(&service)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateServiceArgs {
    project_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    repo: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    branch: Option<String>,
}

/// Tool creating a service, optionally from a repo or image source.
pub struct CreateServiceTool {
    client: Arc<GraphQlClient>,
}

impl CreateServiceTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateServiceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_service".to_string(),
            description:
                "Create a new service in a project, optionally from a GitHub repo or Docker image"
                    .to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "name": json_schema_string("Optional service name"),
                    "repo": json_schema_string("GitHub repo to deploy, e.g. owner/name"),
                    "image": json_schema_string("Docker image to deploy"),
                    "branch": json_schema_string("Branch to deploy when using a repo source")
                }),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_service")?;

        let source = InputObject::new()
            .set_opt("repo", args.repo)
            .set_opt("image", args.image);

        let mut input = InputObject::new()
            .set("projectId", args.project_id)
            .set_opt("name", args.name)
            .set_opt("branch", args.branch);
        if !source.is_empty() {
            input = input.set("source", source.into_value());
        }

        let data = self
            .client
            .execute(CREATE_SERVICE_MUTATION, json!({"input": input.into_value()}))
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["serviceCreate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateServiceArgs {
    service_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

/// Tool updating service fields. Only supplied fields are sent.
pub struct UpdateServiceTool {
    client: Arc<GraphQlClient>,
}

impl UpdateServiceTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateServiceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_update_service".to_string(),
            description: "Update a service's name or icon".to_string(),
            input_schema: json_schema_object(
                json!({
                    "serviceId": json_schema_string("The service ID"),
                    "name": json_schema_string("New service name"),
                    "icon": json_schema_string("New service icon")
                }),
                vec!["serviceId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpdateServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_update_service")?;

        let input = InputObject::new()
            .set_opt("name", args.name)
            .set_opt("icon", args.icon);
        if input.is_empty() {
            return Ok(CallToolResult::error("No fields to update"));
        }

        let data = self
            .client
            .execute(
                UPDATE_SERVICE_MUTATION,
                json!({"id": args.service_id, "input": input.into_value()}),
            )
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["serviceUpdate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteServiceArgs {
    service_id: String,
}

/// Tool deleting a service.
pub struct DeleteServiceTool {
    client: Arc<GraphQlClient>,
}

impl DeleteServiceTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteServiceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_service".to_string(),
            description: "Delete a service and its deployments. Irreversible.".to_string(),
            input_schema: json_schema_object(
                json!({"serviceId": json_schema_string("The service ID")}),
                vec!["serviceId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteServiceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_service")?;

        self.client
            .execute(DELETE_SERVICE_MUTATION, json!({"id": args.service_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "Deleted service {}",
            args.service_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListServicesTool::new(client.clone())));
    registry.register(Arc::new(GetServiceTool::new(client.clone())));
    registry.register(Arc::new(CreateServiceTool::new(client.clone())));
    registry.register(Arc::new(UpdateServiceTool::new(client.clone())));
    registry.register(Arc::new(DeleteServiceTool::new(client.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use railway_core::ApiConfig;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Arc<GraphQlClient> {
        let config = ApiConfig::new(Some("t".to_string()))
            .with_endpoint(Url::parse(&server.uri()).unwrap());
        Arc::new(GraphQlClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_create_service_builds_source_only_when_supplied() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"serviceCreate": {"id": "S1", "name": "web"}}
            })))
            .mount(&server)
            .await;

        let tool = CreateServiceTool::new(client_for(&server));

        tool.execute(json!({"projectId": "P1", "repo": "acme/web"}))
            .await
            .unwrap();
        tool.execute(json!({"projectId": "P1"})).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(first["variables"]["input"]["source"], json!({"repo": "acme/web"}));

        let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert!(second["variables"]["input"].get("source").is_none());
        assert!(second["variables"]["input"].get("name").is_none());
    }

    #[tokio::test]
    async fn test_list_services_flattens_connection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"project": {"services": {"edges": [
                    {"node": {"id": "S1", "name": "web"}},
                    {"node": {"id": "S2", "name": "worker"}}
                ]}}}
            })))
            .mount(&server)
            .await;

        let tool = ListServicesTool::new(client_for(&server));
        let result = tool.execute(json!({"projectId": "P1"})).await.unwrap();

        let crate::protocol::ToolContent::Text { text } = &result.content[0];
        let services: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(services.as_array().unwrap().len(), 2);
        assert_eq!(services[0]["id"], "S1");
        assert_eq!(services[1]["id"], "S2");
        assert!(text.find("edges").is_none());
    }
}
