// Project tools: list, inspect, create, update, delete.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry,
};
use anyhow::{Context, Result};
use railway_core::types::Project;
use railway_core::{connection, format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_PROJECTS_QUERY: &str = "\
query projects {
  projects {
    edges {
      node {
        id
        name
        description
        createdAt
        updatedAt
        isPublic
      }
    }
  }
}";

const GET_PROJECT_QUERY: &str = "\
query project($id: String!) {
  project(id: $id) {
    id
    name
    description
    createdAt
    updatedAt
    isPublic
    subscriptionType
    services {
      edges {
        node {
          id
          name
        }
      }
    }
    environments {
      edges {
        node {
          id
          name
          isEphemeral
        }
      }
    }
    volumes {
      edges {
        node {
          id
          name
        }
      }
    }
  }
}";

const CREATE_PROJECT_MUTATION: &str = "\
mutation projectCreate($input: ProjectCreateInput!) {
  projectCreate(input: $input) {
    id
    name
  }
}";

const UPDATE_PROJECT_MUTATION: &str = "\
mutation projectUpdate($id: String!, $input: ProjectUpdateInput!) {
  projectUpdate(id: $id, input: $input) {
    id
    name
    description
    isPublic
  }
}";

const DELETE_PROJECT_MUTATION: &str = "\
mutation projectDelete($id: String!) {
  projectDelete(id: $id)
}";

/// Tool listing every project the token can see.
pub struct ListProjectsTool {
    client: Arc<GraphQlClient>,
}

impl ListProjectsTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListProjectsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_projects".to_string(),
            description: "List all projects visible to the configured API token".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let data = self.client.execute(LIST_PROJECTS_QUERY, json!({})).await?;

        let projects: Vec<Project> = serde_json::from_value::<connection::Connection<Project>>(
            data["projects"].clone(),
        )
        .context("Unexpected project list shape")?
        .into_nodes();

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &projects,
        )?)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetProjectArgs {
    project_id: String,
}

/// Tool fetching one project with its services, environments, and volumes.
pub struct GetProjectTool {
    client: Arc<GraphQlClient>,
}

impl GetProjectTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_get_project".to_string(),
            description:
                "Get a project by ID, including its services, environments, and volumes"
                    .to_string(),
            input_schema: json_schema_object(
                json!({"projectId": json_schema_string("The project ID")}),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetProjectArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_get_project")?;

        let data = self
            .client
            .execute(GET_PROJECT_QUERY, json!({"id": args.project_id}))
            .await?;

        let mut project = data["project"].clone();
        connection::flatten_fields(&mut project, &["services", "environments", "volumes"]);

        Ok(CallToolResult::text(format::to_text(&project)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectArgs {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    team_id: Option<String>,
}

/// Tool creating a project.
pub struct CreateProjectTool {
    client: Arc<GraphQlClient>,
}

impl CreateProjectTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_project".to_string(),
            description: "Create a new project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "name": json_schema_string("Name for the new project"),
                    "description": json_schema_string("Optional project description"),
                    "teamId": json_schema_string("Optional team to create the project under")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateProjectArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_project")?;

        let input = InputObject::new()
            .set("name", args.name)
            .set_opt("description", args.description)
            .set_opt("teamId", args.team_id)
            .into_value();

        let data = self
            .client
            .execute(CREATE_PROJECT_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["projectCreate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectArgs {
    project_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_public: Option<bool>,
}

/// Tool updating project fields. Only supplied fields are sent, so the
/// remote keeps every unspecified field untouched.
pub struct UpdateProjectTool {
    client: Arc<GraphQlClient>,
}

impl UpdateProjectTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_update_project".to_string(),
            description: "Update a project's name, description, or visibility".to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "name": json_schema_string("New project name"),
                    "description": json_schema_string("New project description"),
                    "isPublic": json_schema_boolean("Whether the project is publicly visible")
                }),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpdateProjectArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_update_project")?;

        let input = InputObject::new()
            .set_opt("name", args.name)
            .set_opt("description", args.description)
            .set_opt("isPublic", args.is_public);
        if input.is_empty() {
            return Ok(CallToolResult::error("No fields to update"));
        }

        let data = self
            .client
            .execute(
                UPDATE_PROJECT_MUTATION,
                json!({"id": args.project_id, "input": input.into_value()}),
            )
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["projectUpdate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProjectArgs {
    project_id: String,
}

/// Tool deleting a project and everything in it.
pub struct DeleteProjectTool {
    client: Arc<GraphQlClient>,
}

impl DeleteProjectTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_project".to_string(),
            description:
                "Delete a project and all of its services, environments, and volumes. Irreversible."
                    .to_string(),
            input_schema: json_schema_object(
                json!({"projectId": json_schema_string("The project ID")}),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteProjectArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_project")?;

        self.client
            .execute(DELETE_PROJECT_MUTATION, json!({"id": args.project_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "Deleted project {}",
            args.project_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListProjectsTool::new(client.clone())));
    registry.register(Arc::new(GetProjectTool::new(client.clone())));
    registry.register(Arc::new(CreateProjectTool::new(client.clone())));
    registry.register(Arc::new(UpdateProjectTool::new(client.clone())));
    registry.register(Arc::new(DeleteProjectTool::new(client.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use railway_core::ApiConfig;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Arc<GraphQlClient> {
        let config = ApiConfig::new(Some("t".to_string()))
            .with_endpoint(Url::parse(&server.uri()).unwrap());
        Arc::new(GraphQlClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_get_project_flattens_nested_connections() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"id": "P1"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"project": {
                    "id": "P1",
                    "name": "api",
                    "services": {"edges": [{"node": {"id": "S1", "name": "web"}}]},
                    "environments": {"edges": []},
                    "volumes": null
                }}
            })))
            .mount(&server)
            .await;

        let tool = GetProjectTool::new(client_for(&server));
        let result = tool.execute(json!({"projectId": "P1"})).await.unwrap();

        let ToolContent::Text { text } = &result.content[0];
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        // Edge/node wrapping never reaches the caller.
        assert_eq!(value["services"], json!([{"id": "S1", "name": "web"}]));
        assert_eq!(value["environments"], json!([]));
        assert_eq!(value["volumes"], json!([]));
    }

    #[tokio::test]
    async fn test_create_project_omits_absent_optionals() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(
                json!({"variables": {"input": {"name": "fresh"}}}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"projectCreate": {"id": "P9", "name": "fresh"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CreateProjectTool::new(client_for(&server));
        let result = tool.execute(json!({"name": "fresh"})).await.unwrap();
        assert!(result.is_error.is_none());

        let request = &server.received_requests().await.unwrap()[0];
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let input = body["variables"]["input"].as_object().unwrap();
        assert_eq!(input.len(), 1);
        assert!(!input.contains_key("description"));
        assert!(!input.contains_key("teamId"));
    }

    #[tokio::test]
    async fn test_update_project_with_no_fields_is_an_error() {
        let server = MockServer::start().await;

        let tool = UpdateProjectTool::new(client_for(&server));
        let result = tool.execute(json!({"projectId": "P1"})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_errors_surface_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"message": "Project not found"}]
            })))
            .mount(&server)
            .await;

        let tool = GetProjectTool::new(client_for(&server));
        let err = tool
            .execute(json!({"projectId": "missing"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Project not found"));
    }
}
