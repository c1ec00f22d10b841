// Variable tools: list, upsert, delete.
//
// Variables can be scoped to a whole environment or to one service within
// it; `serviceId` is optional everywhere and only sent when supplied.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry};
use anyhow::{Context, Result};
use railway_core::{format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_VARIABLES_QUERY: &str = "\
query variables($projectId: String!, $environmentId: String!, $serviceId: String) {
  variables(projectId: $projectId, environmentId: $environmentId, serviceId: $serviceId)
}";

const UPSERT_VARIABLE_MUTATION: &str = "\
mutation variableUpsert($input: VariableUpsertInput!) {
  variableUpsert(input: $input)
}";

const DELETE_VARIABLE_MUTATION: &str = "\
mutation variableDelete($input: VariableDeleteInput!) {
  variableDelete(input: $input)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListVariablesArgs {
    project_id: String,
    environment_id: String,
    #[serde(default)]
    service_id: Option<String>,
}

/// Tool listing variables as the raw name→value map the remote returns.
pub struct ListVariablesTool {
    client: Arc<GraphQlClient>,
}

impl ListVariablesTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListVariablesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_variables".to_string(),
            description:
                "List variables for an environment, optionally scoped to a single service"
                    .to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("Optional service to scope the variables to")
                }),
                vec!["projectId", "environmentId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListVariablesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_variables")?;

        let variables = InputObject::new()
            .set("projectId", args.project_id)
            .set("environmentId", args.environment_id)
            .set_opt("serviceId", args.service_id)
            .into_value();

        let data = self.client.execute(LIST_VARIABLES_QUERY, variables).await?;

        Ok(CallToolResult::text(format::to_text(&data["variables"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertVariableArgs {
    project_id: String,
    environment_id: String,
    name: String,
    value: String,
    #[serde(default)]
    service_id: Option<String>,
}

/// Tool creating or updating one variable.
pub struct UpsertVariableTool {
    client: Arc<GraphQlClient>,
}

impl UpsertVariableTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpsertVariableTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_upsert_variable".to_string(),
            description: "Create or update a variable in an environment, optionally scoped to a \
                          single service"
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "environmentId": json_schema_string("The environment ID"),
                    "name": json_schema_string("Variable name"),
                    "value": json_schema_string("Variable value"),
                    "serviceId": json_schema_string("Optional service to scope the variable to")
                }),
                vec!["projectId", "environmentId", "name", "value"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpsertVariableArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_upsert_variable")?;

        let name = args.name.clone();
        let input = InputObject::new()
            .set("projectId", args.project_id)
            .set("environmentId", args.environment_id)
            .set("name", args.name)
            .set("value", args.value)
            .set_opt("serviceId", args.service_id)
            .into_value();

        self.client
            .execute(UPSERT_VARIABLE_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format!("Set variable {}", name)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteVariableArgs {
    project_id: String,
    environment_id: String,
    name: String,
    #[serde(default)]
    service_id: Option<String>,
}

/// Tool deleting one variable.
pub struct DeleteVariableTool {
    client: Arc<GraphQlClient>,
}

impl DeleteVariableTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteVariableTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_variable".to_string(),
            description: "Delete a variable from an environment, optionally scoped to a single \
                          service"
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "environmentId": json_schema_string("The environment ID"),
                    "name": json_schema_string("Variable name"),
                    "serviceId": json_schema_string("Optional service the variable is scoped to")
                }),
                vec!["projectId", "environmentId", "name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteVariableArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_variable")?;

        let name = args.name.clone();
        let input = InputObject::new()
            .set("projectId", args.project_id)
            .set("environmentId", args.environment_id)
            .set("name", args.name)
            .set_opt("serviceId", args.service_id)
            .into_value();

        self.client
            .execute(DELETE_VARIABLE_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format!("Deleted variable {}", name)))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListVariablesTool::new(client.clone())));
    registry.register(Arc::new(UpsertVariableTool::new(client.clone())));
    registry.register(Arc::new(DeleteVariableTool::new(client.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
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
    async fn test_upsert_without_service_id_omits_the_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"variableUpsert": true}
            })))
            .mount(&server)
            .await;

        let tool = UpsertVariableTool::new(client_for(&server));
        tool.execute(json!({
            "projectId": "P1",
            "environmentId": "E1",
            "name": "X",
            "value": "1"
        }))
        .await
        .unwrap();

        let request = &server.received_requests().await.unwrap()[0];
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(
            body["variables"]["input"],
            json!({"projectId": "P1", "environmentId": "E1", "name": "X", "value": "1"})
        );
    }

    #[tokio::test]
    async fn test_upsert_with_service_id_includes_it() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"variableUpsert": true}
            })))
            .mount(&server)
            .await;

        let tool = UpsertVariableTool::new(client_for(&server));
        let result = tool
            .execute(json!({
                "projectId": "P1",
                "environmentId": "E1",
                "serviceId": "S1",
                "name": "PORT",
                "value": "8080"
            }))
            .await
            .unwrap();

        let request = &server.received_requests().await.unwrap()[0];
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["variables"]["input"]["serviceId"], json!("S1"));

        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "Set variable PORT");
    }

    #[tokio::test]
    async fn test_list_returns_raw_map() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"variables": {"DATABASE_URL": "postgres://…", "PORT": "8080"}}
            })))
            .mount(&server)
            .await;

        let tool = ListVariablesTool::new(client_for(&server));
        let result = tool
            .execute(json!({"projectId": "P1", "environmentId": "E1"}))
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("DATABASE_URL"));
        assert!(text.contains("8080"));
    }
}
