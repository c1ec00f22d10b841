// Volume tools: list, create, update, delete.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry};
use anyhow::{Context, Result};
use railway_core::types::Volume;
use railway_core::{connection, format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_VOLUMES_QUERY: &str = "\
query project($id: String!) {
  project(id: $id) {
    volumes {
      edges {
        node {
          id
          name
          createdAt
        }
      }
    }
  }
}";

const CREATE_VOLUME_MUTATION: &str = "\
mutation volumeCreate($input: VolumeCreateInput!) {
  volumeCreate(input: $input) {
    id
    name
  }
}";

const UPDATE_VOLUME_MUTATION: &str = "\
mutation volumeUpdate($volumeId: String!, $input: VolumeUpdateInput!) {
  volumeUpdate(volumeId: $volumeId, input: $input) {
    id
    name
  }
}";

const DELETE_VOLUME_MUTATION: &str = "\
mutation volumeDelete($volumeId: String!) {
  volumeDelete(volumeId: $volumeId)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListVolumesArgs {
    project_id: String,
}

/// Tool listing the volumes of a project.
pub struct ListVolumesTool {
    client: Arc<GraphQlClient>,
}

impl ListVolumesTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListVolumesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_volumes".to_string(),
            description: "List all volumes in a project".to_string(),
            input_schema: json_schema_object(
                json!({"projectId": json_schema_string("The project ID")}),
                vec!["projectId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListVolumesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_volumes")?;

        let data = self
            .client
            .execute(LIST_VOLUMES_QUERY, json!({"id": args.project_id}))
            .await?;

        let volumes: Vec<Volume> = serde_json::from_value::<connection::Connection<Volume>>(
            data["project"]["volumes"].clone(),
        )
        .context("Unexpected volume list shape")?
        .into_nodes();

        Ok(CallToolResult::text(format::to_text(&serde_json::to_value(
            &volumes,
        )?)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateVolumeArgs {
    project_id: String,
    environment_id: String,
    service_id: String,
    mount_path: String,
}

/// Tool creating a volume mounted into a service.
pub struct CreateVolumeTool {
    client: Arc<GraphQlClient>,
}

impl CreateVolumeTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateVolumeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_volume".to_string(),
            description: "Create a persistent volume mounted into a service".to_string(),
            input_schema: json_schema_object(
                json!({
                    "projectId": json_schema_string("The project ID"),
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("The service to mount the volume into"),
                    "mountPath": json_schema_string("Path the volume is mounted at, e.g. /data")
                }),
                vec!["projectId", "environmentId", "serviceId", "mountPath"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateVolumeArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_volume")?;

        let input = InputObject::new()
            .set("projectId", args.project_id)
            .set("environmentId", args.environment_id)
            .set("serviceId", args.service_id)
            .set("mountPath", args.mount_path)
            .into_value();

        let data = self
            .client
            .execute(CREATE_VOLUME_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["volumeCreate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVolumeArgs {
    volume_id: String,
    #[serde(default)]
    name: Option<String>,
}

/// Tool renaming a volume.
pub struct UpdateVolumeTool {
    client: Arc<GraphQlClient>,
}

impl UpdateVolumeTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateVolumeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_update_volume".to_string(),
            description: "Update a volume's name".to_string(),
            input_schema: json_schema_object(
                json!({
                    "volumeId": json_schema_string("The volume ID"),
                    "name": json_schema_string("New volume name")
                }),
                vec!["volumeId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpdateVolumeArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_update_volume")?;

        let input = InputObject::new().set_opt("name", args.name);
        if input.is_empty() {
            return Ok(CallToolResult::error("No fields to update"));
        }

        let data = self
            .client
            .execute(
                UPDATE_VOLUME_MUTATION,
                json!({"volumeId": args.volume_id, "input": input.into_value()}),
            )
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["volumeUpdate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteVolumeArgs {
    volume_id: String,
}

/// Tool deleting a volume and its data.
pub struct DeleteVolumeTool {
    client: Arc<GraphQlClient>,
}

impl DeleteVolumeTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteVolumeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_volume".to_string(),
            description: "Delete a volume and its data. Irreversible.".to_string(),
            input_schema: json_schema_object(
                json!({"volumeId": json_schema_string("The volume ID")}),
                vec!["volumeId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteVolumeArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_volume")?;

        self.client
            .execute(DELETE_VOLUME_MUTATION, json!({"volumeId": args.volume_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "Deleted volume {}",
            args.volume_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListVolumesTool::new(client.clone())));
    registry.register(Arc::new(CreateVolumeTool::new(client.clone())));
    registry.register(Arc::new(UpdateVolumeTool::new(client.clone())));
    registry.register(Arc::new(DeleteVolumeTool::new(client.clone())));
}
