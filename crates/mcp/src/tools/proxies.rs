// TCP proxy tools: list, create, delete.
//
// A TCP proxy is a remote-managed endpoint exposing a non-HTTP port of a
// service; `proxyPort` is assigned by the platform, `applicationPort` is
// the port the service listens on.

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_number, json_schema_object, json_schema_string, InputObject, Tool, ToolRegistry,
};
use anyhow::{Context, Result};
use railway_core::{format, GraphQlClient};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const LIST_TCP_PROXIES_QUERY: &str = "\
query tcpProxies($environmentId: String!, $serviceId: String!) {
  tcpProxies(environmentId: $environmentId, serviceId: $serviceId) {
    id
    domain
    proxyPort
    applicationPort
  }
}";

const CREATE_TCP_PROXY_MUTATION: &str = "\
mutation tcpProxyCreate($input: TCPProxyCreateInput!) {
  tcpProxyCreate(input: $input) {
    id
    domain
    proxyPort
    applicationPort
  }
}";

const DELETE_TCP_PROXY_MUTATION: &str = "\
mutation tcpProxyDelete($id: String!) {
  tcpProxyDelete(id: $id)
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTcpProxiesArgs {
    environment_id: String,
    service_id: String,
}

/// Tool listing the TCP proxies of a service.
pub struct ListTcpProxiesTool {
    client: Arc<GraphQlClient>,
}

impl ListTcpProxiesTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListTcpProxiesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_list_tcp_proxies".to_string(),
            description: "List the TCP proxies attached to a service".to_string(),
            input_schema: json_schema_object(
                json!({
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("The service ID")
                }),
                vec!["environmentId", "serviceId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListTcpProxiesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_list_tcp_proxies")?;

        let data = self
            .client
            .execute(
                LIST_TCP_PROXIES_QUERY,
                json!({
                    "environmentId": args.environment_id,
                    "serviceId": args.service_id
                }),
            )
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["tcpProxies"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTcpProxyArgs {
    environment_id: String,
    service_id: String,
    application_port: u64,
}

/// Tool creating a TCP proxy for a service port.
pub struct CreateTcpProxyTool {
    client: Arc<GraphQlClient>,
}

impl CreateTcpProxyTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateTcpProxyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_create_tcp_proxy".to_string(),
            description: "Expose a non-HTTP port of a service through a TCP proxy".to_string(),
            input_schema: json_schema_object(
                json!({
                    "environmentId": json_schema_string("The environment ID"),
                    "serviceId": json_schema_string("The service ID"),
                    "applicationPort": json_schema_number("The port the service listens on")
                }),
                vec!["environmentId", "serviceId", "applicationPort"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateTcpProxyArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_create_tcp_proxy")?;

        let input = InputObject::new()
            .set("environmentId", args.environment_id)
            .set("serviceId", args.service_id)
            .set("applicationPort", args.application_port)
            .into_value();

        let data = self
            .client
            .execute(CREATE_TCP_PROXY_MUTATION, json!({"input": input}))
            .await?;

        Ok(CallToolResult::text(format::to_text(&data["tcpProxyCreate"])))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteTcpProxyArgs {
    proxy_id: String,
}

/// Tool deleting a TCP proxy.
pub struct DeleteTcpProxyTool {
    client: Arc<GraphQlClient>,
}

impl DeleteTcpProxyTool {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteTcpProxyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "railway_delete_tcp_proxy".to_string(),
            description: "Delete a TCP proxy".to_string(),
            input_schema: json_schema_object(
                json!({"proxyId": json_schema_string("The TCP proxy ID")}),
                vec!["proxyId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteTcpProxyArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for railway_delete_tcp_proxy")?;

        self.client
            .execute(DELETE_TCP_PROXY_MUTATION, json!({"id": args.proxy_id}))
            .await?;

        Ok(CallToolResult::text(format!(
            "Deleted TCP proxy {}",
            args.proxy_id
        )))
    }
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<GraphQlClient>) {
    registry.register(Arc::new(ListTcpProxiesTool::new(client.clone())));
    registry.register(Arc::new(CreateTcpProxyTool::new(client.clone())));
    registry.register(Arc::new(DeleteTcpProxyTool::new(client.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use railway_core::ApiConfig;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_tcp_proxy() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "variables": {"input": {
                    "environmentId": "E1",
                    "serviceId": "S1",
                    "applicationPort": 5432
                }}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"tcpProxyCreate": {
                    "id": "TP1",
                    "domain": "tcp.railway.app",
                    "proxyPort": 31942,
                    "applicationPort": 5432
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig::new(Some("t".to_string()))
            .with_endpoint(Url::parse(&server.uri()).unwrap());
        let tool = CreateTcpProxyTool::new(Arc::new(GraphQlClient::new(config).unwrap()));

        let result = tool
            .execute(json!({
                "environmentId": "E1",
                "serviceId": "S1",
                "applicationPort": 5432
            }))
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("31942"));
    }
}
