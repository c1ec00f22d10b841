// JSON-RPC dispatch for the MCP surface.

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Stateless MCP request handler.
///
/// One instance is shared across requests. It holds only the immutable tool
/// registry, so concurrent calls need no coordination and no session state
/// survives a request.
pub struct McpHandler {
    registry: ToolRegistry,
    server_name: String,
    server_version: String,
}

impl McpHandler {
    pub fn new(
        registry: ToolRegistry,
        server_name: impl Into<String>,
        server_version: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            server_name: server_name.into(),
            server_version: server_version.into(),
        }
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Handle one request. Returns `None` for notifications.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Ignoring notification");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    fn initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        }
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        // Tool failures are surfaced as error-flagged results, never as
        // transport-level errors and never as a crash.
        match tool.execute(arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                JsonRpcResponse::success(id, CallToolResult::error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools;
    use railway_core::{ApiConfig, GraphQlClient};
    use serde_json::json;
    use std::sync::Arc;

    fn handler() -> McpHandler {
        let client = GraphQlClient::new(ApiConfig::new(None)).unwrap();
        let registry = tools::build_registry(Arc::new(client));
        McpHandler::new(registry, "railway-mcp-server", "0.1.0")
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(1, method, params)
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = handler().handle(request("initialize", None)).await.unwrap();
        assert!(!response.is_error());

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!("railway-mcp-server"));
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list_covers_catalog() {
        let handler = handler();
        let response = handler.handle(request("tools/list", None)).await.unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), handler.tool_count());
        assert!(tools.iter().any(|t| t["name"] == "railway_list_deployments"));
        assert!(tools.iter().any(|t| t["name"] == "railway_run_graphql"));
    }

    #[tokio::test]
    async fn test_ping() {
        let response = handler().handle(request("ping", None)).await.unwrap();
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = handler()
            .handle(request("resources/list", None))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let response = handler()
            .handle(request(
                "tools/call",
                Some(json!({"name": "railway_teleport", "arguments": {}})),
            ))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert!(error.message.contains("railway_teleport"));
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let notification: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
                .unwrap();
        assert!(handler().handle(notification).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_token_surfaces_as_tool_error() {
        // No token configured: the call fails with the configuration error
        // instead of reaching the network.
        let response = handler()
            .handle(request(
                "tools/call",
                Some(json!({"name": "railway_list_projects"})),
            ))
            .await
            .unwrap();

        assert!(!response.is_error());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("RAILWAY_API_TOKEN"));
    }

    #[tokio::test]
    async fn test_invalid_arguments_surface_as_tool_error() {
        let response = handler()
            .handle(request(
                "tools/call",
                Some(json!({"name": "railway_get_project", "arguments": {"wrong": 1}})),
            ))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("railway_get_project"));
    }
}
