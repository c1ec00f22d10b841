// HTTP transport adapter: the MCP endpoint and health check.
//
// Every request is self-contained. No session ID is issued, nothing is
// shared between calls except the immutable handler, and responses are
// plain JSON (non-streamed).

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use railway_mcp::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use railway_mcp::McpHandler;
use serde_json::Value;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Server name advertised in the MCP handshake and the health payload.
pub const SERVER_NAME: &str = "railway-mcp-server";

/// Start the HTTP server.
pub async fn serve(addr: &str, handler: Arc<McpHandler>) -> Result<()> {
    let app = create_router(handler);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("MCP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router.
fn create_router(handler: Arc<McpHandler>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(handler)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "server": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// The MCP endpoint: one JSON-RPC request per POST.
///
/// Malformed bodies get a JSON-RPC parse error; notifications get `202
/// Accepted` with no body. Tool failures never escape here as HTTP errors —
/// they come back inside the tool result.
async fn handle_mcp(State(handler): State<Arc<McpHandler>>, body: String) -> Response {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected unparseable MCP request");
            let response = JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error());
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    match handler.handle(request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
