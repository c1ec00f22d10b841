// MCP (Model Context Protocol) surface of the Railway control-plane tools.
// Protocol types, the tool catalog, and the JSON-RPC dispatch handler.

pub mod handler;
pub mod protocol;
pub mod tools;

pub use handler::McpHandler;
