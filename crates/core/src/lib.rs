// Core building blocks for the Railway MCP server: configuration, the
// GraphQL transport client, connection flattening, and remote-schema DTOs.

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod types;

pub use client::GraphQlClient;
pub use config::ApiConfig;
pub use error::{Error, Result};
