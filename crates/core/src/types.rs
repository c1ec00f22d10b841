//! Transient DTOs mirroring the remote control-plane schema.
//!
//! Nothing here is persisted; every value lives for a single tool call. The
//! remote platform owns every lifecycle — these types only carry its answers
//! through. Unknown fields are ignored so remote schema additions never
//! break deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

/// A top-level grouping of projects under shared ownership/billing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
}

/// A project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_public: bool,
    pub subscription_type: Option<String>,
}

/// A deployable unit within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub project_id: Option<String>,
    pub template_service_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A named deployment target (e.g. staging, production) within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_ephemeral: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One build/run attempt of a service within an environment.
///
/// `status` is an opaque lifecycle string owned by the remote platform; it
/// is read and passed through, never modeled or transitioned locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub static_url: Option<String>,
    pub environment_id: Option<String>,
    pub service_id: Option<String>,
    pub project_id: Option<String>,
    pub meta: Option<serde_json::Value>,
    pub can_redeploy: Option<bool>,
    pub can_rollback: Option<bool>,
}

/// A persistent volume attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// One log line from a build or deploy stream. Returned by the remote API
/// as a plain list, never as a paginated connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub message: String,
    pub severity: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}
