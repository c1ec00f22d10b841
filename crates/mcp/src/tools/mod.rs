// The tool catalog: one module per remote resource category, plus the
// shared trait/registry and marshaling helpers.

pub mod deployments;
pub mod domains;
pub mod environments;
pub mod graphql;
pub mod logs;
pub mod profile;
pub mod projects;
pub mod proxies;
pub mod services;
pub mod variables;
pub mod volumes;

mod input;
mod registry;

pub use input::{clamped_limit, InputObject};
pub use registry::{
    json_schema_boolean, json_schema_number, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};

use railway_core::GraphQlClient;
use std::sync::Arc;

/// Build the full tool catalog backed by the given client.
pub fn build_registry(client: Arc<GraphQlClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    profile::register(&mut registry, &client);
    projects::register(&mut registry, &client);
    services::register(&mut registry, &client);
    environments::register(&mut registry, &client);
    deployments::register(&mut registry, &client);
    logs::register(&mut registry, &client);
    variables::register(&mut registry, &client);
    domains::register(&mut registry, &client);
    proxies::register(&mut registry, &client);
    volumes::register(&mut registry, &client);
    graphql::register(&mut registry, &client);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use railway_core::ApiConfig;

    fn catalog() -> ToolRegistry {
        let client = GraphQlClient::new(ApiConfig::new(None)).unwrap();
        build_registry(Arc::new(client))
    }

    #[test]
    fn test_catalog_covers_every_resource() {
        let registry = catalog();

        for name in [
            "railway_get_profile",
            "railway_list_projects",
            "railway_get_project",
            "railway_create_project",
            "railway_update_project",
            "railway_delete_project",
            "railway_list_services",
            "railway_get_service",
            "railway_create_service",
            "railway_update_service",
            "railway_delete_service",
            "railway_list_environments",
            "railway_create_environment",
            "railway_delete_environment",
            "railway_list_deployments",
            "railway_get_deployment",
            "railway_redeploy_deployment",
            "railway_restart_deployment",
            "railway_cancel_deployment",
            "railway_remove_deployment",
            "railway_get_build_logs",
            "railway_get_deploy_logs",
            "railway_list_variables",
            "railway_upsert_variable",
            "railway_delete_variable",
            "railway_list_domains",
            "railway_create_service_domain",
            "railway_create_custom_domain",
            "railway_delete_custom_domain",
            "railway_list_tcp_proxies",
            "railway_create_tcp_proxy",
            "railway_delete_tcp_proxy",
            "railway_list_volumes",
            "railway_create_volume",
            "railway_update_volume",
            "railway_delete_volume",
            "railway_run_graphql",
        ] {
            assert!(registry.contains(name), "missing tool {}", name);
        }
    }

    #[test]
    fn test_every_tool_is_prefixed_and_described() {
        for schema in catalog().list_schemas() {
            assert!(schema.name.starts_with("railway_"), "{}", schema.name);
            assert!(!schema.description.is_empty(), "{}", schema.name);
            assert_eq!(schema.input_schema["type"], "object", "{}", schema.name);
        }
    }
}
