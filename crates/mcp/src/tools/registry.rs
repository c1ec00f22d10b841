// Tool trait and registry for the catalog.

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Schema advertised via `tools/list`.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Registry of available tools. Registration order is the order tools are
/// advertised in, so the catalog surface stays stable across calls.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. A later registration under the same name replaces
    /// the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.index.get(&name) {
            Some(&position) => self.tools[position] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&position| self.tools[position].clone())
    }

    /// List all tool schemas in registration order.
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|tool| tool.schema()).collect()
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for building input schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FakeTool {
        name: &'static str,
    }

    #[async_trait::async_trait]
    impl Tool for FakeTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.to_string(),
                description: "fake".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
            }
        }

        async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(self.name))
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FakeTool { name: "a" }));
        registry.register(Arc::new(FakeTool { name: "b" }));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert!(registry.get("b").is_some());
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_schemas_keep_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FakeTool { name: "first" }));
        registry.register(Arc::new(FakeTool { name: "second" }));
        registry.register(Arc::new(FakeTool { name: "third" }));

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FakeTool { name: "a" }));
        registry.register(Arc::new(FakeTool { name: "b" }));
        registry.register(Arc::new(FakeTool { name: "a" }));

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_schema_helpers() {
        let schema = json_schema_object(
            json!({"projectId": json_schema_string("The project ID")}),
            vec!["projectId"],
        );
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["required"], json!(["projectId"]));
        assert_eq!(schema["properties"]["projectId"]["type"], json!("string"));
    }
}
