//! Flattening of paginated connection shapes.
//!
//! The remote schema wraps every paginated list in a connection: each item
//! is a `node` inside an `edge`. Callers of this crate never see that
//! wrapping; list-shaped results are always flattened to plain ordered
//! sequences first.

use serde::Deserialize;
use serde_json::Value;

/// A paginated connection as returned by the remote schema.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Option<Vec<Edge<T>>>,
}

/// One edge wrapping a node.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Flatten to the ordered node list. Absent edges yield an empty list.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges
            .unwrap_or_default()
            .into_iter()
            .map(|edge| edge.node)
            .collect()
    }
}

/// Flatten a connection-shaped JSON value into its ordered node list.
///
/// `null`, non-objects, and objects without an `edges` array all flatten to
/// an empty list.
pub fn connection_nodes(value: &Value) -> Vec<Value> {
    value
        .get("edges")
        .and_then(Value::as_array)
        .map(|edges| edges.iter().filter_map(|edge| edge.get("node")).cloned().collect())
        .unwrap_or_default()
}

/// Flatten the named connection fields of `object` in place.
///
/// Fields that are absent are left untouched; fields that are present but
/// null or edge-less become empty arrays.
pub fn flatten_fields(object: &mut Value, fields: &[&str]) {
    let Some(map) = object.as_object_mut() else {
        return;
    };
    for field in fields {
        if let Some(connection) = map.get(*field) {
            let nodes = connection_nodes(connection);
            map.insert((*field).to_string(), Value::Array(nodes));
        }
    }
}
