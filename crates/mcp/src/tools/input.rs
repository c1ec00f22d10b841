// Marshaling helpers for GraphQL variables and mutation inputs.

use serde_json::{Map, Value};

/// Builder for mutation input objects and variable maps.
///
/// Keys are inserted only when a value is actually present, so omitted
/// optional arguments never reach the wire as explicit nulls — a null would
/// reset the corresponding remote field.
#[derive(Debug, Default)]
pub struct InputObject {
    fields: Map<String, Value>,
}

impl InputObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a required field.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Insert an optional field only when it is present.
    pub fn set_opt(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.fields.insert(key.to_string(), value.into());
        }
        self
    }

    /// Whether any field was inserted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Resolve a caller-supplied page size against a default and a hard
/// ceiling. The ceiling bounds remote response size and local memory use
/// regardless of what the caller asked for.
pub fn clamped_limit(requested: Option<u64>, default: u64, ceiling: u64) -> u64 {
    requested.unwrap_or(default).min(ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_omitted_optionals_are_absent() {
        let input = InputObject::new()
            .set("projectId", "P1")
            .set("environmentId", "E1")
            .set("name", "X")
            .set("value", "1")
            .set_opt("serviceId", None::<String>)
            .into_value();

        assert_eq!(
            input,
            json!({"projectId": "P1", "environmentId": "E1", "name": "X", "value": "1"})
        );
        assert!(input.get("serviceId").is_none());
    }

    #[test]
    fn test_present_optionals_are_included() {
        let input = InputObject::new()
            .set("projectId", "P1")
            .set_opt("serviceId", Some("S1"))
            .into_value();

        assert_eq!(input["serviceId"], json!("S1"));
    }

    #[test]
    fn test_serialized_payload_has_no_omitted_keys() {
        let input = InputObject::new()
            .set("name", "X")
            .set_opt("description", None::<String>)
            .into_value();

        let payload = serde_json::to_string(&input).unwrap();
        assert!(!payload.contains("description"));
        assert!(!payload.contains("null"));
    }

    #[test]
    fn test_built_keys_subset_of_supplied() {
        let supplied = ["environmentId", "serviceId"];
        let input = InputObject::new()
            .set("environmentId", "E1")
            .set("serviceId", "S1")
            .set_opt("targetPort", None::<u64>)
            .into_value();

        for key in input.as_object().unwrap().keys() {
            assert!(supplied.contains(&key.as_str()));
        }
    }

    #[test]
    fn test_is_empty() {
        assert!(InputObject::new().is_empty());
        assert!(InputObject::new().set_opt("name", None::<String>).is_empty());
        assert!(!InputObject::new().set("name", "x").is_empty());
    }

    #[test]
    fn test_clamped_limit_default_applies() {
        assert_eq!(clamped_limit(None, 10, 50), 10);
        assert_eq!(clamped_limit(None, 100, 500), 100);
    }

    #[test]
    fn test_clamped_limit_ceiling_applies() {
        assert_eq!(clamped_limit(Some(1000), 10, 50), 50);
        assert_eq!(clamped_limit(Some(501), 100, 500), 500);
    }

    #[test]
    fn test_clamped_limit_passthrough_below_ceiling() {
        assert_eq!(clamped_limit(Some(25), 10, 50), 25);
        assert_eq!(clamped_limit(Some(1), 100, 500), 1);
    }
}
