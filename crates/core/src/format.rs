//! Text rendering of tool results.

use serde_json::Value;

/// Render a JSON value as indented text for return to the calling agent.
///
/// Every input originates from an already-parsed remote response, so the
/// compact fallback is unreachable in practice.
pub fn to_text(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_is_indented() {
        let text = to_text(&json!({"id": "P1", "name": "api"}));
        assert!(text.contains("\n"));
        assert!(text.contains("  \"id\": \"P1\""));
    }

    #[test]
    fn test_array_preserves_order() {
        let text = to_text(&json!([{"id": "a"}, {"id": "b"}]));
        let a = text.find("\"a\"").unwrap();
        let b = text.find("\"b\"").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_null() {
        assert_eq!(to_text(&Value::Null), "null");
    }
}
