//! Shape-preserving redaction of structured tool output.

use serde_json::Value;

use super::FilterList;
use super::sanitize::{contains_any, sanitize};

/// Sanitize every string leaf of `value`. Object keys are left alone.
pub fn redact_value(value: &Value, filters: &FilterList) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize(text, filters).text),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_value(item, filters))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), redact_value(item, filters)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// True when any string leaf of `value` contains a filter entry.
pub fn value_contains_any(value: &Value, filters: &FilterList) -> bool {
    match value {
        Value::String(text) => contains_any(text, filters),
        Value::Array(items) => items.iter().any(|item| value_contains_any(item, filters)),
        Value::Object(map) => map.values().any(|item| value_contains_any(item, filters)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filters() -> FilterList {
        FilterList::new(["SECRET"])
    }

    #[test]
    fn redacts_nested_strings() {
        let value = json!({
            "content": [{"type": "text", "text": "a SECRET b"}],
            "meta": {"deep": {"deeper": ["x", "SECRET"]}}
        });
        let redacted = redact_value(&value, &filters());
        assert_eq!(redacted["content"][0]["text"], "a [FILTERED] b");
        assert_eq!(redacted["meta"]["deep"]["deeper"][1], "[FILTERED]");
        assert_eq!(redacted["content"][0]["type"], "text");
    }

    #[test]
    fn keys_are_never_redacted() {
        let value = json!({"SECRET": "value"});
        let redacted = redact_value(&value, &filters());
        assert!(redacted.get("SECRET").is_some());
    }

    #[test]
    fn non_string_leaves_pass_through() {
        let value = json!([1, 2.5, true, null, "SECRET"]);
        let redacted = redact_value(&value, &filters());
        assert_eq!(redacted, json!([1, 2.5, true, null, "[FILTERED]"]));
    }

    #[test]
    fn scalar_string_is_redacted() {
        let redacted = redact_value(&json!("SECRET"), &filters());
        assert_eq!(redacted, json!("[FILTERED]"));
    }

    #[test]
    fn contains_checks_leaves_not_keys() {
        assert!(value_contains_any(&json!({"a": ["b", "xSECRETx"]}), &filters()));
        assert!(!value_contains_any(&json!({"SECRET": 1}), &filters()));
    }
}
