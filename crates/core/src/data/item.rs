use serde_json::Value;

/// Render a dataset value as the string strategies compare against.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract the comparable string of a dataset item.
///
/// With a key, objects are compared on that field and objects missing it
/// are not comparable. Non-object items, or any item without a key, are
/// compared directly.
pub fn comparable_value(item: &Value, key: Option<&str>) -> Option<String> {
    match (key, item) {
        (Some(key), Value::Object(fields)) => fields.get(key).map(stringify),
        _ => Some(stringify(item)),
    }
}
