/// Context flattening.
///
/// Log entries carry an ordered sequence of nested string-keyed context
/// maps. The viewer wants a flat property set, so each map is walked
/// recursively and leaves are written under dotted keys prefixed with the
/// map's zero-based index in the sequence: element 0's `{"A":"1"}` becomes
/// `"0.A" = "1"`, element 2's `{"X":{"Y":"v"}}` becomes `"2.X.Y" = "v"`.

use std::collections::HashMap;

use serde_json::Value;

/// Flatten a sequence of context maps onto a property set.
///
/// Writes are add-or-replace: a later write for the same key wins.
pub fn flatten_contexts(
    contexts: &[serde_json::Map<String, Value>],
    properties: &mut HashMap<String, String>,
) {
    for (index, map) in contexts.iter().enumerate() {
        flatten_map(&index.to_string(), map, properties);
    }
}

/// Flatten one map under `prefix`, recursing into nested maps.
///
/// Accepted leaves are strings, JSON integers and booleans; every other
/// leaf kind (float, null, array) is dropped without writing a key.
/// Recursion depth is unbounded.
pub fn flatten_map(
    prefix: &str,
    map: &serde_json::Map<String, Value>,
    properties: &mut HashMap<String, String>,
) {
    for (key, value) in map {
        let flat_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::String(s) => {
                properties.insert(flat_key, s.clone());
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    properties.insert(flat_key, i.to_string());
                }
                // Floats and numbers beyond i64 are not part of the context
                // vocabulary and are dropped
            }
            Value::Bool(b) => {
                properties.insert(flat_key, b.to_string());
            }
            Value::Object(nested) => {
                flatten_map(&flat_key, nested, properties);
            }
            // Null and arrays are dropped
            Value::Null | Value::Array(_) => {}
        }
    }
}
