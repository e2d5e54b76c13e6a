//! Helpers for working with JSON specifications.
//!
//! A specification is a plain [`serde_json::Value`]. Key order among sibling
//! object keys carries no meaning; element order within arrays does.

use serde_json::{Map, Value};

/// Returns an empty JSON object.
pub fn empty() -> Value {
    Value::Object(Map::new())
}

/// Wraps `value` in a single-key object: `{ key: value }`.
pub fn single(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.into(), value);
    Value::Object(map)
}

/// Shallow-merges `source` into `target` when `source` is an object.
///
/// Keys from `source` overwrite keys already present in `target`. Anything
/// other than an object contributes nothing.
pub fn spread(target: &mut Map<String, Value>, source: Option<Value>) {
    if let Some(Value::Object(map)) = source {
        target.extend(map);
    }
}

/// Collapses a list of specifications.
///
/// A single element is returned bare; any other length is returned as an
/// array in the original order.
pub fn collapse(items: Vec<Value>) -> Value {
    match <[Value; 1]>::try_from(items) {
        Ok([only]) => only,
        Err(items) => Value::Array(items),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collapse_single_is_bare() {
        assert_eq!(collapse(vec![json!({"a": 1})]), json!({"a": 1}));
    }

    #[test]
    fn collapse_many_keeps_order() {
        assert_eq!(
            collapse(vec![json!(2), json!(1), json!(3)]),
            json!([2, 1, 3])
        );
    }

    #[test]
    fn collapse_empty_is_empty_array() {
        assert_eq!(collapse(vec![]), json!([]));
    }

    #[test]
    fn spread_ignores_non_objects() {
        let mut target = Map::new();
        target.insert("a".into(), json!(1));
        spread(&mut target, Some(json!([1, 2])));
        spread(&mut target, Some(json!("text")));
        spread(&mut target, None);
        assert_eq!(Value::Object(target), json!({"a": 1}));
    }

    #[test]
    fn spread_overwrites() {
        let mut target = Map::new();
        target.insert("a".into(), json!(1));
        spread(&mut target, Some(json!({"a": 2, "b": 3})));
        assert_eq!(Value::Object(target), json!({"a": 2, "b": 3}));
    }

    #[test]
    fn single_key_object() {
        assert_eq!(single("bool", empty()), json!({"bool": {}}));
    }
}
