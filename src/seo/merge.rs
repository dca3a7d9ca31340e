//! Generic operations on JSON trees used when assembling structured data.

use serde_json::Value;

use crate::page::JsonMap;

/// Merge `other` into `base`; `other` wins on conflicts.
///
/// Mapping-vs-mapping recurses, anything else is overwritten.
pub fn deep_merge(base: &mut JsonMap, other: &JsonMap) {
    for (key, incoming) in other {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (base.get_mut(key), incoming)
        {
            deep_merge(existing, incoming);
        } else {
            base.insert(key.clone(), incoming.clone());
        }
    }
}

/// Remove `null` values at every depth.
///
/// Mapping entries holding `null` are removed and `null` array items are
/// dropped, so arrays may shrink.
pub fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}
