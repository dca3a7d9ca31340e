//! Page and site inputs: typed views over front matter and site config.
//!
//! Both inputs are generic key-value trees (`serde_json::Value`). The views
//! here only add accessors; nothing is validated or copied.

mod meta;
mod paginator;
mod site;

pub use meta::Page;
pub use paginator::Paginator;
pub use site::Site;

use serde_json::Value;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, Value>;

/// Get `value` as a string, treating `""` as absent.
#[inline]
pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Walk nested mappings along `path`.
///
/// Returns `None` as soon as a segment is missing or a non-mapping value is
/// found in the middle of the path.
pub fn lookup<'a>(map: &'a JsonMap, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }
    current.get(*last)
}

/// Collect a list of strings from an array (or a single string) value.
pub fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(vec![s.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Convert a scalar value to its display string (`5` -> `"5"`).
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
