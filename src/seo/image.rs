//! Sharing image resolution.
//!
//! `page.image` may be a string (the path) or a mapping. For mappings the
//! path is taken from `path`, then `facebook`, then `twitter`. The resolved
//! path is always an absolute, escaped URL.

use serde::Serialize;
use serde_json::Value;

use crate::core::url::{absolute_url, escape, is_absolute};
use crate::debug;
use crate::page::{JsonMap, Page, Site, non_empty_str, scalar_to_string};

/// Keys that may carry the image path, by preference.
const PATH_KEYS: [&str; 3] = ["path", "facebook", "twitter"];

/// Resolved sharing image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    /// Absolute, percent-escaped URL.
    pub path: String,
    /// Other fields (`height`, `width`, `alt`, ...), passed through.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl ImageRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Passthrough scalar field as display text (`5` -> `"5"`).
    pub fn text(&self, key: &str) -> Option<String> {
        self.extra.get(key).and_then(scalar_to_string)
    }

    /// True when the record carries nothing but the path.
    pub fn is_path_only(&self) -> bool {
        self.extra.is_empty()
    }
}

/// Resolve `page.image`, or `None` when no path can be found.
pub fn resolve_image(page: &Page, site: &Site) -> Option<ImageRecord> {
    let (raw_path, extra) = match page.get("image")? {
        Value::String(path) if path.is_empty() => return None,
        Value::String(path) => (path.clone(), JsonMap::new()),
        Value::Object(map) => split_path(map)?,
        other => {
            debug!("image"; "ignoring image value of unsupported type: {other}");
            return None;
        }
    };

    let path = if is_absolute(&raw_path) {
        raw_path
    } else {
        absolute_url(&raw_path, site)
    };

    Some(ImageRecord {
        path: escape(&path),
        extra,
    })
}

/// Pick the path from a mapping and return it with the remaining fields.
fn split_path(map: &JsonMap) -> Option<(String, JsonMap)> {
    let path = PATH_KEYS
        .iter()
        .find_map(|key| non_empty_str(map.get(*key)))?
        .to_string();

    let extra = map
        .iter()
        .filter(|(key, value)| !PATH_KEYS.contains(&key.as_str()) && !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some((path, extra))
}
