//! Author attribution.
//!
//! The author is looked up, in order, from:
//!
//! 1. `page.author` (string key or mapping)
//! 2. the first entry of `page.authors`
//! 3. `site.author`
//!
//! A string key is resolved through `site.data.authors` when that has a
//! matching record; otherwise it becomes the author name.

use serde::Serialize;
use serde_json::Value;

use crate::debug;
use crate::page::{JsonMap, Page, Site, scalar_to_string};

/// Resolved author with optional Twitter handle and passthrough fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthorRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Handle without the leading `@`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Any other field of the author record (`image`, `url`, ...).
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl AuthorRecord {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn from_map(mut map: JsonMap) -> Self {
        let name = map.remove("name").as_ref().and_then(scalar_to_string);
        let twitter = map.remove("twitter").as_ref().and_then(scalar_to_string);
        Self {
            name,
            twitter,
            extra: map,
        }
    }

    /// Passthrough field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Default the handle to the name and drop any leading `@`.
    fn normalize_twitter(&mut self) {
        let handle = self.twitter.take().or_else(|| self.name.clone());
        self.twitter = handle
            .map(|h| h.trim_start_matches('@').to_string())
            .filter(|h| !h.is_empty());
    }
}

/// Resolve the page author, or `None` when no source names one.
pub fn resolve_author(page: &Page, site: &Site) -> Option<AuthorRecord> {
    let value = author_value(page, site)?;

    let mut record = match value {
        Value::Object(map) => AuthorRecord::from_map(map.clone()),
        Value::String(key) => match site.author_data(key) {
            Some(Value::Object(data)) => {
                let mut record = AuthorRecord::from_map(data.clone());
                record.name.get_or_insert_with(|| key.clone());
                record
            }
            _ => AuthorRecord::named(key),
        },
        other => {
            debug!("author"; "ignoring author value of unsupported type: {other}");
            return None;
        }
    };

    record.normalize_twitter();
    Some(record)
}

/// First non-empty author value from page, page list, then site.
fn author_value<'a>(page: &'a Page, site: &'a Site) -> Option<&'a Value> {
    page.get("author")
        .filter(|v| is_present(v))
        .or_else(|| {
            page.get("authors")
                .and_then(Value::as_array)
                .and_then(|authors| authors.first())
                .filter(|v| is_present(v))
        })
        .or_else(|| site.get("author").filter(|v| is_present(v)))
}

#[inline]
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
