//! Page front matter.

use serde_json::Value;

use super::{JsonMap, lookup, non_empty_str};

/// Page front matter as provided by the host pipeline.
///
/// # Recognized Fields
///
/// | Field              | Type               | Description                        |
/// |--------------------|--------------------|------------------------------------|
/// | `title`            | `String`           | Page title                         |
/// | `description`      | `String`           | Page description                   |
/// | `excerpt`          | `String`           | Fallback description               |
/// | `date`             | `String`           | Publication date                   |
/// | `last_modified_at` | `String`           | Last update date                   |
/// | `author`           | `String` / mapping | Author key or record               |
/// | `authors`          | `[String]`         | Author keys, first one wins        |
/// | `image`            | `String` / mapping | Sharing image                      |
/// | `lang`             | `String`           | Page language                      |
/// | `url`, `permalink` | `String`           | Page URL path                      |
/// | `canonical_url`    | `String`           | Explicit canonical URL             |
/// | `seo`              | mapping            | `name`, `type`, `date_modified`, `links` |
/// | `structured_data`  | mapping            | Custom JSON-LD merged over output  |
///
/// Any other field is kept and reachable through [`Page::get`].
#[derive(Debug, Clone, Default)]
pub struct Page {
    data: JsonMap,
}

impl Page {
    pub fn new(data: JsonMap) -> Self {
        Self { data }
    }

    /// Build from any JSON value; non-mapping values give an empty page.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            _ => Self::default(),
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty string field.
    #[inline]
    pub fn str(&self, key: &str) -> Option<&str> {
        non_empty_str(self.data.get(key))
    }

    /// Page URL path: `url`, falling back to `permalink`.
    pub fn url(&self) -> Option<&str> {
        self.str("url").or_else(|| self.str("permalink"))
    }

    /// The `seo` sub-mapping. Non-mapping values (e.g. arrays) are ignored.
    pub fn seo(&self) -> Option<&JsonMap> {
        self.data.get("seo").and_then(Value::as_object)
    }

    /// Non-empty string inside `seo`.
    pub fn seo_str(&self, key: &str) -> Option<&str> {
        self.seo().and_then(|seo| non_empty_str(seo.get(key)))
    }

    /// Value at a nested path (`["twitter", "card"]`).
    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.data, path).filter(|v| !v.is_null())
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.data
    }
}
