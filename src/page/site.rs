//! Site configuration as seen by the SEO engine.

use serde_json::Value;

use super::{JsonMap, lookup, non_empty_str};

/// Site-wide configuration and data.
///
/// Recognized keys: `title`, `name`, `description`, `tagline`, `lang`,
/// `logo`, `url`, `baseurl`, `author`, `timezone`, `social.{name,links}`,
/// `data.authors`, `twitter.{username,card}`, `facebook.{admins,app_id,publisher}`,
/// `webmaster_verifications`, `google_site_verification`,
/// `seo_paginator_message`, `paginate_path`.
#[derive(Debug, Clone, Default)]
pub struct Site {
    data: JsonMap,
}

impl Site {
    pub fn new(data: JsonMap) -> Self {
        Self { data }
    }

    /// Build from any JSON value; non-mapping values give an empty site.
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

    /// Value at a nested path (`["social", "links"]`).
    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.data, path).filter(|v| !v.is_null())
    }

    /// Non-empty string at a nested path.
    pub fn nested_str(&self, path: &[&str]) -> Option<&str> {
        non_empty_str(lookup(&self.data, path))
    }

    /// Site URL without trailing slash (`https://example.com`).
    pub fn url(&self) -> Option<&str> {
        self.str("url")
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// Base path without trailing slash (`/blog`), empty when unset.
    pub fn baseurl(&self) -> &str {
        self.str("baseurl")
            .map(|base| base.trim_end_matches('/'))
            .unwrap_or("")
    }

    /// Entry of `data.authors`, when that is a mapping.
    pub fn author_data(&self, key: &str) -> Option<&Value> {
        self.nested(&["data", "authors"])?.as_object()?.get(key)
    }

    /// Configured IANA timezone name.
    pub fn timezone(&self) -> Option<&str> {
        self.str("timezone")
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_trailing_slash() {
        let site = Site::from_value(json!({"url": "https://example.com/"}));
        assert_eq!(site.url(), Some("https://example.com"));
    }

    #[test]
    fn test_baseurl_default() {
        assert_eq!(Site::default().baseurl(), "");
        let site = Site::from_value(json!({"baseurl": "/foo/"}));
        assert_eq!(site.baseurl(), "/foo");
    }

    #[test]
    fn test_author_data_requires_mapping() {
        let site = Site::from_value(json!({"data": {"authors": ["foo", "bar"]}}));
        assert!(site.author_data("foo").is_none());

        let site = Site::from_value(json!({"data": {"authors": {"foo": {"name": "Foo"}}}}));
        assert_eq!(site.author_data("foo"), Some(&json!({"name": "Foo"})));
    }
}
