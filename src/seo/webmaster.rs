//! Search-console verification meta tags.

use crate::page::{Site, scalar_to_string};

/// Config key -> meta tag name.
pub const META_MAP: [(&str, &str); 6] = [
    ("alexa", "alexaVerifyID"),
    ("baidu", "baidu-site-verification"),
    ("bing", "msvalidate.01"),
    ("facebook", "facebook-domain-verification"),
    ("google", "google-site-verification"),
    ("yandex", "yandex-verification"),
];

/// A `<meta name=... content=...>` pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VerificationTag {
    pub name: &'static str,
    pub content: String,
}

/// Meta tag name for a `webmaster_verifications` key.
pub fn meta_name(key: &str) -> Option<&'static str> {
    META_MAP
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// Verification tags in configuration order.
///
/// Reads `site.webmaster_verifications`; unknown keys are skipped. Without
/// that mapping, `site.google_site_verification` still yields the google tag.
pub fn verification_tags(site: &Site) -> Vec<VerificationTag> {
    match site.get("webmaster_verifications").and_then(|v| v.as_object()) {
        Some(map) => map
            .iter()
            .filter_map(|(key, value)| {
                Some(VerificationTag {
                    name: meta_name(key)?,
                    content: scalar_to_string(value)?,
                })
            })
            .collect(),
        None => site
            .str("google_site_verification")
            .map(|content| VerificationTag {
                name: "google-site-verification",
                content: content.to_string(),
            })
            .into_iter()
            .collect(),
    }
}
