//! Checks on site and paginator inputs.
//!
//! Site problems are reported as warnings: rendering still proceeds and the
//! affected tags are simply missing or degraded. An impossible paginator
//! position is an error.

use serde_json::Value;

use super::{ConfigDiagnostics, FieldPath};
use crate::page::{Paginator, Site};
use crate::seo::webmaster::{META_MAP, meta_name};
use crate::utils::date::is_known_timezone;

const PAGINATOR_PLACEHOLDERS: [&str; 2] = ["%<current>s", "%<total>s"];
const URL_HINT: &str = "use format like https://example.com";

/// Validate site configuration keys the SEO engine reads.
pub fn validate_site(site: &Site) -> ConfigDiagnostics {
    let mut diag = ConfigDiagnostics::new();
    check_url(site, &mut diag);
    check_timezone(site, &mut diag);
    check_paginator_message(site, &mut diag);
    check_paginate_path(site, &mut diag);
    check_webmaster(site, &mut diag);
    diag
}

/// Validate a paginator against its own page count.
pub fn validate_paginator(paginator: &Paginator) -> ConfigDiagnostics {
    let mut diag = ConfigDiagnostics::new();
    if paginator.page == 0 {
        diag.error(FieldPath::PAGINATOR_PAGE, "page numbers start at 1");
    } else if paginator.total_pages > 0 && paginator.page > paginator.total_pages {
        diag.error(
            FieldPath::PAGINATOR_PAGE,
            format!(
                "page {} is past the last page ({})",
                paginator.page, paginator.total_pages
            ),
        );
    }
    diag
}

fn check_url(site: &Site, diag: &mut ConfigDiagnostics) {
    let Some(url_str) = site.str("url") else {
        return;
    };

    match url::Url::parse(url_str) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.warn_with_hint(
                    FieldPath::URL,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    URL_HINT,
                );
            }
            if parsed.host_str().is_none() {
                diag.warn_with_hint(FieldPath::URL, "URL must have a valid host", URL_HINT);
            }
        }
        Err(e) => {
            diag.warn_with_hint(
                FieldPath::URL,
                format!("invalid URL '{url_str}': {e}"),
                URL_HINT,
            );
        }
    }
}

fn check_timezone(site: &Site, diag: &mut ConfigDiagnostics) {
    if let Some(tz) = site.timezone()
        && !is_known_timezone(tz)
    {
        diag.warn_with_hint(
            FieldPath::TIMEZONE,
            format!("unknown timezone '{tz}', dates will be read as UTC"),
            "use an IANA name such as \"America/New_York\"",
        );
    }
}

fn check_paginator_message(site: &Site, diag: &mut ConfigDiagnostics) {
    if let Some(message) = site.str("seo_paginator_message")
        && !PAGINATOR_PLACEHOLDERS.iter().any(|p| message.contains(p))
    {
        diag.warn_with_hint(
            FieldPath::PAGINATOR_MESSAGE,
            "message has no page placeholders, every page gets the same title",
            "include %<current>s and %<total>s, e.g. \"Page %<current>s of %<total>s for \"",
        );
    }
}

fn check_paginate_path(site: &Site, diag: &mut ConfigDiagnostics) {
    if let Some(pattern) = site.str("paginate_path")
        && !pattern.contains(":num")
    {
        diag.warn_with_hint(
            FieldPath::PAGINATE_PATH,
            "pattern has no :num placeholder, prev/next links cannot be derived",
            "use a pattern like \"/page:num/\"",
        );
    }
}

fn check_webmaster(site: &Site, diag: &mut ConfigDiagnostics) {
    let Some(value) = site.get("webmaster_verifications") else {
        return;
    };

    let Value::Object(map) = value else {
        diag.warn(FieldPath::WEBMASTER, "must be a table of service = code");
        return;
    };

    let known = || {
        META_MAP
            .iter()
            .map(|(key, _)| *key)
            .collect::<Vec<_>>()
            .join(", ")
    };
    for key in map.keys().filter(|key| meta_name(key).is_none()) {
        diag.warn_with_hint(
            FieldPath::WEBMASTER,
            format!("unknown service '{key}' is ignored"),
            format!("supported services: {}", known()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn warnings(site: Value) -> Vec<String> {
        validate_site(&Site::from_value(site))
            .warnings()
            .iter()
            .map(|w| format!("{}: {}", w.field.as_str(), w.message))
            .collect()
    }

    #[test]
    fn test_clean_site() {
        let site = json!({
            "url": "https://example.com",
            "timezone": "America/New_York",
            "seo_paginator_message": "%<current>s of %<total>s",
            "paginate_path": "/page:num/",
            "webmaster_verifications": {"google": "x"},
        });
        assert!(warnings(site).is_empty());
    }

    mod url {
        use super::*;

        #[test]
        fn bad_scheme() {
            let w = warnings(json!({"url": "ftp://example.com"}));
            assert_eq!(w.len(), 1);
            assert!(w[0].contains("scheme 'ftp'"));
        }

        #[test]
        fn unparseable() {
            let w = warnings(json!({"url": "example.com"}));
            assert_eq!(w.len(), 1);
            assert!(w[0].starts_with("url: invalid URL"));
        }
    }

    #[test]
    fn test_unknown_timezone() {
        let w = warnings(json!({"timezone": "Mars/Olympus"}));
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("Mars/Olympus"));
    }

    #[test]
    fn test_paginator_message_without_placeholders() {
        let w = warnings(json!({"seo_paginator_message": "Another page of "}));
        assert_eq!(w.len(), 1);
        assert!(w[0].starts_with("seo_paginator_message"));
    }

    #[test]
    fn test_paginate_path_without_num() {
        let w = warnings(json!({"paginate_path": "/page/"}));
        assert_eq!(w.len(), 1);
    }

    mod webmaster {
        use super::*;

        #[test]
        fn unknown_keys() {
            let w = warnings(json!({"webmaster_verifications": {"google": "a", "altavista": "b"}}));
            assert_eq!(w, ["webmaster_verifications: unknown service 'altavista' is ignored"]);
        }

        #[test]
        fn not_a_table() {
            let w = warnings(json!({"webmaster_verifications": "abc"}));
            assert_eq!(w.len(), 1);
        }
    }

    mod paginator {
        use super::*;

        #[test]
        fn valid() {
            assert!(!validate_paginator(&Paginator::new(2, 10)).has_errors());
        }

        #[test]
        fn page_zero() {
            assert!(validate_paginator(&Paginator::new(0, 10)).has_errors());
        }

        #[test]
        fn past_the_end() {
            let diag = validate_paginator(&Paginator::new(11, 10));
            assert_eq!(diag.errors().len(), 1);
            assert!(diag.errors()[0].message.contains("past the last page"));
        }
    }
}
