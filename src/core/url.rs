//! URL resolution against the site base URL.
//!
//! - `relative_url` / `absolute_url` - join a path with `baseurl` and `url`
//! - `is_absolute` - URI check (has a scheme)
//! - `escape` - percent-encode characters unsafe in HTML attributes

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::page::Site;

/// Marker used to skip absolutizing URLs that already carry a scheme.
const SCHEME_SEPARATOR: &str = "://";

/// Characters escaped by [`escape`].
///
/// `%` is deliberately absent so already-escaped input stays unchanged.
const URL_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Check whether `s` parses as a URI with a scheme.
///
/// Malformed input is reported as relative rather than as an error.
pub fn is_absolute(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Prefix `path` with the site base path.
///
/// `relative_url("img.png")` with `baseurl = "/blog"` -> `/blog/img.png`
pub fn relative_url(path: &str, site: &Site) -> String {
    let base = site.baseurl();
    let mut out = String::with_capacity(base.len() + path.len() + 2);
    if !base.is_empty() {
        push_with_leading_slash(&mut out, base);
    }
    push_with_leading_slash(&mut out, path);
    out
}

/// Join `path` with the site URL and base path.
///
/// Strings already containing `://` are returned unchanged, so the operation
/// is idempotent. Without `site.url` the relative URL is returned.
pub fn absolute_url(path: &str, site: &Site) -> String {
    if path.contains(SCHEME_SEPARATOR) {
        return path.to_string();
    }

    let relative = relative_url(path, site);
    match site.url() {
        Some(base) => {
            let joined = format!("{base}{relative}");
            // Normalize when possible; keep the raw join otherwise.
            Url::parse(&joined)
                .map(|url| url.to_string())
                .unwrap_or(joined)
        }
        None => relative,
    }
}

/// Percent-encode characters that are unsafe inside an attribute value.
///
/// `"/some image.png"` -> `"/some%20image.png"`
pub fn escape(url: &str) -> String {
    utf8_percent_encode(url, URL_UNSAFE).to_string()
}

/// Rewrite a trailing `/index.html` to `/`.
pub fn canonical_path(url: &str) -> String {
    match url.strip_suffix("/index.html") {
        Some(prefix) => format!("{prefix}/"),
        None => url.to_string(),
    }
}

#[inline]
fn push_with_leading_slash(out: &mut String, part: &str) {
    if !part.starts_with('/') {
        out.push('/');
    }
    out.push_str(part);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site(value: serde_json::Value) -> Site {
        Site::from_value(value)
    }

    mod absolute {
        use super::*;

        #[test]
        fn without_site_url() {
            assert_eq!(absolute_url("image.png", &Site::default()), "/image.png");
            assert_eq!(absolute_url("/image.png", &Site::default()), "/image.png");
        }

        #[test]
        fn with_site_url() {
            let site = site(json!({"url": "http://example.com"}));
            assert_eq!(absolute_url("/img.png", &site), "http://example.com/img.png");
            assert_eq!(absolute_url("img.png", &site), "http://example.com/img.png");
        }

        #[test]
        fn with_baseurl() {
            let site = site(json!({"url": "http://example.invalid/", "baseurl": "/foo/"}));
            assert_eq!(
                absolute_url("/page.html", &site),
                "http://example.invalid/foo/page.html"
            );
        }

        #[test]
        fn preserves_query_and_fragment() {
            let site = site(json!({"url": "http://example.com"}));
            assert_eq!(
                absolute_url("/a/?x=1#top", &site),
                "http://example.com/a/?x=1#top"
            );
        }

        #[test]
        fn idempotent() {
            let site = site(json!({"url": "http://example.com"}));
            let once = absolute_url("/page.html", &site);
            assert_eq!(absolute_url(&once, &site), once);
        }

        #[test]
        fn already_absolute() {
            let site = site(json!({"url": "http://example.com"}));
            assert_eq!(
                absolute_url("http://cdn.example.invalid/logo.png", &site),
                "http://cdn.example.invalid/logo.png"
            );
        }
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://example.com/a.png"));
        assert!(is_absolute("mailto:someone@example.com"));
        assert!(!is_absolute("/a.png"));
        assert!(!is_absolute("a.png"));
        assert!(!is_absolute(":"));
        assert!(!is_absolute(""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("/some image.png"), "/some%20image.png");
        assert_eq!(escape("/a\"b"), "/a%22b");
        assert_eq!(escape("http://example.com/a.png"), "http://example.com/a.png");
    }

    #[test]
    fn test_escape_idempotent() {
        let once = escape("/some image é.png");
        assert_eq!(escape(&once), once);
    }

    #[test]
    fn test_canonical_path() {
        assert_eq!(
            canonical_path("http://example.invalid/page/index.html"),
            "http://example.invalid/page/"
        );
        assert_eq!(canonical_path("/index.html"), "/");
        assert_eq!(canonical_path("/page.html"), "/page.html");
        assert_eq!(canonical_path("/index.html.bak"), "/index.html.bak");
    }
}
