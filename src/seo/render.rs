//! HTML rendering of a [`SeoDrop`].
//!
//! The template (`template.html`) is embedded at compile time, minified once
//! and compiled into a process-wide [`Tera`] instance. Every value handed to
//! the template is computed and escaped here, so the template itself only
//! branches and interpolates.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use super::drop::SeoDrop;
use super::webmaster::{VerificationTag, verification_tags};
use crate::core::url::{absolute_url, escape};
use crate::debug;
use crate::page::{Page, Paginator, Site, non_empty_str, scalar_to_string};
use crate::utils::html::escape_once;

const TEMPLATE_NAME: &str = "seo.html";
const TEMPLATE_SOURCE: &str = include_str!("template.html");

const DEFAULT_IMAGE_CARD: &str = "summary_large_image";
const DEFAULT_CARD: &str = "summary";

/// Whitespace after `{`, `}`, `>\n` or `,\n`.
static MINIFY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([{}]|[>,]\n)(\s+)").unwrap());

static TEMPLATE: LazyLock<Result<Tera, String>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(TEMPLATE_NAME, &minify(TEMPLATE_SOURCE))
        .map_err(|e| e.to_string())?;
    Ok(tera)
});

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("embedded template is invalid: {0}")]
    Template(String),

    #[error("failed to render SEO tag: {0}")]
    Render(#[from] tera::Error),

    #[error("failed to serialize structured data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the SEO fragment for one page.
///
/// `text` holds the inline tag options (`title=false` disables `<title>`).
pub fn render(
    page: &Page,
    site: &Site,
    text: &str,
    paginator: Option<&Paginator>,
) -> Result<String, RenderError> {
    let drop = SeoDrop::new(page, site, text, paginator);
    render_drop(&drop)
}

/// Render an existing drop.
pub fn render_drop(drop: &SeoDrop<'_>) -> Result<String, RenderError> {
    let tera = TEMPLATE
        .as_ref()
        .map_err(|e| RenderError::Template(e.clone()))?;
    let context = Context::from_serialize(TagContext::build(drop)?)?;
    let html = tera.render(TEMPLATE_NAME, &context)?;
    debug!("render"; "rendered {} bytes for {}", html.len(), drop.page().url().unwrap_or("<no url>"));
    Ok(html)
}

/// Strip indentation and blank lines from the template source.
///
/// Whitespace following `{`, `}`, `>\n` or `,\n` is removed. When the next
/// character is `-` one whitespace character is kept, so `}} -->` survives.
pub fn minify(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in MINIFY_RE.captures_iter(source) {
        let Some(ws) = caps.get(2) else { continue };
        let mut end = ws.end();
        if source[end..].starts_with('-') {
            end = ws
                .as_str()
                .char_indices()
                .last()
                .map_or(ws.start(), |(i, _)| ws.start() + i);
        }
        out.push_str(&source[last..ws.start()]);
        last = end;
    }

    out.push_str(&source[last..]);
    out
}

// ============================================================================
// Template context
// ============================================================================

/// Flat, pre-escaped view handed to the template.
#[derive(Debug, Serialize)]
struct TagContext {
    version: &'static str,
    title_enabled: bool,
    title: Option<String>,
    page_title: Option<String>,
    author_name: Option<String>,
    page_lang: String,
    description: Option<String>,
    canonical_url: Option<String>,
    site_title: Option<String>,
    image_path: Option<String>,
    image_height: Option<String>,
    image_width: Option<String>,
    image_alt: Option<String>,
    is_article: bool,
    date_published: Option<String>,
    prev_url: Option<String>,
    next_url: Option<String>,
    twitter_card: String,
    twitter_site: Option<String>,
    twitter_creator: Option<String>,
    fb_admins: Option<String>,
    fb_publisher: Option<String>,
    fb_app_id: Option<String>,
    verifications: Vec<VerificationTag>,
    json_ld: String,
}

impl TagContext {
    fn build(drop: &SeoDrop<'_>) -> Result<Self, serde_json::Error> {
        let page = drop.page();
        let site = drop.site();
        let image = drop.image();
        let image_text = |key: &str| image.and_then(|img| img.text(key)).map(attr);
        let has_twitter = site.get("twitter").is_some();
        let paginated_url = |path: Option<String>| path.map(|p| attr(escape(&absolute_url(&p, site))));

        Ok(Self {
            version: drop.version(),
            title_enabled: drop.title_enabled(),
            title: drop.title().map(str::to_string),
            page_title: drop.page_title().map(str::to_string),
            author_name: drop.author().and_then(|a| a.name.clone()).map(attr),
            page_lang: attr(drop.page_lang().to_string()),
            description: drop.description().map(str::to_string),
            canonical_url: drop.canonical_url().map(|url| attr(url.to_string())),
            site_title: drop.site_title().map(str::to_string),
            image_path: image.map(|img| img.path.clone()),
            image_height: image_text("height"),
            image_width: image_text("width"),
            image_alt: image_text("alt"),
            is_article: drop.has_date(),
            date_published: drop.date_published().map(str::to_string),
            prev_url: paginated_url(drop.paginator().and_then(|p| p.previous_path(site))),
            next_url: paginated_url(drop.paginator().and_then(|p| p.next_path(site))),
            twitter_card: twitter_card(page, site, image.is_some()),
            twitter_site: site
                .nested_str(&["twitter", "username"])
                .map(|name| attr(name.trim_start_matches('@').to_string()))
                .filter(|name| !name.is_empty()),
            twitter_creator: drop
                .author()
                .and_then(|a| a.twitter.clone())
                .filter(|_| has_twitter)
                .map(attr),
            fb_admins: facebook(site, "admins"),
            fb_publisher: facebook(site, "publisher"),
            fb_app_id: facebook(site, "app_id"),
            verifications: verification_tags(site)
                .into_iter()
                .map(|tag| VerificationTag {
                    content: attr(tag.content),
                    ..tag
                })
                .collect(),
            json_ld: drop.json_ld().to_json()?,
        })
    }
}

/// Card type: page override, site default, then by image presence.
fn twitter_card(page: &Page, site: &Site, has_image: bool) -> String {
    if !has_image {
        return DEFAULT_CARD.into();
    }
    let card = non_empty_str(page.nested(&["twitter", "card"]))
        .or_else(|| site.nested_str(&["twitter", "card"]))
        .unwrap_or(DEFAULT_IMAGE_CARD);
    attr(card.to_string())
}

fn facebook(site: &Site, key: &str) -> Option<String> {
    site.nested(&["facebook", key])
        .and_then(scalar_to_string)
        .map(attr)
}

/// Escape a raw value for an attribute, leaving existing entities alone.
#[inline]
fn attr(value: String) -> String {
    escape_once(&value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn render_with(page: Value, site: Value, text: &str, paginator: Option<Paginator>) -> String {
        render(
            &Page::from_value(page),
            &Site::from_value(site),
            text,
            paginator.as_ref(),
        )
        .unwrap()
    }

    fn output(page: Value, site: Value) -> String {
        render_with(page, site, "", None)
    }

    fn page() -> Value {
        json!({"url": "/page.html"})
    }

    fn json_ld_of(html: &str) -> Value {
        let start = html.find(r#"<script type="application/ld+json">"#).unwrap();
        let body = &html[start + r#"<script type="application/ld+json">"#.len()..];
        let end = body.find("</script>").unwrap();
        serde_json::from_str(body[..end].trim()).unwrap()
    }

    mod minify {
        use super::*;

        #[test]
        fn strips_indentation_after_tags() {
            assert_eq!(minify("<a>\n    <b>\n"), "<a>\n<b>\n");
        }

        #[test]
        fn strips_whitespace_after_braces() {
            assert_eq!(minify("{% if x %}\n  <b>\n{% endif %}\n\n<c>"), "{% if x %}<b>\n{% endif %}<c>");
        }

        #[test]
        fn keeps_space_before_dash() {
            assert_eq!(minify("v{{ version }} -->"), "v{{version }} -->");
            assert_eq!(minify("}\n  -x"), "} -x");
        }

        #[test]
        fn strips_after_comma_newline() {
            assert_eq!(minify("a,\n   b"), "a,\nb");
        }

        #[test]
        fn template_compiles() {
            assert!(TEMPLATE.is_ok());
        }
    }

    #[test]
    fn test_banner() {
        let html = output(page(), json!({}));
        assert!(html.starts_with(&format!("<!-- Begin SEO tag v{} -->\n", env!("CARGO_PKG_VERSION"))));
        assert!(html.ends_with("</script>\n<!-- End SEO tag -->\n"));
    }

    #[test]
    fn test_minified_head() {
        let site = json!({"title": "Foo", "url": "http://example.invalid"});
        let html = output(page(), site);
        let expected = format!(
            "<!-- Begin SEO tag v{} -->\n\
             <title>Foo</title>\n\
             <meta property=\"og:title\" content=\"Foo\" />\n\
             <meta property=\"og:locale\" content=\"en_US\" />\n\
             <link rel=\"canonical\" href=\"http://example.invalid/page.html\" />\n\
             <meta property=\"og:url\" content=\"http://example.invalid/page.html\" />\n\
             <meta property=\"og:site_name\" content=\"Foo\" />\n\
             <meta property=\"og:type\" content=\"website\" />\n",
            env!("CARGO_PKG_VERSION")
        );
        assert!(html.starts_with(&expected), "{html}");
    }

    mod title {
        use super::*;

        #[test]
        fn page_and_site() {
            let html = output(json!({"title": "foo"}), json!({"title": "bar"}));
            assert!(html.contains("<title>foo | bar</title>"));
            assert!(html.contains(r#"<meta property="og:title" content="foo" />"#));
            assert!(html.contains(r#"<meta property="twitter:title" content="foo" />"#));
        }

        #[test]
        fn site_title_and_description() {
            let site = json!({"title": "Site Title", "description": "Site Description"});
            let html = output(json!({}), site);
            assert!(html.contains("<title>Site Title | Site Description</title>"));
        }

        #[test]
        fn disabled() {
            let html = render_with(json!({"title": "foo"}), json!({}), "title=false", None);
            assert!(!html.contains("<title>"));
            assert!(html.contains(r#"<meta property="og:title" content="foo" />"#));
        }

        #[test]
        fn paginated() {
            let html = render_with(
                json!({"title": "Blog"}),
                json!({"title": "Site"}),
                "",
                Some(Paginator::new(2, 10)),
            );
            assert!(html.contains("<title>Page 2 of 10 for Blog | Site</title>"));
        }
    }

    mod description {
        use super::*;

        #[test]
        fn page_description() {
            let html = output(json!({"description": "foo"}), json!({}));
            assert!(html.contains(r#"<meta name="description" content="foo" />"#));
            assert!(html.contains(r#"<meta property="og:description" content="foo" />"#));
            assert!(html.contains(r#"<meta property="twitter:description" content="foo" />"#));
        }

        #[test]
        fn escaped() {
            let html = output(json!({"description": "Tom & Jerry"}), json!({}));
            assert!(html.contains(r#"<meta name="description" content="Tom &amp; Jerry" />"#));
        }
    }

    mod urls {
        use super::*;

        #[test]
        fn index_rewritten() {
            let html = output(
                json!({"permalink": "/page/index.html"}),
                json!({"url": "http://example.invalid"}),
            );
            assert!(html.contains(r#"<link rel="canonical" href="http://example.invalid/page/" />"#));
            assert!(html.contains(r#"<meta property="og:url" content="http://example.invalid/page/" />"#));
        }

        #[test]
        fn baseurl() {
            let site = json!({"url": "http://example.invalid", "baseurl": "/foo"});
            let html = output(page(), site);
            assert!(html.contains(r#"<link rel="canonical" href="http://example.invalid/foo/page.html" />"#));
        }

        #[test]
        fn explicit_canonical() {
            let page = json!({"url": "/page.html", "canonical_url": "https://example.org/a?x=1&y=2"});
            let html = output(page, json!({"url": "http://example.invalid"}));
            assert!(html.contains(r#"<link rel="canonical" href="https://example.org/a?x=1&amp;y=2" />"#));
        }

        #[test]
        fn no_page_url() {
            let html = output(json!({}), json!({"url": "http://example.invalid"}));
            assert!(!html.contains("rel=\"canonical\""));
            assert!(!html.contains("og:url"));
        }
    }

    mod image {
        use super::*;

        fn site() -> Value {
            json!({"url": "http://example.invalid"})
        }

        #[test]
        fn relative_string() {
            let html = output(json!({"image": "/img/foo.png"}), site());
            assert!(html.contains(r#"<meta property="og:image" content="http://example.invalid/img/foo.png" />"#));
            assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
            assert!(html.contains(r#"<meta property="twitter:image" content="http://example.invalid/img/foo.png" />"#));
        }

        #[test]
        fn dimensions_and_alt() {
            let image = json!({"path": "/img/foo.png", "height": 1, "width": 2, "alt": "A \"pic\""});
            let html = output(json!({"image": image}), site());
            assert!(html.contains(r#"<meta property="og:image:height" content="1" />"#));
            assert!(html.contains(r#"<meta property="og:image:width" content="2" />"#));
            assert!(html.contains(r#"<meta property="og:image:alt" content="A &quot;pic&quot;" />"#));
            assert!(html.contains(r#"<meta name="twitter:image:alt" content="A &quot;pic&quot;" />"#));
        }

        #[test]
        fn without_image() {
            let html = output(page(), site());
            assert!(!html.contains("og:image"));
            assert!(html.contains(r#"<meta name="twitter:card" content="summary" />"#));
        }
    }

    #[test]
    fn test_article() {
        let page = json!({"url": "/post/", "date": "2017-01-01"});
        let html = output(page, json!({"timezone": "America/New_York"}));
        assert!(html.contains(r#"<meta property="og:type" content="article" />"#));
        assert!(html.contains(
            r#"<meta property="article:published_time" content="2017-01-01T00:00:00-05:00" />"#
        ));
    }

    #[test]
    fn test_empty_date_is_website() {
        let html = output(json!({"url": "/post/", "date": ""}), json!({}));
        assert!(html.contains(r#"<meta property="og:type" content="website" />"#));
        assert!(!html.contains("article:published_time"));
    }

    #[test]
    fn test_locale() {
        let html = output(json!({"lang": "en-GB"}), json!({}));
        assert!(html.contains(r#"<meta property="og:locale" content="en_GB" />"#));
    }

    #[test]
    fn test_author() {
        let html = output(json!({"author": "Ben"}), json!({}));
        assert!(html.contains(r#"<meta name="author" content="Ben" />"#));
    }

    mod twitter {
        use super::*;

        #[test]
        fn card_overrides() {
            let site = json!({"twitter": {"card": "summary"}});
            let html = output(json!({"image": "a.png"}), site.clone());
            assert!(html.contains(r#"<meta name="twitter:card" content="summary" />"#));

            let page = json!({"image": "a.png", "twitter": {"card": "player"}});
            let html = output(page, site);
            assert!(html.contains(r#"<meta name="twitter:card" content="player" />"#));
        }

        #[test]
        fn site_and_creator() {
            let site = json!({"twitter": {"username": "@jekyllrb"}});
            let html = output(json!({"author": {"name": "Ben", "twitter": "@benbalter"}}), site);
            assert!(html.contains(r#"<meta name="twitter:site" content="@jekyllrb" />"#));
            assert!(html.contains(r#"<meta name="twitter:creator" content="@benbalter" />"#));
        }

        #[test]
        fn card_is_escaped() {
            let page = json!({"image": "a.png", "twitter": {"card": "x\" onload=\"alert(1)"}});
            let html = output(page, json!({}));
            assert!(html.contains(
                r#"<meta name="twitter:card" content="x&quot; onload=&quot;alert(1)" />"#
            ));
            assert!(!html.contains("onload=\"alert"));
        }

        #[test]
        fn no_creator_without_site_account() {
            let html = output(json!({"author": "Ben"}), json!({}));
            assert!(!html.contains("twitter:creator"));
            assert!(!html.contains("twitter:site"));
        }
    }

    #[test]
    fn test_facebook() {
        let site = json!({"facebook": {"admins": "jekyllrb-fb-admins", "app_id": "jekyllrb-fb-app_id", "publisher": "jekyllrb-fb-page"}});
        let html = output(page(), site);
        assert!(html.contains(r#"<meta property="fb:admins" content="jekyllrb-fb-admins" />"#));
        assert!(html.contains(r#"<meta property="article:publisher" content="jekyllrb-fb-page" />"#));
        assert!(html.contains(r#"<meta property="fb:app_id" content="jekyllrb-fb-app_id" />"#));
    }

    #[test]
    fn test_webmaster_verifications() {
        let site = json!({"webmaster_verifications": {"google": "foo", "bing": "bar", "other": "x"}});
        let html = output(page(), site);
        assert!(html.contains(
            "<meta name=\"google-site-verification\" content=\"foo\" />\n<meta name=\"msvalidate.01\" content=\"bar\" />\n"
        ));
        assert!(!html.contains("\"x\""));
    }

    #[test]
    fn test_pagination_links() {
        let paginator = Paginator {
            previous_page_path: Some("foo".into()),
            next_page_path: Some("bar".into()),
            ..Paginator::new(2, 3)
        };
        let html = render_with(page(), json!({"url": "http://example.invalid"}), "", Some(paginator));
        assert!(html.contains(r#"<link rel="prev" href="http://example.invalid/foo" />"#));
        assert!(html.contains(r#"<link rel="next" href="http://example.invalid/bar" />"#));
    }

    mod json_ld {
        use super::*;

        #[test]
        fn minified_script() {
            let page = json!({"title": "post", "url": "/post/", "date": "2017-01-01"});
            let html = output(page, json!({}));
            assert!(html.contains(
                "<script type=\"application/ld+json\">\n{\"@context\":\"https://schema.org\",\"@type\":\"BlogPosting\",\"headline\":\"post\","
            ));
        }

        #[test]
        fn no_nulls() {
            let html = output(json!({}), json!({}));
            assert!(!json_ld_of(&html).to_string().contains(":null"));
        }

        #[test]
        fn script_cannot_be_closed_early() {
            let page = json!({"url": "/", "seo": {"links": ["</script><script>alert(1)</script>"]}});
            let html = output(page, json!({}));
            assert_eq!(html.matches("</script>").count(), 1);
            assert_eq!(
                json_ld_of(&html)["sameAs"],
                json!(["</script><script>alert(1)</script>"])
            );
        }

        #[test]
        fn custom_data() {
            let page = json!({"url": "/", "structured_data": {"@type": "Organization"}});
            let html = output(page, json!({}));
            assert_eq!(json_ld_of(&html)["@type"], json!("Organization"));
        }
    }
}
