//! The metadata record for one render.
//!
//! [`SeoDrop`] borrows the page, site and pagination inputs and derives every
//! SEO field from them on first access. Each field lives in its own
//! `OnceCell`, so "not computed yet" and "computed, absent" stay distinct and
//! nothing is recomputed during a render.

use std::cell::OnceCell;

use serde::Serialize;

use super::author::{AuthorRecord, resolve_author};
use super::format::format_text;
use super::image::{ImageRecord, resolve_image};
use super::json_ld::JsonLd;
use crate::core::url::{absolute_url, canonical_path, escape};
use crate::debug;
use crate::page::{JsonMap, Page, Paginator, Site, scalar_to_string, string_list};
use crate::utils::date::to_xmlschema;
use crate::utils::html::escape_once;

/// Joins the parts of a composed title.
pub const TITLE_SEPARATOR: &str = " | ";

/// Banner version, stamped into the rendered fragment.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LANG: &str = "en_US";
const DEFAULT_PAGINATOR_MESSAGE: &str = "Page %<current>s of %<total>s for ";
const TITLE_DISABLED: &str = "title=false";

/// URLs treated as the homepage or the about page.
const HOMEPAGE_OR_ABOUT: [&str; 6] = [
    "/",
    "/index.html",
    "/index.htm",
    "index.html",
    "/about/",
    "/about/index.html",
];

#[derive(Default)]
struct Cache {
    site_title: OnceCell<Option<String>>,
    site_description: OnceCell<Option<String>>,
    site_tagline: OnceCell<Option<String>>,
    page_title: OnceCell<Option<String>>,
    title: OnceCell<Option<String>>,
    name: OnceCell<Option<String>>,
    description: OnceCell<Option<String>>,
    author: OnceCell<Option<AuthorRecord>>,
    date_published: OnceCell<Option<String>>,
    date_modified: OnceCell<Option<String>>,
    seo_type: OnceCell<String>,
    links: OnceCell<Option<Vec<String>>>,
    logo: OnceCell<Option<String>>,
    image: OnceCell<Option<ImageRecord>>,
    page_lang: OnceCell<String>,
    canonical_url: OnceCell<Option<String>>,
    page_number: OnceCell<Option<String>>,
}

/// Resolved SEO metadata for a single page.
///
/// # Example
///
/// ```ignore
/// let page = Page::from_value(json!({"title": "post", "url": "/post/"}));
/// let site = Site::from_value(json!({"title": "blog", "url": "https://example.com"}));
/// let drop = SeoDrop::new(&page, &site, "", None);
///
/// assert_eq!(drop.title(), Some("post | blog"));
/// assert_eq!(drop.canonical_url(), Some("https://example.com/post/"));
/// ```
pub struct SeoDrop<'a> {
    page: &'a Page,
    site: &'a Site,
    /// Inline options of the tag (`title=false`).
    text: &'a str,
    paginator: Option<&'a Paginator>,
    cache: Cache,
}

impl<'a> SeoDrop<'a> {
    pub fn new(
        page: &'a Page,
        site: &'a Site,
        text: &'a str,
        paginator: Option<&'a Paginator>,
    ) -> Self {
        Self {
            page,
            site,
            text,
            paginator,
            cache: Cache::default(),
        }
    }

    pub fn page(&self) -> &'a Page {
        self.page
    }

    pub fn site(&self) -> &'a Site {
        self.site
    }

    pub fn paginator(&self) -> Option<&'a Paginator> {
        self.paginator
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// Whether `<title>` should be emitted.
    pub fn title_enabled(&self) -> bool {
        !self.text.to_ascii_lowercase().contains(TITLE_DISABLED) && self.title().is_some()
    }

    // ========================================================================
    // Titles
    // ========================================================================

    pub fn site_title(&self) -> Option<&str> {
        self.cache
            .site_title
            .get_or_init(|| {
                self.site
                    .str("title")
                    .or_else(|| self.site.str("name"))
                    .and_then(format_text)
            })
            .as_deref()
    }

    pub fn site_description(&self) -> Option<&str> {
        self.cache
            .site_description
            .get_or_init(|| self.site.str("description").and_then(format_text))
            .as_deref()
    }

    pub fn site_tagline(&self) -> Option<&str> {
        self.cache
            .site_tagline
            .get_or_init(|| self.site.str("tagline").and_then(format_text))
            .as_deref()
    }

    /// Page title without the site title appended.
    pub fn page_title(&self) -> Option<&str> {
        self.cache
            .page_title
            .get_or_init(|| {
                self.page
                    .str("title")
                    .and_then(format_text)
                    .or_else(|| self.site_title().map(str::to_string))
            })
            .as_deref()
    }

    /// Full title: page and site title joined, prefixed by the page number
    /// on paginated listings.
    pub fn title(&self) -> Option<&str> {
        self.cache
            .title
            .get_or_init(|| {
                let title = self.compose_title()?;
                Some(match self.page_number() {
                    Some(label) => format!("{label}{title}"),
                    None => title,
                })
            })
            .as_deref()
    }

    fn compose_title(&self) -> Option<String> {
        let site_title = self.site_title();
        let page_title = self.page_title();

        if let Some(site_title) = site_title {
            if let Some(page_title) = page_title.filter(|page| *page != site_title) {
                return Some(format!("{page_title}{TITLE_SEPARATOR}{site_title}"));
            }
            if let Some(tagline) = self.site_tagline().or_else(|| self.site_description()) {
                return Some(format!("{site_title}{TITLE_SEPARATOR}{tagline}"));
            }
        }

        page_title.or(site_title).map(str::to_string)
    }

    /// "Page N of M for " label, only past the first page of a listing.
    pub fn page_number(&self) -> Option<&str> {
        self.cache
            .page_number
            .get_or_init(|| {
                let paginator = self.paginator.filter(|p| p.page > 1)?;
                let message = self
                    .site
                    .str("seo_paginator_message")
                    .unwrap_or(DEFAULT_PAGINATOR_MESSAGE);
                let label = message
                    .replace("%<current>s", &paginator.page.to_string())
                    .replace("%<total>s", &paginator.total_pages.to_string());
                Some(escape_once(&label).into_owned())
            })
            .as_deref()
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Entity name: `seo.name`, or the social/site name on home and about.
    pub fn name(&self) -> Option<&str> {
        self.cache
            .name
            .get_or_init(|| {
                if let Some(name) = self.page.seo_str("name") {
                    return format_text(name);
                }
                if !self.is_homepage_or_about() {
                    return None;
                }
                self.site
                    .nested_str(&["social", "name"])
                    .and_then(format_text)
                    .or_else(|| self.site_title().map(str::to_string))
            })
            .as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.cache
            .description
            .get_or_init(|| {
                ["description", "excerpt"]
                    .iter()
                    .find_map(|key| self.page.str(key).and_then(format_text))
                    .or_else(|| self.site_description().map(str::to_string))
            })
            .as_deref()
    }

    pub fn author(&self) -> Option<&AuthorRecord> {
        self.cache
            .author
            .get_or_init(|| resolve_author(self.page, self.site))
            .as_ref()
    }

    /// Schema.org type: `seo.type`, `WebSite`, `BlogPosting` or `WebPage`.
    pub fn seo_type(&self) -> &str {
        self.cache.seo_type.get_or_init(|| {
            if let Some(kind) = self.page.seo_str("type") {
                kind.to_string()
            } else if self.is_homepage_or_about() {
                "WebSite".into()
            } else if self.has_date() {
                "BlogPosting".into()
            } else {
                "WebPage".into()
            }
        })
    }

    /// `sameAs` links.
    pub fn links(&self) -> Option<&[String]> {
        self.cache
            .links
            .get_or_init(|| {
                if let Some(links) = self.page.seo().and_then(|seo| string_list(seo.get("links"))) {
                    return Some(links);
                }
                if self.is_homepage_or_about() {
                    return string_list(self.site.nested(&["social", "links"]));
                }
                None
            })
            .as_deref()
    }

    // ========================================================================
    // Dates
    // ========================================================================

    pub fn date_published(&self) -> Option<&str> {
        self.cache
            .date_published
            .get_or_init(|| self.format_date(self.date_value("date")?))
            .as_deref()
    }

    pub fn date_modified(&self) -> Option<&str> {
        self.cache
            .date_modified
            .get_or_init(|| {
                let raw = self
                    .page
                    .seo()
                    .and_then(|seo| seo.get("date_modified"))
                    .and_then(scalar_to_string)
                    .or_else(|| self.date_value("last_modified_at"))
                    .or_else(|| self.date_value("date"))?;
                self.format_date(raw)
            })
            .as_deref()
    }

    /// Whether the page carries a non-empty `date`.
    pub fn has_date(&self) -> bool {
        self.date_value("date").is_some()
    }

    fn date_value(&self, key: &str) -> Option<String> {
        self.page.get(key).and_then(scalar_to_string)
    }

    fn format_date(&self, raw: String) -> Option<String> {
        let formatted = to_xmlschema(&raw, self.site.timezone());
        if formatted.is_none() {
            debug!("date"; "ignoring unparseable date: {raw}");
        }
        formatted
    }

    // ========================================================================
    // URLs and media
    // ========================================================================

    pub fn logo(&self) -> Option<&str> {
        self.cache
            .logo
            .get_or_init(|| {
                let logo = self.site.str("logo")?;
                Some(escape(&absolute_url(logo, self.site)))
            })
            .as_deref()
    }

    pub fn image(&self) -> Option<&ImageRecord> {
        self.cache
            .image
            .get_or_init(|| resolve_image(self.page, self.site))
            .as_ref()
    }

    /// Language tag with underscores (`en_US`).
    pub fn page_lang(&self) -> &str {
        self.cache.page_lang.get_or_init(|| {
            self.page
                .str("lang")
                .or_else(|| self.site.str("lang"))
                .unwrap_or(DEFAULT_LANG)
                .replace('-', "_")
        })
    }

    /// Explicit `canonical_url`, else the absolutized page URL.
    pub fn canonical_url(&self) -> Option<&str> {
        self.cache
            .canonical_url
            .get_or_init(|| {
                if let Some(explicit) = self.page.str("canonical_url") {
                    return Some(explicit.to_string());
                }
                let url = self.page.url()?;
                Some(canonical_path(&absolute_url(url, self.site)))
            })
            .as_deref()
    }

    /// User JSON-LD from `page.structured_data`.
    pub fn custom_structured_data(&self) -> Option<&'a JsonMap> {
        self.page.get("structured_data")?.as_object()
    }

    pub fn is_homepage_or_about(&self) -> bool {
        self.page
            .url()
            .is_some_and(|url| HOMEPAGE_OR_ABOUT.contains(&url))
    }

    // ========================================================================
    // Projections
    // ========================================================================

    pub fn json_ld(&self) -> JsonLd {
        JsonLd::from_drop(self)
    }

    /// Every resolved field, for serialization.
    pub fn view(&self) -> DropView<'_> {
        DropView {
            version: self.version(),
            title_enabled: self.title_enabled(),
            site_title: self.site_title(),
            site_description: self.site_description(),
            site_tagline: self.site_tagline(),
            page_title: self.page_title(),
            title: self.title(),
            page_number: self.page_number(),
            name: self.name(),
            description: self.description(),
            author: self.author(),
            date_published: self.date_published(),
            date_modified: self.date_modified(),
            seo_type: self.seo_type(),
            links: self.links(),
            logo: self.logo(),
            image: self.image(),
            page_lang: self.page_lang(),
            canonical_url: self.canonical_url(),
        }
    }
}

/// Serializable snapshot of a [`SeoDrop`].
#[derive(Debug, Serialize)]
pub struct DropView<'d> {
    pub version: &'static str,
    pub title_enabled: bool,
    pub site_title: Option<&'d str>,
    pub site_description: Option<&'d str>,
    pub site_tagline: Option<&'d str>,
    pub page_title: Option<&'d str>,
    pub title: Option<&'d str>,
    pub page_number: Option<&'d str>,
    pub name: Option<&'d str>,
    pub description: Option<&'d str>,
    pub author: Option<&'d AuthorRecord>,
    pub date_published: Option<&'d str>,
    pub date_modified: Option<&'d str>,
    #[serde(rename = "type")]
    pub seo_type: &'d str,
    pub links: Option<&'d [String]>,
    pub logo: Option<&'d str>,
    pub image: Option<&'d ImageRecord>,
    pub page_lang: &'d str,
    pub canonical_url: Option<&'d str>,
}
