//! Text pipeline applied to every free-text metadata value.

use crate::utils::{
    html::{escape_once, normalize_whitespace, strip_html},
    markdown::markdownify,
};

/// Format a metadata string for use in tags and JSON-LD.
///
/// Steps, in order: Markdown rendering, tag stripping, whitespace
/// collapsing, escaping (existing entities are kept). An empty result means
/// the value is absent.
///
/// # Example
/// ```ignore
/// assert_eq!(format_text("*Hello*  world").as_deref(), Some("Hello world"));
/// assert_eq!(format_text("<br>"), None);
/// ```
pub fn format_text(input: &str) -> Option<String> {
    let html = markdownify(input);
    let text = strip_html(&html);
    let text = normalize_whitespace(&text);
    let text = escape_once(&text);

    if text.is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}
