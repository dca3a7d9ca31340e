//! HTML utility functions.
//!
//! Provides the text filters used on metadata values:
//! - `escape_once()` - HTML entity escaping that keeps existing entities
//! - `strip_html()` - Remove tags, comments, scripts and styles
//! - `normalize_whitespace()` - Collapse whitespace runs

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters, leaving existing entities intact.
///
/// `"a &amp; b & c"` -> `"a &amp; b &amp; c"`. Borrows when nothing
/// needs escaping.
pub fn escape_once(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '&' if is_entity_start(&s[i + 1..]) => result.push('&'),
            _ => match escape_char(c) {
                Some(entity) => result.push_str(entity),
                None => result.push(c),
            },
        }
    }
    Cow::Owned(result)
}

/// Check whether `rest` (the text after an `&`) begins an entity reference:
/// `name;`, `#123;` or `#x1F;`.
fn is_entity_start(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    if let Some(num) = body.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix(['x', 'X']) {
            return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        return !num.is_empty() && num.chars().all(|c| c.is_ascii_digit());
    }
    !body.is_empty() && body.chars().all(|c| c.is_ascii_alphabetic())
}

// =============================================================================
// Tag Stripping
// =============================================================================

/// Remove all markup from `s`.
///
/// Script and style elements are removed with their content; comments are
/// removed entirely; any other tag is dropped and its text kept.
pub fn strip_html(s: &str) -> Cow<'_, str> {
    static RE_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<script.*?</script>|<!--.*?-->|<style.*?</style>|<.*?>").unwrap()
    });

    if !s.contains('<') {
        return Cow::Borrowed(s);
    }
    RE_MARKUP.replace_all(s, "")
}

// =============================================================================
// Whitespace
// =============================================================================

/// Collapse every whitespace run into a single space and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Tests
// =============================================================================
