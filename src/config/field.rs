//! Site configuration field paths.

use crate::logger::paint;
use owo_colors::Style;
use std::fmt;

/// Dotted path of a site configuration key, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    pub const URL: Self = Self("url");
    pub const TIMEZONE: Self = Self("timezone");
    pub const PAGINATOR_MESSAGE: Self = Self("seo_paginator_message");
    pub const PAGINATE_PATH: Self = Self("paginate_path");
    pub const WEBMASTER: Self = Self("webmaster_verifications");
    pub const PAGINATOR_PAGE: Self = Self("paginator.page");

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&paint(format_args!("`{}`", self.0), Style::new().bright_blue()))
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
