//! seotag - SEO, Open Graph and JSON-LD metadata for static site pages.
//!
//! Resolves a page's front matter and the site configuration into one
//! metadata record ([`seo::SeoDrop`]) and renders it as an HTML head
//! fragment with embedded schema.org structured data.

pub mod cli;
pub mod config;
pub mod core;
pub mod logger;
pub mod page;
pub mod seo;
pub mod utils;

pub use page::{Page, Paginator, Site};
pub use seo::{RenderError, SeoDrop, render};
