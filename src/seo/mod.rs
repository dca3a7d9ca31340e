//! SEO metadata resolution and rendering.
//!
//! ```text
//! Page + Site + Paginator ──► SeoDrop ──┬──► JsonLd (structured data)
//!                                      └──► render (HTML fragment)
//! ```
//!
//! - [`author`] / [`image`] - canonical author and sharing image records
//! - [`drop`] - per-render metadata record with memoized fields
//! - [`json_ld`] - schema.org projection, merged with custom data
//! - [`render`] - embedded template, minified and compiled once

pub mod author;
pub mod drop;
pub mod format;
pub mod image;
pub mod json_ld;
pub mod merge;
pub mod render;
pub mod webmaster;

pub use author::AuthorRecord;
pub use drop::SeoDrop;
pub use image::ImageRecord;
pub use json_ld::JsonLd;
pub use render::{RenderError, render, render_drop};
