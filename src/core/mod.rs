//! Core helpers shared by the SEO engine.

pub mod url;
