//! Text, markup and date helpers used by the SEO engine.

pub mod date;
pub mod html;
pub mod markdown;
