//! Markdown to HTML rendering for short metadata strings.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render `input` as Markdown and return the HTML.
///
/// Smart punctuation is enabled so straight quotes and dashes render the way
/// they would in page content.
pub fn markdownify(input: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_SMART_PUNCTUATION);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, opts);
    let mut html = String::with_capacity(input.len() + input.len() / 2);
    push_html(&mut html, parser);
    html
}
