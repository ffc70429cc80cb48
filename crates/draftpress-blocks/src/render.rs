//! Markdown rendering.
//!
//! Wraps `pulldown-cmark` behind the one contract the segmenter relies on:
//! each visual element (paragraph, heading, list, quote, fenced code, table)
//! renders as its own top-level tag on its own line group, and fenced code
//! carries a `language-<tag>` class when the fence names a language.

use pulldown_cmark::{Options, Parser, html};

/// Render a markdown body to HTML.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
