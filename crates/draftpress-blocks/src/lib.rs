//! Markdown to Gutenberg block conversion.
//!
//! This crate is the pure core of draftpress: it turns a markdown body into
//! the `<!-- wp:TYPE -->` block markup that the WordPress editor expects.
//! It performs no I/O and every function is a deterministic, total function
//! of its input.
//!
//! # Pipeline
//!
//! - [`title`]: pull a leading H1 out of the document as the post title
//! - [`render`]: render the body to HTML, one top-level tag per element
//! - [`segment`]: group rendered lines into typed spans
//! - [`emit`]: wrap each span in block-comment delimiters and join

pub mod emit;
pub mod render;
pub mod segment;
pub mod title;

pub use emit::render_block;
pub use segment::{Span, SpanKind, segment};
pub use title::extract_title;

/// Convert a markdown body into a Gutenberg block payload.
///
/// Renders the markdown to HTML, segments the rendered lines into spans,
/// emits one block per span, and joins the blocks with blank lines.
pub fn markdown_to_blocks(body: &str) -> String {
    let html = render::render_html(body);
    let blocks: Vec<String> = segment(&html).map(|span| render_block(&span)).collect();
    blocks.join("\n\n")
}
