//! Block emission.
//!
//! Renders each [`Span`] into one comment-delimited Gutenberg block.
//! Attribute maps appear only on heading (`level`) and list (`ordered`)
//! blocks, matching the editor's block grammar.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::segment::{Span, SpanKind};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("hard-coded regex"));
static LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="[^"]*language-(\w+)"#).expect("hard-coded regex"));

/// Render one span as a delimited block.
pub fn render_block(span: &Span<'_>) -> String {
    match span.kind {
        SpanKind::Code => render_code(&span.lines),
        SpanKind::Heading { level, text } => format!(
            "<!-- wp:heading {{\"level\":{level}}} -->\n<h{level} class=\"wp-block-heading\">{text}</h{level}>\n<!-- /wp:heading -->"
        ),
        SpanKind::List { ordered } => format!(
            "<!-- wp:list {{\"ordered\":{ordered}}} -->\n{}\n<!-- /wp:list -->",
            span.lines.join("\n")
        ),
        SpanKind::Quote => format!(
            "<!-- wp:quote -->\n{}\n<!-- /wp:quote -->",
            span.lines.join("\n")
        ),
        SpanKind::Paragraph => format!(
            "<!-- wp:paragraph -->\n{}\n<!-- /wp:paragraph -->",
            span.lines.join("\n")
        ),
        SpanKind::Other => format!(
            "<!-- wp:paragraph -->\n<p>{}</p>\n<!-- /wp:paragraph -->",
            span.lines.join("\n")
        ),
    }
}

/// Render a code span: strip all interior tags and wrap the plain text in
/// the editor's preformatted element pair. The fence language is extracted
/// from any `language-<word>` class but is not part of the emitted block.
fn render_code(lines: &[&str]) -> String {
    let html = lines.join("\n");

    if let Some(caps) = LANGUAGE.captures(&html) {
        debug!(language = &caps[1], "code block language");
    }

    let text = TAG.replace_all(&html, "");
    format!("<!-- wp:code -->\n<pre class=\"wp-block-code\"><code>{text}</code></pre>\n<!-- /wp:code -->")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_block() {
        let span = Span {
            kind: SpanKind::Paragraph,
            lines: vec!["<p>hi</p>"],
        };
        assert_eq!(
            render_block(&span),
            "<!-- wp:paragraph -->\n<p>hi</p>\n<!-- /wp:paragraph -->"
        );
    }

    #[test]
    fn test_other_wrapped_as_paragraph() {
        let span = Span {
            kind: SpanKind::Other,
            lines: vec!["bare text"],
        };
        assert_eq!(
            render_block(&span),
            "<!-- wp:paragraph -->\n<p>bare text</p>\n<!-- /wp:paragraph -->"
        );
    }

    #[test]
    fn test_heading_block_carries_level() {
        let span = Span {
            kind: SpanKind::Heading {
                level: 3,
                text: "Title",
            },
            lines: vec!["<h3>Title</h3>"],
        };
        assert_eq!(
            render_block(&span),
            "<!-- wp:heading {\"level\":3} -->\n<h3 class=\"wp-block-heading\">Title</h3>\n<!-- /wp:heading -->"
        );
    }

    #[test]
    fn test_list_block_carries_ordered_flag() {
        let span = Span {
            kind: SpanKind::List { ordered: true },
            lines: vec!["<ol>", "<li>a</li>", "</ol>"],
        };
        let block = render_block(&span);
        assert!(block.starts_with("<!-- wp:list {\"ordered\":true} -->\n<ol>"));
        assert!(block.ends_with("</ol>\n<!-- /wp:list -->"));
    }

    #[test]
    fn test_quote_block_content_unmodified() {
        let span = Span {
            kind: SpanKind::Quote,
            lines: vec!["<blockquote>", "<p>q</p>", "</blockquote>"],
        };
        assert_eq!(
            render_block(&span),
            "<!-- wp:quote -->\n<blockquote>\n<p>q</p>\n</blockquote>\n<!-- /wp:quote -->"
        );
    }

    #[test]
    fn test_code_block_strips_tags() {
        let span = Span {
            kind: SpanKind::Code,
            lines: vec![
                "<pre><code class=\"language-rust\">let x = 1;",
                "let y = 2;",
                "</code></pre>",
            ],
        };
        assert_eq!(
            render_block(&span),
            "<!-- wp:code -->\n<pre class=\"wp-block-code\"><code>let x = 1;\nlet y = 2;\n</code></pre>\n<!-- /wp:code -->"
        );
    }

    #[test]
    fn test_code_language_never_in_attributes() {
        let span = Span {
            kind: SpanKind::Code,
            lines: vec!["<pre><code class=\"language-python\">x</code></pre>"],
        };
        let block = render_block(&span);
        assert!(block.starts_with("<!-- wp:code -->\n"));
        assert!(!block.contains("language"));
    }

    #[test]
    fn test_each_block_delimited_exactly_once() {
        let span = Span {
            kind: SpanKind::Quote,
            lines: vec!["<blockquote><p>q</p></blockquote>"],
        };
        let block = render_block(&span);
        assert_eq!(block.matches("<!-- wp:quote -->").count(), 1);
        assert_eq!(block.matches("<!-- /wp:quote -->").count(), 1);
    }
}
