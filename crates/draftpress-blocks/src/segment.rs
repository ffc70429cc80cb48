//! Block segmentation.
//!
//! A single forward pass over rendered HTML lines, grouping them into
//! [`Span`]s. Each non-blank line belongs to exactly one span, spans never
//! overlap, and spans come out in document order. Blank lines are
//! separators and never produce a span.
//!
//! Multi-line spans (code, lists, quotes) are closed by lookahead to a
//! closing tag. The closing tests are deliberately asymmetric: lists close
//! on a line *ending with* the closing tag while quotes close on a line
//! *containing* it. Both conventions are load-bearing for payload
//! compatibility and must not be unified.

use std::sync::LazyLock;

use regex::Regex;

// The regex crate has no backreferences, so the opening and closing levels
// are captured separately and compared by the caller.
static HEADING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<h[1-6]").expect("hard-coded regex"));
static HEADING_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<h([1-6])[^>]*>(.+?)</h([1-6])>").expect("hard-coded regex"));

/// Structural classification of a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind<'a> {
    /// Preformatted code, possibly spanning many lines.
    Code,
    /// A single-line heading with its level and inner text captured from
    /// the tag pair.
    Heading { level: u8, text: &'a str },
    /// A list; `ordered` is fixed by the opening tag.
    List { ordered: bool },
    /// A blockquote.
    Quote,
    /// A single paragraph line.
    Paragraph,
    /// Any other non-blank line, treated as an implicit paragraph.
    Other,
}

/// A contiguous run of rendered lines with one structural classification.
///
/// For single-line kinds the line is stored trimmed; multi-line kinds keep
/// lines after the first exactly as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind<'a>,
    pub lines: Vec<&'a str>,
}

/// Segment rendered HTML into spans.
///
/// Returns a lazy, finite iterator; the pass never backtracks and always
/// terminates. Malformed input never fails segmentation: an unterminated
/// code, list, or quote span closes at end of input with whatever was
/// accumulated, and a heading whose opening and closing levels disagree is
/// consumed without producing a span.
pub fn segment(html: &str) -> Segmenter<'_> {
    Segmenter {
        lines: html.lines().collect(),
        pos: 0,
    }
}

/// Iterator state for [`segment`]. Single-pass, non-restartable.
#[derive(Debug)]
pub struct Segmenter<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();

            if line.is_empty() {
                self.pos += 1;
                continue;
            }

            if line.starts_with("<pre>") || line.starts_with("<code") {
                return Some(self.take_code());
            }

            if HEADING_OPEN.is_match(line) {
                self.pos += 1;
                match heading_pair(line) {
                    Some((level, text)) => {
                        return Some(Span {
                            kind: SpanKind::Heading { level, text },
                            lines: vec![line],
                        });
                    }
                    // Mismatched tag pair: the line is consumed but
                    // contributes no span.
                    None => continue,
                }
            }

            if line.starts_with("<ul>") || line.starts_with("<ol>") {
                let ordered = line.starts_with("<ol>");
                return Some(self.take_list(line, ordered));
            }

            if line.starts_with("<blockquote>") {
                return Some(self.take_quote(line));
            }

            if line.starts_with("<p>") {
                self.pos += 1;
                return Some(Span {
                    kind: SpanKind::Paragraph,
                    lines: vec![line],
                });
            }

            self.pos += 1;
            if line.starts_with("<!--") {
                // Stray structural comments are dropped, never wrapped.
                continue;
            }
            return Some(Span {
                kind: SpanKind::Other,
                lines: vec![line],
            });
        }
        None
    }
}

impl<'a> Segmenter<'a> {
    /// Accumulate a code span: every line up to and including the first
    /// line containing a `</pre>` or `</code>` closer. End of input closes
    /// the span truncated.
    fn take_code(&mut self) -> Span<'a> {
        let mut lines = Vec::new();
        while self.pos < self.lines.len()
            && !self.lines[self.pos].contains("</pre>")
            && !self.lines[self.pos].contains("</code>")
        {
            lines.push(self.lines[self.pos]);
            self.pos += 1;
        }
        if self.pos < self.lines.len() {
            lines.push(self.lines[self.pos]);
        }
        self.pos += 1;
        Span {
            kind: SpanKind::Code,
            lines,
        }
    }

    /// Accumulate a list span until a line whose trimmed text ends with a
    /// list closing tag (either kind). Advances at least one line per step.
    fn take_list(&mut self, opener: &'a str, ordered: bool) -> Span<'a> {
        let mut lines = vec![opener];
        while self.pos < self.lines.len() && {
            let current = self.lines[self.pos].trim();
            !(current.ends_with("</ul>") || current.ends_with("</ol>"))
        } {
            self.pos += 1;
            if self.pos < self.lines.len() {
                lines.push(self.lines[self.pos]);
            }
        }
        self.pos += 1;
        Span {
            kind: SpanKind::List { ordered },
            lines,
        }
    }

    /// Accumulate a quote span until a line containing the closing tag,
    /// inclusive.
    fn take_quote(&mut self, opener: &'a str) -> Span<'a> {
        let mut lines = vec![opener];
        while self.pos < self.lines.len() && !self.lines[self.pos].contains("</blockquote>") {
            self.pos += 1;
            if self.pos < self.lines.len() {
                lines.push(self.lines[self.pos]);
            }
        }
        self.pos += 1;
        Span {
            kind: SpanKind::Quote,
            lines,
        }
    }
}

/// Match a single-line heading tag pair, returning level and inner text.
/// Returns `None` when the opening and closing levels disagree.
fn heading_pair(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_PAIR.captures(line)?;
    let open: u8 = caps[1].parse().ok()?;
    let close: u8 = caps[3].parse().ok()?;
    if open != close {
        return None;
    }
    let text = caps.get(2).map(|m| m.as_str())?;
    Some((open, text))
}
