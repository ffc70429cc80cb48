//! Post title extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when the document has no top-level heading.
pub const UNTITLED: &str = "Untitled Post";

static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("hard-coded regex"));

/// Split a markdown document into a title and the remaining body.
///
/// The first line matching `# <text>` anywhere in the document becomes the
/// title (trimmed); that one line is removed and the rest of the document,
/// trimmed, becomes the body. Later top-level headings are left in place.
/// A document with no such heading keeps its full text and gets the
/// [`UNTITLED`] placeholder. Absence of a title is not an error.
pub fn extract_title(content: &str) -> (String, String) {
    let Some(caps) = H1.captures(content) else {
        return (UNTITLED.to_string(), content.to_string());
    };

    let title = caps[1].trim().to_string();

    // Remove the matched heading line along with its trailing newline.
    let full = caps.get(0).expect("capture 0 always present");
    let mut end = full.end();
    if content[end..].starts_with('\n') {
        end += 1;
    }
    let mut body = String::with_capacity(content.len());
    body.push_str(&content[..full.start()]);
    body.push_str(&content[end..]);

    (title, body.trim().to_string())
}
