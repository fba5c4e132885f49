//! Text-level scanners over raw Markdown/MDX source.
//!
//! Everything here works on the source string directly rather than on a
//! parsed event stream: callers hand over the body of a note (front matter
//! already removed) and get structured records back.

pub mod code_blocks;
pub mod headings;
pub mod wikilinks;

pub use code_blocks::{detect_code_blocks, detect_language, fenced_ranges, CodeBlock};
pub use headings::{extract_headings, HeadingExtractor, HeadingIdPolicy};
pub use wikilinks::{parse_wiki_links, LinkSyntax, WikiLinkResolver};

use std::ops::Range;

/// Iterate lines together with the byte offset where each one starts.
///
/// Line terminators (`\n` or `\r\n`) are not part of the yielded line.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (start, line)
    })
}

pub(crate) fn in_ranges(ranges: &[Range<usize>], offset: usize) -> bool {
    ranges.iter().any(|r| r.contains(&offset))
}

/// Escape text for use inside an MDX element or attribute.
///
/// Brackets and braces are escaped as well: braces would open an MDX
/// expression, and escaped brackets keep rewritten output free of `[[`.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}
