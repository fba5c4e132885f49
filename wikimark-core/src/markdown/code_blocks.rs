//! Code block detection: fenced blocks plus inline code spans.

use crate::languages::LanguageRegistry;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::OnceLock;

static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
static INLINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    FENCE_REGEX.get_or_init(|| Regex::new(r"```(\w*)\n((?s:.*?))```").unwrap())
}

fn inline_regex() -> &'static Regex {
    INLINE_REGEX.get_or_init(|| Regex::new(r"`([^`\n]+)`").unwrap())
}

/// A fenced block or inline code span found in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Normalized fence language, or the guessed language of an inline span.
    /// Empty when a fence had no info string.
    pub language: String,
    /// Block contents, trimmed
    pub code: String,
    /// Byte range from the opening fence (or backtick) to the end of the closing one
    pub span: Range<usize>,
    /// `true` for a single-backtick span
    #[serde(default)]
    pub inline: bool,
}

/// Find every fenced block and inline code span, in document order.
///
/// Fence languages are normalized through `registry`. Inline spans carry no
/// language of their own, so theirs comes from [`detect_language`]. Spans
/// inside a fenced block are not reported separately.
pub fn detect_code_blocks(text: &str, registry: &LanguageRegistry) -> Vec<CodeBlock> {
    let mut blocks: Vec<CodeBlock> = fence_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let language = caps.get(1).map_or("", |m| m.as_str());
            let code = caps.get(2).map_or("", |m| m.as_str());
            Some(CodeBlock {
                language: registry.normalize(language),
                code: code.trim().to_string(),
                span: whole.range(),
                inline: false,
            })
        })
        .collect();

    let fenced: Vec<_> = blocks.iter().map(|b| b.span.clone()).collect();
    let inline = inline_regex().captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        if fenced.iter().any(|r| r.start < whole.end() && whole.start() < r.end) {
            return None;
        }
        let code = caps.get(1).map_or("", |m| m.as_str());
        Some(CodeBlock {
            language: detect_language(code).to_string(),
            code: code.trim().to_string(),
            span: whole.range(),
            inline: true,
        })
    });
    blocks.extend(inline);

    blocks.sort_by_key(|b| b.span.start);
    blocks
}

/// Guess the language of an unlabelled code snippet.
///
/// Checks run in a fixed order and the first hit wins: TypeScript/JavaScript,
/// Python, HTML, CSS, JSON, Markdown. Anything else is `"text"`.
pub fn detect_language(code: &str) -> &'static str {
    let code = code.trim();
    let has = |needle: &str| code.contains(needle);

    let script_markers = [
        "import ", "export ", "function", "=>", "const ", "let ", "class ", "interface ",
    ];
    if script_markers.iter().any(|m| has(m)) {
        if has(": ") || has("<T>") || has("interface ") || has("type ") {
            return "typescript";
        }
        return "javascript";
    }

    let python_markers = ["def ", "import ", "class ", "print(", "if __name__ == "];
    if python_markers.iter().any(|m| has(m)) {
        return "python";
    }

    if has("<!DOCTYPE") || has("<html") || (has("<") && has("</") && has(">")) {
        return "html";
    }

    if has("{") && has("}") && has(":") && has(";") {
        return "css";
    }

    let bracketed = (code.starts_with('{') && code.ends_with('}'))
        || (code.starts_with('[') && code.ends_with(']'));
    if bracketed && serde_json::from_str::<serde_json::Value>(code).is_ok() {
        return "json";
    }

    let markdown_markers = ["#", "- ", "* ", "[", "]("];
    if markdown_markers.iter().any(|m| has(m)) {
        return "markdown";
    }

    "text"
}

/// Byte ranges covered by fenced code blocks
pub fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    fence_regex().find_iter(text).map(|m| m.range()).collect()
}
