//! Table-of-contents extraction from ATX headings.

use super::{code_blocks::fenced_ranges, in_ranges, lines_with_offsets};
use crate::slug::{slugify_with, SlugPolicy, UniqueSlugs};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use wikimark_types::HeadingRecord;

static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();

fn heading_regex() -> &'static Regex {
    HEADING_REGEX.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap())
}

/// What to do when two headings produce the same id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingIdPolicy {
    /// Keep the colliding ids as they are
    #[default]
    Preserve,
    /// Append `-1`, `-2`, ... to later duplicates
    Suffix,
}

/// Scans a document body for `#`-style headings
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingExtractor {
    slug_policy: SlugPolicy,
    id_policy: HeadingIdPolicy,
    skip_code_blocks: bool,
}

impl HeadingExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slug_policy(mut self, policy: SlugPolicy) -> Self {
        self.slug_policy = policy;
        self
    }

    pub fn with_id_policy(mut self, policy: HeadingIdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Ignore `#` lines that sit inside fenced code blocks
    pub fn skip_code_blocks(mut self, skip: bool) -> Self {
        self.skip_code_blocks = skip;
        self
    }

    /// Extract headings in document order
    ///
    /// A document without headings yields an empty vec.
    pub fn extract(&self, text: &str) -> Vec<HeadingRecord> {
        let code_ranges = if self.skip_code_blocks {
            fenced_ranges(text)
        } else {
            Vec::new()
        };
        let mut unique = UniqueSlugs::new();
        let mut headings = Vec::new();

        for (offset, line) in lines_with_offsets(text) {
            if in_ranges(&code_ranges, offset) {
                continue;
            }
            let Some(caps) = heading_regex().captures(line) else {
                continue;
            };

            let level = caps[1].len() as u8;
            let heading_text = caps[2].trim();
            if heading_text.is_empty() {
                continue;
            }

            let slug = slugify_with(heading_text, self.slug_policy);
            let id = match self.id_policy {
                HeadingIdPolicy::Preserve => slug,
                HeadingIdPolicy::Suffix => unique.claim(slug),
            };

            headings.push(HeadingRecord::new(level, heading_text, id));
        }

        headings
    }
}

/// Extract headings with the default policies
///
/// # Example
///
/// ```
/// use wikimark_core::markdown::extract_headings;
///
/// let toc = extract_headings("# Title\n## Sub Heading\n");
/// assert_eq!(toc.len(), 2);
/// assert_eq!(toc[1].id, "sub-heading");
/// ```
pub fn extract_headings(text: &str) -> Vec<HeadingRecord> {
    HeadingExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_sub_heading() {
        let headings = extract_headings("# Title\n## Sub Heading\n");
        assert_eq!(
            headings,
            vec![
                HeadingRecord::new(1, "Title", "title"),
                HeadingRecord::new(2, "Sub Heading", "sub-heading"),
            ]
        );
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_headings("").is_empty());
        assert!(extract_headings("just text\n\n- a list\n> quote").is_empty());
    }

    #[test]
    fn test_marker_needs_whitespace_and_text() {
        assert!(extract_headings("#hashtag").is_empty());
        assert!(extract_headings("#").is_empty());
        assert!(extract_headings("##   ").is_empty());
        assert!(extract_headings("#\nText on the next line").is_empty());
    }

    #[test]
    fn test_levels() {
        let headings = extract_headings("###### Six\n####### Seven\n### Three");
        let levels: Vec<_> = headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![6, 3]);
    }

    #[test]
    fn test_indented_marker_is_not_a_heading() {
        assert!(extract_headings("  # Indented").is_empty());
    }

    #[test]
    fn test_text_is_trimmed() {
        let headings = extract_headings("##   Spaced Out   \r\n");
        assert_eq!(headings[0].text, "Spaced Out");
        assert_eq!(headings[0].id, "spaced-out");
    }

    #[test]
    fn test_trailing_punctuation_leaves_hyphen() {
        let headings = extract_headings("# Done ?\n## ? Intro\n");
        assert_eq!(headings[0].text, "Done ?");
        assert_eq!(headings[0].id, "done-");
        assert_eq!(headings[1].id, "-intro");
    }

    #[test]
    fn test_setext_is_ignored() {
        assert!(extract_headings("Title\n=====\nSub\n-----\n").is_empty());
    }

    #[test]
    fn test_duplicates_preserved_by_default() {
        let headings = extract_headings("## Notes\n## Notes\n");
        assert_eq!(headings[0].id, "notes");
        assert_eq!(headings[1].id, "notes");
    }

    #[test]
    fn test_duplicates_suffixed() {
        let extractor = HeadingExtractor::new().with_id_policy(HeadingIdPolicy::Suffix);
        let ids: Vec<_> = extractor
            .extract("## Notes\n## Notes-1\n## Notes\n")
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec!["notes", "notes-1", "notes-2"]);
    }

    #[test]
    fn test_unicode_heading() {
        let headings = extract_headings("# 한글 제목");
        assert_eq!(headings[0].id, "한글-제목");

        let ascii = HeadingExtractor::new().with_slug_policy(SlugPolicy::Ascii);
        assert_eq!(ascii.extract("# 한글 Title")[0].id, "-title");
    }

    #[test]
    fn test_code_blocks() {
        let text = "# Real\n```bash\n# comment\n```\n## Also Real\n";
        assert_eq!(extract_headings(text).len(), 3);

        let skipping = HeadingExtractor::new().skip_code_blocks(true);
        let texts: Vec<_> = skipping.extract(text).into_iter().map(|h| h.text).collect();
        assert_eq!(texts, vec!["Real", "Also Real"]);
    }
}
