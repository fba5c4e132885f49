//! Slug generation and normalization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Which letters survive slug normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugPolicy {
    /// Keep every Unicode letter and digit (`"한글 Title"` -> `"한글-title"`)
    #[default]
    Unicode,
    /// Keep only `[a-z0-9]` (`"한글 Title"` -> `"-title"`)
    Ascii,
}

/// Convert a string to a URL-safe slug using the default Unicode policy
///
/// Rules:
/// - Lowercase
/// - Drop anything that is not a letter, digit, whitespace or hyphen
/// - Replace each whitespace run with a single hyphen
///
/// Hyphens already in the text are kept as they are, so `"Done ?"` becomes
/// `"done-"` and `"a - b"` becomes `"a---b"`.
///
/// # Examples
///
/// ```
/// use wikimark_core::slugify;
///
/// assert_eq!(slugify("Sub Heading"), "sub-heading");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    slugify_with(input, SlugPolicy::Unicode)
}

/// Convert a string to a slug under an explicit letter policy
pub fn slugify_with(input: &str, policy: SlugPolicy) -> String {
    let lowercased = input.to_lowercase();
    let mut slug = String::with_capacity(lowercased.len());
    let mut in_whitespace = false;

    // Work on graphemes so combining marks stay attached to their base letter
    for grapheme in lowercased.graphemes(true) {
        let Some(c) = grapheme.chars().next() else {
            continue;
        };

        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }

        let kept = match policy {
            _ if c == '-' => grapheme,
            SlugPolicy::Unicode if c.is_alphanumeric() => grapheme,
            SlugPolicy::Ascii if c.is_ascii_alphanumeric() => &grapheme[..c.len_utf8()],
            // dropped characters do not end a whitespace run
            _ => continue,
        };

        if in_whitespace {
            slug.push('-');
            in_whitespace = false;
        }
        slug.push_str(kept);
    }

    if in_whitespace {
        slug.push('-');
    }

    slug
}

/// Hands out unique slugs within one document
///
/// The first claim of a slug returns it unchanged; later claims get `-1`,
/// `-2`, ... appended, skipping any suffix that was itself claimed already.
#[derive(Debug, Default)]
pub struct UniqueSlugs {
    seen: HashMap<String, usize>,
}

impl UniqueSlugs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: String) -> String {
        let mut slug = base.clone();

        if self.seen.contains_key(&slug) {
            loop {
                let counter = self.seen.entry(base.clone()).or_insert(0);
                *counter += 1;
                slug = format!("{base}-{counter}");
                if !self.seen.contains_key(&slug) {
                    break;
                }
            }
        }

        self.seen.insert(slug.clone(), 0);
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Title"), "title");
        assert_eq!(slugify("Sub Heading"), "sub-heading");
        assert_eq!(slugify("Rust Programming"), "rust-programming");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("snake_case_name"), "snakecasename");
    }

    #[test]
    fn test_unicode_policy_keeps_letters() {
        assert_eq!(slugify("Café"), "café");
        assert_eq!(slugify("한글 Title"), "한글-title");
        // decomposed e + combining acute stays one unit
        assert_eq!(slugify("Cafe\u{301} Noir"), "cafe\u{301}-noir");
    }

    #[test]
    fn test_ascii_policy_drops_non_ascii() {
        assert_eq!(slugify_with("한글 Title", SlugPolicy::Ascii), "-title");
        assert_eq!(slugify_with("Café", SlugPolicy::Ascii), "caf");
        assert_eq!(slugify_with("Cafe\u{301}", SlugPolicy::Ascii), "cafe");
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(slugify("Hello    World"), "hello-world");
        assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
        assert_eq!(slugify("a ? b"), "a-b");
    }

    #[test]
    fn test_hyphens_kept_and_ends_not_trimmed() {
        assert_eq!(slugify("a - b"), "a---b");
        assert_eq!(slugify("Done ?"), "done-");
        assert_eq!(slugify("? Intro"), "-intro");
        assert_eq!(slugify("  -Leading-  "), "--leading--");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in [
            "Sub Heading",
            "Rust & Safety",
            "  -x--y-  ",
            "한글 Title",
            "already-a-slug",
            "Cafe\u{301} Noir",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input:?}");

            let once = slugify_with(input, SlugPolicy::Ascii);
            assert_eq!(slugify_with(&once, SlugPolicy::Ascii), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_empty_and_special_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "-");
    }

    #[test]
    fn test_unique_slugs() {
        let mut slugs = UniqueSlugs::new();
        assert_eq!(slugs.claim("intro".into()), "intro");
        assert_eq!(slugs.claim("intro".into()), "intro-1");
        assert_eq!(slugs.claim("intro-1".into()), "intro-1-1");
        assert_eq!(slugs.claim("intro".into()), "intro-2");
        assert_eq!(slugs.claim("other".into()), "other");
    }
}
