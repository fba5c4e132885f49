//! Shared types for wikimark
//!
//! This crate provides the records exchanged between the extraction pipeline
//! and the rendering layer: table-of-contents headings and wiki links.

use serde::{Deserialize, Serialize};

/// A single entry in a document's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Heading level (1-6)
    pub level: u8,
    /// Trimmed heading content
    pub text: String,
    /// Anchor id derived from `text`
    pub id: String,
}

impl HeadingRecord {
    pub fn new(level: u8, text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            id: id.into(),
        }
    }
}

/// A wiki link token as it appeared in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiLinkMatch {
    /// The full bracketed substring, including any display suffix
    pub raw: String,
    /// Trimmed link target
    pub target: String,
    /// Trimmed display text, `target` when none was given
    pub display: String,
}

impl WikiLinkMatch {
    /// Build a match, falling back to the target when display is absent or blank
    pub fn new(raw: impl Into<String>, target: &str, display: Option<&str>) -> Self {
        let target = target.trim();
        let display = display
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(target);

        Self {
            raw: raw.into(),
            target: target.to_string(),
            display: display.to_string(),
        }
    }
}

/// A wiki link after lookup against the document index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub raw: String,
    pub target: String,
    pub display: String,
    /// Link destination, including the configured prefix and any fragment
    pub href: String,
    /// Whether the target matched a known document
    pub exists: bool,
    /// Slugified `#fragment`, if the target carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}
