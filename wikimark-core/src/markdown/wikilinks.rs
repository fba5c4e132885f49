//! Wikilink parsing and rewriting for `[[target]]{display}` syntax.

use super::{code_blocks::fenced_ranges, escape_markup, in_ranges};
use crate::config::normalize_link_prefix;
use crate::index::DocumentIndex;
use crate::slug::{slugify_with, SlugPolicy};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::OnceLock;
use wikimark_types::{ResolvedLink, WikiLinkMatch};

static BRACE_REGEX: OnceLock<Regex> = OnceLock::new();
static PIPE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Where a link's display text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSyntax {
    /// `[[target]]` with an optional `{display}` suffix
    #[default]
    Brace,
    /// `[[target]]` or `[[target|display]]`
    Pipe,
}

impl LinkSyntax {
    fn regex(self) -> &'static Regex {
        match self {
            LinkSyntax::Brace => BRACE_REGEX
                .get_or_init(|| Regex::new(r"\[\[(.*?)\]\](?:\{(.*?)\})?").unwrap()),
            LinkSyntax::Pipe => PIPE_REGEX
                .get_or_init(|| Regex::new(r"\[\[([^\]|]*?)(?:\|(.*?))?\]\]").unwrap()),
        }
    }
}

/// Finds wikilinks and rewrites them into `<Link>` elements
#[derive(Debug, Clone)]
pub struct WikiLinkResolver {
    syntax: LinkSyntax,
    slug_policy: SlugPolicy,
    link_prefix: String,
    skip_code_blocks: bool,
    fragments: bool,
    extended_lookup: bool,
}

impl WikiLinkResolver {
    pub fn new(link_prefix: &str) -> Self {
        Self {
            syntax: LinkSyntax::default(),
            slug_policy: SlugPolicy::default(),
            link_prefix: normalize_link_prefix(link_prefix),
            skip_code_blocks: false,
            fragments: false,
            extended_lookup: false,
        }
    }

    pub fn with_syntax(mut self, syntax: LinkSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_slug_policy(mut self, policy: SlugPolicy) -> Self {
        self.slug_policy = policy;
        self
    }

    /// Leave links inside fenced code blocks untouched
    pub fn skip_code_blocks(mut self, skip: bool) -> Self {
        self.skip_code_blocks = skip;
        self
    }

    /// Treat `[[Page#Section]]` as a link to `Section` inside `Page`
    pub fn with_fragments(mut self, enabled: bool) -> Self {
        self.fragments = enabled;
        self
    }

    /// Also match full paths and slugs when looking targets up
    pub fn with_extended_lookup(mut self, enabled: bool) -> Self {
        self.extended_lookup = enabled;
        self
    }

    pub fn syntax(&self) -> LinkSyntax {
        self.syntax
    }

    /// List the wikilinks in `text` without rewriting anything
    pub fn parse(&self, text: &str) -> Vec<WikiLinkMatch> {
        self.scan(text).into_iter().map(|(_, m)| m).collect()
    }

    /// The indexed document a link points at, if any
    pub fn find_document<'i>(
        &self,
        link: &WikiLinkMatch,
        index: &'i DocumentIndex,
    ) -> Option<&'i str> {
        let (base, _) = self.split_fragment(&link.target);
        self.lookup(base, index)
    }

    fn lookup<'i>(&self, target: &str, index: &'i DocumentIndex) -> Option<&'i str> {
        if self.extended_lookup {
            index.lookup_extended(target)
        } else {
            index.lookup(target)
        }
    }

    fn split_fragment<'t>(&self, target: &'t str) -> (&'t str, Option<&'t str>) {
        if !self.fragments {
            return (target, None);
        }
        match target.split_once('#') {
            Some((base, fragment)) => (base.trim(), Some(fragment.trim())),
            None => (target, None),
        }
    }

    /// Resolve one link against the index
    pub fn resolve(&self, link: &WikiLinkMatch, index: &DocumentIndex) -> ResolvedLink {
        let (base, fragment) = self.split_fragment(&link.target);
        let fragment = fragment
            .map(|f| slugify_with(f, self.slug_policy))
            .filter(|f| !f.is_empty());

        let (mut href, exists) = if base.is_empty() && fragment.is_some() {
            // [[#Section]] points into the current document
            (String::new(), true)
        } else {
            match self.lookup(base, index) {
                Some(path) => (format!("{}{}", self.link_prefix, path), true),
                None => (
                    format!("{}{}", self.link_prefix, slugify_with(base, self.slug_policy)),
                    false,
                ),
            }
        };

        if let Some(frag) = &fragment {
            href.push('#');
            href.push_str(frag);
        }

        tracing::trace!("Resolved [[{}]] -> {} (exists: {})", link.target, href, exists);

        ResolvedLink {
            raw: link.raw.clone(),
            target: link.target.clone(),
            display: link.display.clone(),
            href,
            exists,
            fragment,
        }
    }

    /// Rewrite every wikilink in `text` into a `<Link>` element
    ///
    /// Returns (rewritten_text, resolved_links). Text that is not a complete
    /// wikilink, such as an unterminated `[[`, is copied through unchanged.
    pub fn transform(&self, text: &str, index: &DocumentIndex) -> (String, Vec<ResolvedLink>) {
        let matches = self.scan(text);
        if matches.is_empty() {
            return (text.to_string(), Vec::new());
        }

        let mut output = String::with_capacity(text.len());
        let mut links = Vec::with_capacity(matches.len());
        let mut last = 0;

        for (span, link) in matches {
            output.push_str(&text[last..span.start]);
            let resolved = self.resolve(&link, index);
            output.push_str(&render_link(&resolved));
            links.push(resolved);
            last = span.end;
        }
        output.push_str(&text[last..]);

        (output, links)
    }

    fn scan(&self, text: &str) -> Vec<(Range<usize>, WikiLinkMatch)> {
        if !text.contains("[[") {
            return Vec::new();
        }

        let code_ranges = if self.skip_code_blocks {
            fenced_ranges(text)
        } else {
            Vec::new()
        };

        self.syntax
            .regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if in_ranges(&code_ranges, whole.start()) {
                    return None;
                }

                let target = caps.get(1).map_or("", |m| m.as_str());
                let display = caps.get(2).map(|m| m.as_str());
                Some((whole.range(), WikiLinkMatch::new(whole.as_str(), target, display)))
            })
            .collect()
    }
}

impl Default for WikiLinkResolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LINK_PREFIX)
    }
}

/// Parse `[[target]]{display}` links with the default resolver
///
/// # Example
///
/// ```
/// use wikimark_core::markdown::parse_wiki_links;
///
/// let links = parse_wiki_links("See [[Backend]]{the backend doc}");
/// assert_eq!(links[0].target, "Backend");
/// assert_eq!(links[0].display, "the backend doc");
/// ```
pub fn parse_wiki_links(text: &str) -> Vec<WikiLinkMatch> {
    WikiLinkResolver::default().parse(text)
}

fn render_link(link: &ResolvedLink) -> String {
    format!(
        r#"<Link href="{}" data-wiki-link="true" data-exists="{}">{}</Link>"#,
        escape_markup(&link.href),
        link.exists,
        escape_markup(&link.display)
    )
}
