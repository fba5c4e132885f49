//! Document processing pipeline connecting the extractors
//!
//! Flow: body text ──┬─→ HeadingExtractor ──→ table of contents
//!                   ├─→ WikiLinkResolver ──→ rewritten content + links
//!                   └─→ code block scan ───→ fenced blocks
//!
//! A [`DocumentPipeline`] is built once at startup from a [`Config`]; that is
//! the only initialization step. After that it is shared by reference and
//! every call is independent of the others.

use crate::config::{Config, ConfigError};
use crate::index::DocumentIndex;
use crate::languages::LanguageRegistry;
use crate::markdown::{detect_code_blocks, HeadingExtractor, WikiLinkResolver};
use crate::models::{LinkGraph, ProcessedDocument};
use std::path::Path;
use wikimark_types::{HeadingRecord, ResolvedLink, WikiLinkMatch};

/// The main document processing pipeline
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    config: Config,
    headings: HeadingExtractor,
    links: WikiLinkResolver,
    languages: LanguageRegistry,
}

impl DocumentPipeline {
    /// Create a pipeline, registering the configured languages
    pub fn new(config: Config) -> Self {
        let headings = HeadingExtractor::new()
            .with_slug_policy(config.slug_policy)
            .with_id_policy(config.heading_ids)
            .skip_code_blocks(config.skip_code_blocks);

        let links = WikiLinkResolver::new(&config.link_prefix)
            .with_syntax(config.link_syntax)
            .with_slug_policy(config.slug_policy)
            .with_fragments(config.fragment_links)
            .with_extended_lookup(config.extended_lookup)
            .skip_code_blocks(config.skip_code_blocks);

        let mut languages = LanguageRegistry::with_defaults();
        for language in &config.languages {
            languages.register(language);
        }
        for (alias, canonical) in &config.language_aliases {
            languages.alias(alias, canonical);
        }

        tracing::debug!(
            "Initialized pipeline: prefix={}, syntax={:?}, slugs={:?}, heading ids={:?}",
            config.normalized_link_prefix(),
            config.link_syntax,
            config.slug_policy,
            config.heading_ids
        );

        Self {
            config,
            headings,
            links,
            languages,
        }
    }

    /// Create a pipeline from a YAML config file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_file(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    pub fn resolver(&self) -> &WikiLinkResolver {
        &self.links
    }

    /// Run every extractor over one document body
    pub fn process(&self, body: &str, index: &DocumentIndex) -> ProcessedDocument {
        let headings = self.headings.extract(body);
        let (content, links) = self.links.transform(body, index);
        let code_blocks = detect_code_blocks(body, &self.languages);

        tracing::debug!(
            "Processed document: {} headings, {} links ({} broken), {} code blocks",
            headings.len(),
            links.len(),
            links.iter().filter(|l| !l.exists).count(),
            code_blocks.len()
        );

        ProcessedDocument {
            headings,
            content,
            links,
            code_blocks,
        }
    }

    /// Table of contents for one document
    pub fn extract_headings(&self, body: &str) -> Vec<HeadingRecord> {
        self.headings.extract(body)
    }

    /// Wikilinks in one document, without resolution
    pub fn parse_links(&self, body: &str) -> Vec<WikiLinkMatch> {
        self.links.parse(body)
    }

    /// Rewrite wikilinks in one document
    pub fn rewrite_links(&self, body: &str, index: &DocumentIndex) -> (String, Vec<ResolvedLink>) {
        self.links.transform(body, index)
    }

    /// Build the link graph for a collection of `(path, body)` pairs
    pub fn link_graph<'a, I>(&self, documents: I, index: &DocumentIndex) -> LinkGraph
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let graph = LinkGraph::from_documents(documents, index, &self.links);
        tracing::debug!("Built link graph with {} linking documents", graph.outgoing.len());
        graph
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{HeadingIdPolicy, LinkSyntax};

    #[test]
    fn test_process_document() {
        let pipeline = DocumentPipeline::default();
        let index = DocumentIndex::new(["projects/backend"]);
        let body = "# Title\n\nSee [[backend]] and [[Nowhere]].\n\n```js\nlet x = 1;\n```\n";

        let doc = pipeline.process(body, &index);

        assert_eq!(doc.headings, vec![HeadingRecord::new(1, "Title", "title")]);
        assert_eq!(doc.links.len(), 2);
        assert!(doc.links[0].exists);
        assert!(!doc.links[1].exists);
        assert_eq!(doc.broken_links().count(), 1);
        assert!(!doc.content.contains("[["));
        assert_eq!(doc.code_blocks[0].language, "javascript");
    }

    #[test]
    fn test_config_drives_components() {
        let mut config = Config::default();
        config.link_prefix = "notes".into();
        config.link_syntax = LinkSyntax::Pipe;
        config.heading_ids = HeadingIdPolicy::Suffix;
        config.languages.push("rust".into());
        config.language_aliases.insert("rs".into(), "rust".into());
        let pipeline = DocumentPipeline::new(config);

        let doc = pipeline.process(
            "# A\n# A\n[[page|the page]]\n```rs\nfn main() {}\n```",
            &DocumentIndex::default(),
        );

        let ids: Vec<_> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a-1"]);
        assert_eq!(doc.links[0].href, "/notes/page");
        assert_eq!(doc.links[0].display, "the page");
        assert_eq!(doc.code_blocks[0].language, "rust");
        assert!(pipeline.languages().is_registered("rs"));
    }

    #[test]
    fn test_link_lookup_flags() {
        let index = DocumentIndex::new(["notes/rust-safety", "guides/setup"]);
        let body = "[[Rust Safety]] [[setup#First Run]] [[C# Basics]]";

        let doc = DocumentPipeline::default().process(body, &index);
        let hrefs: Vec<_> = doc.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/wiki/rust-safety", "/wiki/setupfirst-run", "/wiki/c-basics"]);
        assert_eq!(doc.broken_links().count(), 3);

        let mut config = Config::default();
        config.fragment_links = true;
        config.extended_lookup = true;
        let doc = DocumentPipeline::new(config).process(body, &index);
        let hrefs: Vec<_> = doc.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["/wiki/notes/rust-safety", "/wiki/guides/setup#first-run", "/wiki/c#basics"]
        );
        assert_eq!(doc.broken_links().count(), 1);
    }

    #[test]
    fn test_empty_document() {
        let doc = DocumentPipeline::default().process("", &DocumentIndex::default());
        assert!(doc.headings.is_empty());
        assert!(doc.links.is_empty());
        assert!(doc.code_blocks.is_empty());
        assert_eq!(doc.content, "");
    }
}
