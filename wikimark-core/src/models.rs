//! Output records and the link graph across documents.

use crate::index::{normalize_path, DocumentIndex};
use crate::markdown::{CodeBlock, WikiLinkResolver};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wikimark_types::{HeadingRecord, ResolvedLink};

/// Everything the pipeline extracts from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Table of contents in document order; empty when there are no headings
    pub headings: Vec<HeadingRecord>,

    /// Body with every wikilink rewritten into a `<Link>` element
    pub content: String,

    /// Links in the order they appeared
    pub links: Vec<ResolvedLink>,

    pub code_blocks: Vec<CodeBlock>,
}

impl ProcessedDocument {
    /// Links whose target is not in the index
    pub fn broken_links(&self) -> impl Iterator<Item = &ResolvedLink> {
        self.links.iter().filter(|l| !l.exists)
    }
}

/// Link graph representing connections between documents
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkGraph {
    /// Map from path to list of target paths
    pub outgoing: HashMap<String, Vec<String>>,

    /// Map from path to list of source paths (backlinks)
    pub incoming: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from `(path, body)` pairs.
    ///
    /// Only links that resolve to an indexed document become edges; links
    /// from a document to itself are ignored.
    pub fn from_documents<'a, I>(
        documents: I,
        index: &DocumentIndex,
        resolver: &WikiLinkResolver,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();

        for (path, body) in documents {
            let source = normalize_path(path);
            for link in resolver.parse(body) {
                let Some(target) = resolver.find_document(&link, index) else {
                    continue;
                };
                if target.eq_ignore_ascii_case(&source) {
                    continue;
                }
                graph.add_link(&source, target);
            }
        }

        graph
    }

    /// Add a link from source to target; repeated links are recorded once
    pub fn add_link(&mut self, source: &str, target: &str) {
        let targets = self.outgoing.entry(source.to_string()).or_default();
        if targets.iter().any(|t| t == target) {
            return;
        }
        targets.push(target.to_string());

        self.incoming
            .entry(target.to_string())
            .or_default()
            .push(source.to_string());
    }

    /// Get backlinks for a given document path
    pub fn backlinks(&self, path: &str) -> Vec<String> {
        self.incoming.get(path).cloned().unwrap_or_default()
    }

    /// Get outgoing links for a given document path
    pub fn outgoing(&self, path: &str) -> Vec<String> {
        self.outgoing.get(path).cloned().unwrap_or_default()
    }
}
