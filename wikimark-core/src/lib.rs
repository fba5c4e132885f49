//! # wikimark-core
//!
//! Document-structure extraction for a vimwiki-style knowledge base.
//!
//! This crate pulls a table of contents out of Markdown/MDX notes and
//! rewrites `[[wiki links]]` into existence-aware link elements, checked
//! against an index of known documents.
//!
//! ```
//! use wikimark_core::{DocumentIndex, DocumentPipeline};
//!
//! let pipeline = DocumentPipeline::default();
//! let index = DocumentIndex::new(["projects/backend"]);
//!
//! let doc = pipeline.process("# Notes\n\nSee [[backend]].", &index);
//! assert_eq!(doc.headings[0].id, "notes");
//! assert!(doc.links[0].exists);
//! ```

pub mod config;
pub mod index;
pub mod languages;
pub mod markdown;
pub mod models;
pub mod pipeline;
pub mod slug;

pub use config::{Config, ConfigError};
pub use index::DocumentIndex;
pub use languages::LanguageRegistry;
pub use markdown::{
    detect_language, extract_headings, parse_wiki_links, CodeBlock, HeadingExtractor,
    HeadingIdPolicy, LinkSyntax, WikiLinkResolver,
};
pub use models::{LinkGraph, ProcessedDocument};
pub use pipeline::DocumentPipeline;
pub use slug::{slugify, slugify_with, SlugPolicy};
pub use wikimark_types::{HeadingRecord, ResolvedLink, WikiLinkMatch};
