//! Configuration parsing and management.

use crate::markdown::{HeadingIdPolicy, LinkSyntax};
use crate::slug::SlugPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LINK_PREFIX: &str = "/wiki/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Pipeline configuration, usually loaded from `wikimark.yml`
///
/// Every field is optional in the file; an empty document yields the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for generated wiki hrefs
    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,

    #[serde(default)]
    pub link_syntax: LinkSyntax,

    #[serde(default)]
    pub slug_policy: SlugPolicy,

    #[serde(default)]
    pub heading_ids: HeadingIdPolicy,

    /// Ignore headings and wikilinks inside fenced code blocks
    #[serde(default)]
    pub skip_code_blocks: bool,

    /// Split `[[Page#Section]]` into a page and a heading anchor
    #[serde(default)]
    pub fragment_links: bool,

    /// Let link targets also match full paths and slugged segment names
    #[serde(default)]
    pub extended_lookup: bool,

    /// Extra fenced-code languages to register at startup
    #[serde(default)]
    pub languages: Vec<String>,

    /// Extra language aliases (alias -> canonical name)
    #[serde(default)]
    pub language_aliases: BTreeMap<String, String>,

    // Internal: path to config file, if loaded from disk
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_link_prefix() -> String {
    String::from(DEFAULT_LINK_PREFIX)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_prefix: default_link_prefix(),
            link_syntax: LinkSyntax::default(),
            slug_policy: SlugPolicy::default(),
            heading_ids: HeadingIdPolicy::default(),
            skip_code_blocks: false,
            fragment_links: false,
            extended_lookup: false,
            languages: Vec::new(),
            language_aliases: BTreeMap::new(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&contents)?;

        config.config_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {:?}", path);

        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document, but an empty file means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// The file this config was loaded from
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Link prefix with a leading and trailing slash ("/wiki/" or "/")
    pub fn normalized_link_prefix(&self) -> String {
        normalize_link_prefix(&self.link_prefix)
    }
}

/// Ensure link prefixes have a leading and trailing slash
pub fn normalize_link_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut s = String::with_capacity(trimmed.len() + 2);
    s.push('/');
    for segment in trimmed.split('/').filter(|seg| !seg.is_empty()) {
        s.push_str(segment);
        s.push('/');
    }
    s
}
