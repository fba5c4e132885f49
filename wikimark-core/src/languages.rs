//! Code-block language names and their aliases.
//!
//! The registry is an ordinary value: build it once at startup (the
//! [`DocumentPipeline`](crate::DocumentPipeline) does this) and share it by
//! reference. Nothing is registered as a side effect of loading the crate.

use std::collections::{BTreeSet, HashMap};

const DEFAULT_LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "shell",
    "markdown",
    "json",
];

const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("rb", "ruby"),
    ("yml", "yaml"),
    ("sh", "shell"),
    ("bash", "shell"),
    ("html", "xml"),
    ("htm", "xml"),
    ("vue", "xml"),
    ("md", "markdown"),
];

/// Known fenced-code languages plus an alias table
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: BTreeSet<String>,
    aliases: HashMap<String, String>,
}

impl LanguageRegistry {
    /// A registry with nothing registered
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in language set and alias table
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for language in DEFAULT_LANGUAGES {
            registry.register(language);
        }
        for (alias, canonical) in DEFAULT_ALIASES {
            registry.alias(alias, canonical);
        }
        registry
    }

    pub fn register(&mut self, language: &str) {
        self.languages.insert(language.trim().to_lowercase());
    }

    /// Map `alias` onto `canonical`; later calls replace earlier ones
    pub fn alias(&mut self, alias: &str, canonical: &str) {
        self.aliases
            .insert(alias.trim().to_lowercase(), canonical.trim().to_lowercase());
    }

    /// Lowercase a fence info token and follow its alias, if any
    pub fn normalize(&self, token: &str) -> String {
        let lowered = token.trim().to_lowercase();
        match self.aliases.get(&lowered) {
            Some(canonical) => canonical.clone(),
            None => lowered,
        }
    }

    pub fn is_registered(&self, token: &str) -> bool {
        self.languages.contains(&self.normalize(token))
    }

    /// Registered languages in sorted order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }
}
