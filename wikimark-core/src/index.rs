//! Snapshot of known document paths used to decide whether a wiki link exists.

use crate::slug::slugify;
use std::collections::HashMap;

/// Read-only set of document paths such as `projects/backend`
///
/// Paths use `/` separators and carry no file extension. The index is built
/// by whoever enumerates the document collection and is rebuilt when the
/// collection changes.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    paths: Vec<String>,
    by_path: HashMap<String, usize>,
    by_segment: HashMap<String, usize>,
    by_segment_slug: HashMap<String, usize>,
}

impl DocumentIndex {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for path in paths {
            index.insert(path.into());
        }
        index
    }

    fn insert(&mut self, raw: String) {
        let path = normalize_path(&raw);
        if path.is_empty() {
            return;
        }

        let key = path.to_lowercase();
        if self.by_path.contains_key(&key) {
            tracing::warn!("Duplicate document path in index: {}", path);
            return;
        }

        let idx = self.paths.len();
        let segment = last_segment(&path);
        let segment_key = segment.to_lowercase();

        // First path wins when several share a final segment
        if let Some(&existing) = self.by_segment.get(&segment_key) {
            tracing::warn!(
                "Ambiguous segment '{}': keeping {} over {}",
                segment,
                self.paths[existing],
                path
            );
        } else {
            self.by_segment.insert(segment_key, idx);
        }
        self.by_segment_slug.entry(slugify(segment)).or_insert(idx);

        self.by_path.insert(key, idx);
        self.paths.push(path);
    }

    /// Find the document whose final path segment equals `target`,
    /// compared case-insensitively.
    pub fn lookup(&self, target: &str) -> Option<&str> {
        let target = target.trim();
        if target.is_empty() {
            return None;
        }

        let idx = self.by_segment.get(&target.to_lowercase())?;
        Some(self.paths[*idx].as_str())
    }

    /// Like [`lookup`](Self::lookup), with two extra fallbacks.
    ///
    /// Tries, in order: the full path, the final path segment compared
    /// case-insensitively against the raw target, and finally the slug of
    /// the target against the slug of each final segment.
    pub fn lookup_extended(&self, target: &str) -> Option<&str> {
        let target = target.trim();
        if target.is_empty() {
            return None;
        }

        let lowered = target.to_lowercase();
        let idx = self
            .by_path
            .get(normalize_path(&lowered).as_str())
            .or_else(|| self.by_segment.get(&lowered))
            .or_else(|| {
                let slug = slugify(target);
                if slug.is_empty() {
                    None
                } else {
                    self.by_segment_slug.get(&slug)
                }
            })?;

        Some(self.paths[*idx].as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path
            .contains_key(normalize_path(path).to_lowercase().as_str())
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DocumentIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Convert separators to `/` and strip surrounding slashes and whitespace
pub fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/").trim_matches('/').to_string()
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
