//! Ranking of completion candidates

use super::path::{parse_word_path, SymbolPath};
use super::resolve::{resolve_value, Namespace, ResolvedValue};

/// Keep names starting with `prefix` (case-insensitive), shortest first
///
/// The sort is stable, so names of equal length keep their enumeration order.
pub fn rank<I>(candidates: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let prefix = prefix.to_lowercase();
    let mut matches: Vec<String> = candidates
        .into_iter()
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .collect();
    matches.sort_by_key(|name| name.chars().count());
    matches
}

/// Completion queries over a live namespace
pub struct Suggestor<'n, N: Namespace + ?Sized> {
    namespace: &'n N,
}

impl<'n, N: Namespace + ?Sized> Suggestor<'n, N> {
    pub fn new(namespace: &'n N) -> Self {
        Self { namespace }
    }

    /// Resolve the base path of `path` against a fresh copy of the root
    pub fn resolve(&self, path: &SymbolPath) -> ResolvedValue {
        resolve_value(self.namespace.root(), path.base_path.as_deref())
    }

    /// All members matching the prefix at `cursor`, shortest first
    ///
    /// Returns nothing when the cursor is not after a name or separator, so an
    /// empty input never lists the whole namespace.
    pub fn get_suggestions(&self, text: &str, cursor: usize) -> Vec<String> {
        let path = parse_word_path(text, cursor);
        if path.is_empty_context() {
            return Vec::new();
        }
        self.candidates(&path)
    }

    /// The single best completion at `cursor`
    ///
    /// Nothing is suggested until at least one non-blank character follows the
    /// last separator.
    pub fn closest_suggestion(&self, text: &str, cursor: usize) -> Option<String> {
        let path = parse_word_path(text, cursor);
        if path.prefix.trim().is_empty() {
            return None;
        }
        self.candidates(&path).into_iter().next()
    }

    fn candidates(&self, path: &SymbolPath) -> Vec<String> {
        let resolved = self.resolve(path);
        rank(resolved.candidate_names(), &path.prefix)
    }
}
