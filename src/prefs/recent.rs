use serde::{Deserialize, Serialize};

/// Most recent searches kept.
pub const MAX_RECENT_SEARCHES: usize = 10;

/// Most-recently-used search terms, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    terms: Vec<String>,
}

impl RecentSearches {
    /// Rebuild from stored terms, re-applying the dedupe and cap in case the
    /// stored list was written by an older version.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stored: Vec<String> = terms.into_iter().map(|t| t.as_ref().to_string()).collect();
        let mut recent = Self::default();
        for term in stored.iter().rev() {
            recent.record(term);
        }
        recent
    }

    /// Record a committed search. Blank input is ignored. Returns whether the
    /// list changed.
    pub fn record(&mut self, term: &str) -> bool {
        let cleaned = term.trim();
        if cleaned.is_empty() {
            return false;
        }
        let lowered = cleaned.to_lowercase();
        self.terms.retain(|existing| existing.to_lowercase() != lowered);
        self.terms.insert(0, cleaned.to_string());
        self.terms.truncate(MAX_RECENT_SEARCHES);
        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
