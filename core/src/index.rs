use serde::Serialize;
use std::collections::HashMap;

use crate::Weight;

/// One ranked article under a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedEntry {
    pub article: String,
    pub weight: Weight,
}

/// All postings for one term, frozen at build time.
///
/// `entries` is sorted by weight descending, then article name ascending, so
/// the top-K for any K is a prefix slice. `hits` is the sum of all weights
/// under the term and is derived once in [`IndexBuilder::finish`].
#[derive(Debug, Clone)]
pub struct TermPostings {
    pub hits: Weight,
    pub entries: Vec<WeightedEntry>,
}

/// Write side of the inverted index. Accumulates (term, article, weight)
/// contributions during the build phase, then freezes into a [`SearchIndex`].
#[derive(Default)]
pub struct IndexBuilder {
    terms: HashMap<String, HashMap<String, Weight>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a weight contribution for (term, article). Additive: repeated
    /// calls for the same pair sum. The term must already be normalized.
    pub fn accumulate(&mut self, term: &str, article: &str, weight: Weight) {
        let postings = self.terms.entry(term.to_string()).or_default();
        *postings.entry(article.to_string()).or_insert(0) += weight;
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Freeze into an immutable snapshot: sort each term's entries by weight
    /// descending then article ascending, and compute the per-term hit total.
    pub fn finish(self) -> SearchIndex {
        let terms = self
            .terms
            .into_iter()
            .map(|(term, postings)| {
                let hits = postings.values().sum();
                let mut entries: Vec<WeightedEntry> = postings
                    .into_iter()
                    .map(|(article, weight)| WeightedEntry { article, weight })
                    .collect();
                entries.sort_unstable_by(|a, b| {
                    b.weight.cmp(&a.weight).then_with(|| a.article.cmp(&b.article))
                });
                (term, TermPostings { hits, entries })
            })
            .collect();
        SearchIndex { terms }
    }
}

/// Read side of the inverted index: term -> ranked postings.
///
/// Built once before serving starts and never mutated afterward, so shared
/// references may be used from any number of threads without locking.
#[derive(Debug)]
pub struct SearchIndex {
    terms: HashMap<String, TermPostings>,
}

impl SearchIndex {
    /// Look up a normalized term. Absent terms are a normal outcome and
    /// return `None`, never an error.
    pub fn lookup(&self, term: &str) -> Option<&TermPostings> {
        self.terms.get(term)
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}
