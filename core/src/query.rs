use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::build::{build_from_files, BuildError, BuildPolicy};
use crate::index::{SearchIndex, WeightedEntry};
use crate::{format, normalize_term, Weight};

/// Answer to a single-term query: total hit count plus the top-K articles,
/// ordered by weight descending then article name ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub hits: Weight,
    pub top: Vec<WeightedEntry>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self { hits: 0, top: Vec::new() }
    }
}

/// Query side of the engine: a shared immutable index snapshot plus the
/// configured result cutoff. Clones share the snapshot, so one engine can be
/// handed to every request handler without locking.
#[derive(Clone)]
pub struct QueryEngine {
    index: Arc<SearchIndex>,
    top_k: usize,
}

impl QueryEngine {
    pub fn new(index: SearchIndex, top_k: usize) -> Self {
        Self { index: Arc::new(index), top_k }
    }

    /// Build the index from the given files and wrap it in an engine.
    /// Returns the engine and the number of files successfully processed.
    /// Must complete before the first query is served.
    pub fn init<P: AsRef<Path>>(
        paths: &[P],
        policy: BuildPolicy,
        top_k: usize,
    ) -> Result<(Self, usize), BuildError> {
        let built = build_from_files(paths, policy)?;
        Ok((Self::new(built.index, top_k), built.files_indexed))
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Look up a raw term. The term is re-normalized defensively; unknown
    /// and empty terms yield an empty result, never an error.
    pub fn query(&self, raw_term: &str) -> QueryResult {
        let term = match normalize_term(raw_term) {
            Some(t) => t,
            None => return QueryResult::empty(),
        };
        match self.index.lookup(&term) {
            Some(postings) => {
                // Entries are pre-sorted at build time, so top-K is a prefix.
                let top = postings.entries.iter().take(self.top_k).cloned().collect();
                QueryResult { hits: postings.hits, top }
            }
            None => QueryResult::empty(),
        }
    }

    /// Query and serialize in one step, for callers that speak JSON.
    pub fn search(&self, raw_term: &str) -> String {
        format::to_json(&self.query(raw_term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexBuilder;

    fn engine(top_k: usize) -> QueryEngine {
        let mut b = IndexBuilder::new();
        for i in 0..20 {
            b.accumulate("rust", &format!("Article {i:02}"), i + 1);
        }
        QueryEngine::new(b.finish(), top_k)
    }

    #[test]
    fn top_is_truncated_to_k() {
        let e = engine(10);
        let r = e.query("rust");
        assert_eq!(r.top.len(), 10);
        assert_eq!(r.top[0].weight, 20);
        // hits covers all entries, not only the returned ones
        assert_eq!(r.hits, (1..=20).sum::<u64>());
    }

    #[test]
    fn unknown_term_is_empty_result() {
        let e = engine(10);
        assert_eq!(e.query("missing"), QueryResult::empty());
    }

    #[test]
    fn empty_term_is_empty_result() {
        let e = engine(10);
        assert_eq!(e.query(""), QueryResult::empty());
        assert_eq!(e.query("  \t"), QueryResult::empty());
    }

    #[test]
    fn query_renormalizes_raw_term() {
        let e = engine(10);
        assert_eq!(e.query(" RUST ").hits, e.query("rust").hits);
    }
}
