//! In-memory full-text article search: build an inverted index from `ridx v1`
//! files at startup, then answer single-term queries with the total hit count
//! and the top-K highest-weighted articles.
//!
//! # Index file format (`ridx v1`)
//!
//! UTF-8 text, one record per line:
//!
//! ```text
//! term<TAB>article<TAB>weight
//! term<TAB>article            # weight implicitly 1
//! ```
//!
//! Lines starting with `#` and blank lines are skipped. Terms are trimmed and
//! lower-cased on read. Weights are non-negative integers and are additive:
//! multiple records (within or across files) for the same (term, article) pair
//! sum rather than overwrite.

pub mod build;
pub mod format;
pub mod index;
pub mod query;

pub use build::{build_from_files, BuildError, BuildPolicy, BuiltIndex};
pub use index::{IndexBuilder, SearchIndex, TermPostings, WeightedEntry};
pub use query::{QueryEngine, QueryResult};

/// Accumulated relevance contribution of an article for a term.
pub type Weight = u64;

/// Default number of top articles returned per query.
pub const DEFAULT_TOP_K: usize = 10;

/// Normalize a raw term for index keys and lookups: trim and lower-case.
///
/// Returns `None` when nothing remains, so an empty or whitespace-only term
/// can never become an index key.
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_term("  Apple "), Some("apple".to_string()));
        assert_eq!(normalize_term("ÉCOLE"), Some("école".to_string()));
    }

    #[test]
    fn normalize_rejects_empty() {
        assert_eq!(normalize_term(""), None);
        assert_eq!(normalize_term("   \t"), None);
    }
}
