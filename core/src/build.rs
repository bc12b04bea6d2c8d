use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::index::{IndexBuilder, SearchIndex};
use crate::{normalize_term, Weight};

/// Build-time failure, always tied to the offending file.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// What to do when an input file cannot be read or parsed.
///
/// The default is fail-fast: serving a silently partial index is a
/// correctness hazard, so startup aborts instead. `SkipAndLog` trades that
/// guarantee for resilience and leaves a warning in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildPolicy {
    #[default]
    FailFast,
    SkipAndLog,
}

#[derive(Debug)]
pub struct BuiltIndex {
    pub index: SearchIndex,
    /// Number of source files successfully processed.
    pub files_indexed: usize,
}

/// Parse every file into a fresh inverted index. Runs single-threaded and to
/// completion before any query may be served.
pub fn build_from_files<P: AsRef<Path>>(
    paths: &[P],
    policy: BuildPolicy,
) -> Result<BuiltIndex, BuildError> {
    let mut builder = IndexBuilder::new();
    let mut files_indexed = 0usize;
    for path in paths {
        let path = path.as_ref();
        match read_index_file(path, &mut builder) {
            Ok(records) => {
                tracing::debug!(path = %path.display(), records, "indexed file");
                files_indexed += 1;
            }
            Err(err) => match policy {
                BuildPolicy::FailFast => return Err(err),
                BuildPolicy::SkipAndLog => {
                    tracing::warn!(error = %err, "skipping index file");
                }
            },
        }
    }
    Ok(BuiltIndex { index: builder.finish(), files_indexed })
}

/// Parse one `ridx v1` file into the builder, returning the record count.
fn read_index_file(path: &Path, builder: &mut IndexBuilder) -> Result<usize, BuildError> {
    let file = File::open(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut records = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lineno = lineno + 1;
        let trimmed = line.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (term, article, weight) = parse_record(trimmed).map_err(|reason| {
            BuildError::Malformed {
                path: path.to_path_buf(),
                line: lineno,
                reason,
            }
        })?;
        builder.accumulate(&term, article, weight);
        records += 1;
    }
    Ok(records)
}

/// Split one record line into (normalized term, article, weight).
fn parse_record(line: &str) -> Result<(String, &str, Weight), String> {
    let mut fields = line.split('\t');
    let raw_term = fields.next().unwrap_or("");
    let article = fields
        .next()
        .ok_or_else(|| "expected term<TAB>article[<TAB>weight]".to_string())?;
    let weight = match fields.next() {
        Some(w) => w
            .parse::<Weight>()
            .map_err(|_| format!("invalid weight {w:?}"))?,
        None => 1,
    };
    if fields.next().is_some() {
        return Err("too many fields".to_string());
    }
    let term = normalize_term(raw_term).ok_or_else(|| "empty term".to_string())?;
    if article.is_empty() {
        return Err("empty article".to_string());
    }
    Ok((term, article, weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_weight() {
        let (term, article, weight) = parse_record("apple\tApple\t8").unwrap();
        assert_eq!((term.as_str(), article, weight), ("apple", "Apple", 8));
    }

    #[test]
    fn weight_defaults_to_one() {
        let (_, _, weight) = parse_record("apple\tApple").unwrap();
        assert_eq!(weight, 1);
    }

    #[test]
    fn term_is_normalized() {
        let (term, _, _) = parse_record("  APPLE \tApple\t2").unwrap();
        assert_eq!(term, "apple");
    }

    #[test]
    fn rejects_bad_records() {
        assert!(parse_record("apple").is_err());
        assert!(parse_record("apple\tApple\t-3").is_err());
        assert!(parse_record("apple\tApple\tmany").is_err());
        assert!(parse_record("apple\t\t1").is_err());
        assert!(parse_record(" \tApple\t1").is_err());
        assert!(parse_record("a\tb\t1\textra").is_err());
    }
}
