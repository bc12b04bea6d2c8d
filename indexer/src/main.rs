use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "ridx-indexer")]
#[command(about = "Produce ridx v1 index files from plain-text articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a .txt file or a directory of .txt files into one ridx file
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Output ridx file
        #[arg(long)]
        output: PathBuf,
        /// Drop terms shorter than this
        #[arg(long, default_value_t = 1)]
        min_term_len: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, min_term_len } => build(&input, &output, min_term_len),
    }
}

fn build(input: &Path, output: &Path, min_term_len: usize) -> Result<()> {
    let files = collect_inputs(input)?;
    if files.is_empty() {
        bail!("no .txt files under {}", input.display());
    }

    // term -> article -> occurrence count; BTreeMaps keep the output
    // reproducible across runs.
    let mut index: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for file in &files {
        let article = article_name(file)?;
        let text = fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let mut terms = 0usize;
        for term in tokenize_terms(&text, min_term_len) {
            *index.entry(term).or_default().entry(article.clone()).or_insert(0) += 1;
            terms += 1;
        }
        tracing::debug!(path = %file.display(), %article, terms, "indexed article");
    }

    write_ridx(output, &index)?;
    tracing::info!(
        articles = files.len(),
        terms = index.len(),
        output = %output.display(),
        "index file written"
    );
    Ok(())
}

fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input) {
            let entry = entry?;
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input {} does not exist", input.display());
    }
    Ok(files)
}

/// Article display name: the file stem.
fn article_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .with_context(|| format!("no usable article name in {}", path.display()))
}

/// Lower-cased maximal alphanumeric runs. No stemming or stopword removal;
/// the search side looks terms up verbatim.
fn tokenize_terms(text: &str, min_term_len: usize) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(move |t| t.chars().count() >= min_term_len.max(1))
        .map(|t| t.to_lowercase())
}

fn write_ridx(output: &Path, index: &BTreeMap<String, BTreeMap<String, u64>>) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "# ridx v1")?;
    let created = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    writeln!(w, "# created {created}")?;
    for (term, articles) in index {
        for (article, weight) in articles {
            writeln!(w, "{term}\t{article}\t{weight}")?;
        }
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridx_core::{build_from_files, BuildPolicy};
    use tempfile::tempdir;

    #[test]
    fn tokenize_splits_and_lowercases() {
        let terms: Vec<String> = tokenize_terms("Apple pie, apple-CAKE!", 1).collect();
        assert_eq!(terms, vec!["apple", "pie", "apple", "cake"]);
    }

    #[test]
    fn tokenize_honors_min_len() {
        let terms: Vec<String> = tokenize_terms("a bb ccc", 2).collect();
        assert_eq!(terms, vec!["bb", "ccc"]);
    }

    #[test]
    fn built_file_loads_back_into_the_engine() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Apple.txt"), "apple apple pie").unwrap();
        fs::write(dir.path().join("Beta.txt"), "apple beta").unwrap();
        let out = dir.path().join("out.ridx");

        build(dir.path(), &out, 1).unwrap();

        let built = build_from_files(&[out], BuildPolicy::FailFast).unwrap();
        let apple = built.index.lookup("apple").unwrap();
        assert_eq!(apple.hits, 3);
        assert_eq!(apple.entries[0].article, "Apple");
        assert_eq!(apple.entries[0].weight, 2);
        assert_eq!(apple.entries[1].article, "Beta");
    }
}
