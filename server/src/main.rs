use anyhow::{ensure, Context, Result};
use clap::Parser;
use ridx_core::{BuildPolicy, QueryEngine, DEFAULT_TOP_K};
use ridx_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ridx-server")]
#[command(about = "Serve single-term article search over prebuilt ridx index files", long_about = None)]
struct Args {
    /// Index files in ridx v1 format
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Maximum articles returned per query
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
    /// Directory served for non-query paths
    #[arg(long, default_value = ".")]
    static_dir: PathBuf,
    /// Skip unreadable or malformed index files instead of aborting
    #[arg(long, default_value_t = false)]
    skip_bad_files: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let policy = if args.skip_bad_files {
        BuildPolicy::SkipAndLog
    } else {
        BuildPolicy::FailFast
    };

    // The full index build must finish before the listener exists; a query
    // against a partially built index would under-report with no error.
    let (engine, files_indexed) = QueryEngine::init(&args.files, policy, args.top_k)
        .context("index build failed")?;
    ensure!(files_indexed > 0, "no index files could be processed");
    tracing::info!(
        files_indexed,
        terms = engine.index().term_count(),
        "index built"
    );

    let app = build_app(engine, args.static_dir);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
