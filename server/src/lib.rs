use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use ridx_core::QueryEngine;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Assemble the router over an already-built engine.
///
/// The index build happens before this is called; every handler shares the
/// same immutable snapshot through the cloned engine, so no locking is
/// involved on the query path.
pub fn build_app(engine: QueryEngine, static_dir: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/query/:term", get(query_handler))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(engine)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// `GET /query/:term` — the engine's JSON, verbatim.
///
/// The term arrives already lower-cased from well-behaved clients; the engine
/// re-normalizes anyway. Unknown terms are a 200 with an empty result, not an
/// error.
pub async fn query_handler(
    State(engine): State<QueryEngine>,
    Path(term): Path<String>,
) -> impl IntoResponse {
    tracing::debug!(%term, "query");
    (
        [(header::CONTENT_TYPE, "application/json")],
        engine.search(&term),
    )
}
