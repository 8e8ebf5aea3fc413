use axum::{middleware as axum_mw, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Static greeting, unthrottled ────────────────────────
        .route("/", get(handlers::welcome::welcome))
        // ── Content serving + telemetry ─────────────────────────
        .route("/view/", get(handlers::view::serve_view))
        // ── Rate-limited stats query ────────────────────────────
        .route("/stats/", get(handlers::stats::query_stats))
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(CorsLayer::permissive())
}
