use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::telemetry::AggregatedRecord;
use crate::AppState;

use super::AppError;

// ─── GET /stats/ ─────────────────────────────────────────────────
/// Aggregated stats, gated by per-client admission control.
///
/// The client identity is the transport-level peer IP; no forwarded
/// headers are consulted. Over-limit callers get a 429 with a
/// plain-text body instead of data.

pub async fn query_stats(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<HashMap<String, AggregatedRecord>>, AppError> {
    if !state.limiter.check(&addr.ip().to_string()) {
        return Err(AppError::RateLimited);
    }
    Ok(Json(state.store.snapshot()))
}
