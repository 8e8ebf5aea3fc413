use axum::{extract::State, Json};
use std::sync::Arc;

use crate::simulate;
use crate::AppState;

use super::AppError;

// ─── GET /view/ ──────────────────────────────────────────────────
/// Serve one piece of content and record the telemetry for it:
///
///   1. pick content at random,
///   2. count the view (this also stamps the per-second label),
///   3. run the simulated processing delay — a failure here aborts
///      with 400, fail-fast,
///   4. coin-flip a click,
///   5. hand a consistent counter snapshot to the drain task,
///   6. answer with the chosen content.
///
/// Step 5 awaits channel room: when the hand-off slot is full this
/// request stalls until the next drain tick. The counter lock is
/// never held across that await.

pub async fn serve_view(State(state): State<Arc<AppState>>) -> Result<Json<&'static str>, AppError> {
    let content = simulate::pick_content();
    state.counter.record_view(content);

    simulate::process_request(state.config.max_latency_ms, state.config.failure_pct)
        .await
        .map_err(|_| AppError::Simulated)?;

    if simulate::clicked(state.config.click_pct) {
        state.counter.record_click();
    }

    let snapshot = state.counter.snapshot();
    state
        .pipeline
        .submit(snapshot)
        .await
        .map_err(|_| AppError::HandoffClosed)?;

    Ok(Json(content))
}
