pub mod stats;
pub mod view;
pub mod welcome;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug)]
pub enum AppError {
    /// Simulated downstream processing failed on the view path.
    Simulated,
    /// Stats query denied by admission control. Not an error in the
    /// aggregation sense, purely a throttling signal.
    RateLimited,
    /// The drain task is gone and the hand-off channel is closed.
    HandoffClosed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // 429 keeps its historical plain-text body.
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Slow down, we don't do it here Flash",
            )
                .into_response(),
            Self::Simulated => error_body(StatusCode::BAD_REQUEST, "simulated processing failure"),
            Self::HandoffClosed => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "aggregation pipeline stopped")
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error":  message,
        "status": status.as_u16(),
    });
    (status, Json(body)).into_response()
}

// ─── Tests ───────────────────────────────────────────────────────
