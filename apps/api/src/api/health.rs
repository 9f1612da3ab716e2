//! Readiness endpoint

use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
}

/// Create a readiness router
pub fn router() -> Router {
    Router::new().route("/ready", get(readiness_check))
}

/// Readiness check.
///
/// The task store lives in-process, so the service is ready as soon as it
/// accepts connections; there is no backend to probe.
async fn readiness_check() -> Json<ReadyResponse> {
    Json(ReadyResponse { status: "ready" })
}
