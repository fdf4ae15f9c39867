//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

/// Ping response.
#[derive(Serialize)]
pub struct PingResponse {
    /// Always `"pong"`.
    pub message: &'static str,
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

/// Creates the ping route; never gated.
pub fn routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/ping", get(ping))
}
