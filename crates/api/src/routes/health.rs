use axum::{http::StatusCode, response::Json};

use crate::models::PingResponse;

/// Liveness endpoint; requires no state and never fails.
pub async fn ping() -> (StatusCode, Json<PingResponse>) {
    (
        StatusCode::OK,
        Json(PingResponse {
            status: "ok".to_string(),
            message: "pong".to_string(),
        }),
    )
}
