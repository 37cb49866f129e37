//! Correlation-ID and request-logging middleware.
//!
//! Every request gets a fresh UUID, echoed back in the `X-Correlation-ID`
//! response header and attached to the request-start/request-completed logs.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

pub async fn correlation_id_middleware(req: Request<Body>, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    tracing::info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        "request started"
    );

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value);
    }

    tracing::info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        status,
        duration_ms,
        "request completed"
    );

    response
}
