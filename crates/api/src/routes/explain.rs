use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use services::ExplainCodeCommand;

use crate::error::{dispatch_error_response, validation_rejection};
use crate::models::ExplainCodeRequest;
use crate::routes::AppState;

/// Explain a code snippet using AI.
pub async fn explain_code(
    State(dispatcher): State<AppState>,
    Json(request): Json<ExplainCodeRequest>,
) -> Response {
    if let Err(message) = request.validate() {
        return validation_rejection(message);
    }

    tracing::info!(characters = request.code.chars().count(), "explain requested");

    let command = ExplainCodeCommand {
        code: request.code,
        language: request.language,
    };

    match dispatcher.dispatch(command).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => dispatch_error_response(error),
    }
}
