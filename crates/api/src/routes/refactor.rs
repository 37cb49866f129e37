use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use services::RefactorCodeCommand;

use crate::error::{dispatch_error_response, validation_rejection};
use crate::models::RefactorCodeRequest;
use crate::routes::AppState;

/// Refactor a code snippet using AI.
pub async fn refactor_code(
    State(dispatcher): State<AppState>,
    Json(request): Json<RefactorCodeRequest>,
) -> Response {
    if let Err(message) = request.validate() {
        return validation_rejection(message);
    }

    tracing::info!(characters = request.code.chars().count(), "refactor requested");

    let command = RefactorCodeCommand {
        code: request.code,
        language: request.language,
        goal: request.goal,
    };

    match dispatcher.dispatch(command).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => dispatch_error_response(error),
    }
}
