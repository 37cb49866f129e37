//! Mapping from the closed error taxonomy onto HTTP responses.
//!
//! Validation errors surface with enough detail to correct the request;
//! provider errors surface a generic message without internal diagnostics.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use domain::{DomainError, ValidationError};
use services::DispatchError;

use crate::models::ErrorResponse;

/// Response for a request rejected by transport-level validation.
pub fn validation_rejection(message: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new("validation_error", message)),
    )
        .into_response()
}

/// Map a dispatch failure onto a response.
pub fn dispatch_error_response(error: DispatchError) -> Response {
    match error {
        DispatchError::Handler(DomainError::Validation(validation)) => {
            tracing::warn!(error = %validation, "validation error");

            let mut body = ErrorResponse::new("validation_error", validation.to_string());
            if let ValidationError::CodeTooLarge {
                actual_size,
                max_size,
            } = validation
            {
                body = body.with_details(json!({
                    "actual_size": actual_size,
                    "max_size": max_size,
                }));
            }

            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        DispatchError::Handler(DomainError::Provider(provider)) => {
            tracing::error!(error = %provider, "AI provider error");

            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "ai_provider_error",
                    "AI service temporarily unavailable",
                )),
            )
                .into_response()
        }
        DispatchError::HandlerNotRegistered { command } => {
            tracing::error!(command, "no handler registered for dispatched command");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "internal_error",
                    "An unexpected error occurred",
                )),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::AiProviderError;

    #[test]
    fn test_validation_error_maps_to_422_with_size_details() {
        let error = DispatchError::Handler(DomainError::Validation(
            ValidationError::CodeTooLarge {
                actual_size: 60000,
                max_size: 50000,
            },
        ));
        let response = dispatch_error_response(error);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_provider_error_maps_to_503() {
        let error =
            DispatchError::Handler(DomainError::Provider(AiProviderError::Quota));
        let response = dispatch_error_response(error);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_unregistered_command_maps_to_500() {
        let error = DispatchError::HandlerNotRegistered { command: "Explain" };
        let response = dispatch_error_response(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
