use thiserror::Error;

/// Validation failures detected before any provider call is made.
///
/// Always recoverable at the transport boundary into a 4xx-style response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("code cannot be empty")]
    EmptyCode,
    #[error("code size {actual_size} exceeds maximum of {max_size} characters")]
    CodeTooLarge { actual_size: usize, max_size: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failures interacting with an external model service.
///
/// Timeout and quota conditions get their own variants so callers can react
/// without inspecting transport details; everything else stays generic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiProviderError {
    #[error("provider request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },
    #[error("provider quota exceeded")]
    Quota,
    #[error("provider returned HTTP status {status}")]
    Http { status: u16 },
    #[error("empty response from provider")]
    EmptyResponse,
    #[error("provider request failed: {0}")]
    Unexpected(String),
}

impl AiProviderError {
    /// Whether re-issuing the same request could plausibly succeed.
    ///
    /// Timeouts and server-side 5xx responses are transient; quota and
    /// client-side statuses are terminal until the request itself changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiProviderError::Timeout { .. } => true,
            AiProviderError::Http { status } => *status >= 500,
            _ => false,
        }
    }
}

/// The only error type capability handlers return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] AiProviderError),
}

/// A value-object invariant was violated while assembling a result.
///
/// These originate from provider output, not user input, so they surface to
/// callers as a provider failure rather than a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantViolation(pub String);

impl From<InvariantViolation> for AiProviderError {
    fn from(violation: InvariantViolation) -> Self {
        AiProviderError::Unexpected(violation.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let empty = ValidationError::EmptyCode;
        assert_eq!(empty.to_string(), "code cannot be empty");

        let too_large = ValidationError::CodeTooLarge {
            actual_size: 50001,
            max_size: 50000,
        };
        assert_eq!(
            too_large.to_string(),
            "code size 50001 exceeds maximum of 50000 characters"
        );

        let timeout = AiProviderError::Timeout { seconds: 30 };
        assert_eq!(
            timeout.to_string(),
            "provider request timed out after 30 seconds"
        );

        let server = AiProviderError::Http { status: 503 };
        assert_eq!(server.to_string(), "provider returned HTTP status 503");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AiProviderError::Timeout { seconds: 30 }.is_retryable());
        assert!(AiProviderError::Http { status: 500 }.is_retryable());
        assert!(AiProviderError::Http { status: 503 }.is_retryable());

        assert!(!AiProviderError::Quota.is_retryable());
        assert!(!AiProviderError::Http { status: 400 }.is_retryable());
        assert!(!AiProviderError::EmptyResponse.is_retryable());
        assert!(!AiProviderError::Unexpected("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_domain_error_preserves_source_message() {
        let err: DomainError = ValidationError::EmptyCode.into();
        assert_eq!(err.to_string(), "code cannot be empty");

        let err: DomainError = AiProviderError::Quota.into();
        assert_eq!(err.to_string(), "provider quota exceeded");
    }

    #[test]
    fn test_invariant_violation_wraps_into_provider_error() {
        let violation = InvariantViolation("refactored code cannot be empty".to_string());
        let err: AiProviderError = violation.into();
        assert_eq!(
            err,
            AiProviderError::Unexpected("refactored code cannot be empty".to_string())
        );
    }
}
