use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hard transport-level caps, independent of the configured domain limit.
pub const MAX_CODE_LENGTH: usize = 50000;
pub const MAX_LANGUAGE_LENGTH: usize = 50;
pub const MAX_GOAL_LENGTH: usize = 200;
pub const MAX_FRAMEWORK_LENGTH: usize = 50;

fn validate_code(code: &str) -> Result<(), String> {
    if code.trim().is_empty() {
        return Err("code cannot be empty or only whitespace".to_string());
    }
    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(format!("code must be at most {MAX_CODE_LENGTH} characters"));
    }
    Ok(())
}

fn validate_optional_length(
    value: &Option<String>,
    max_length: usize,
    field: &str,
) -> Result<(), String> {
    if let Some(value) = value {
        if value.chars().count() > max_length {
            return Err(format!("{field} must be at most {max_length} characters"));
        }
    }
    Ok(())
}

/// Request model for code explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainCodeRequest {
    pub code: String,
    pub language: Option<String>,
}

impl ExplainCodeRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_code(&self.code)?;
        validate_optional_length(&self.language, MAX_LANGUAGE_LENGTH, "language")
    }
}

/// Request model for code refactoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactorCodeRequest {
    pub code: String,
    pub language: Option<String>,
    pub goal: Option<String>,
}

impl RefactorCodeRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_code(&self.code)?;
        validate_optional_length(&self.language, MAX_LANGUAGE_LENGTH, "language")?;
        validate_optional_length(&self.goal, MAX_GOAL_LENGTH, "goal")
    }
}

/// Request model for test generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTestsRequest {
    pub code: String,
    pub language: Option<String>,
    pub test_framework: Option<String>,
}

impl GenerateTestsRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_code(&self.code)?;
        validate_optional_length(&self.language, MAX_LANGUAGE_LENGTH, "language")?;
        validate_optional_length(&self.test_framework, MAX_FRAMEWORK_LENGTH, "test_framework")
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_must_be_non_empty() {
        let request = ExplainCodeRequest {
            code: "   ".to_string(),
            language: None,
        };
        assert!(request.validate().is_err());

        let request = ExplainCodeRequest {
            code: "x = 1".to_string(),
            language: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_code_length_capped() {
        let request = ExplainCodeRequest {
            code: "a".repeat(MAX_CODE_LENGTH + 1),
            language: None,
        };
        assert!(request.validate().is_err());

        let request = ExplainCodeRequest {
            code: "a".repeat(MAX_CODE_LENGTH),
            language: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_optional_field_lengths() {
        let request = RefactorCodeRequest {
            code: "x = 1".to_string(),
            language: Some("p".repeat(MAX_LANGUAGE_LENGTH + 1)),
            goal: None,
        };
        assert!(request.validate().unwrap_err().contains("language"));

        let request = RefactorCodeRequest {
            code: "x = 1".to_string(),
            language: None,
            goal: Some("g".repeat(MAX_GOAL_LENGTH + 1)),
        };
        assert!(request.validate().unwrap_err().contains("goal"));

        let request = GenerateTestsRequest {
            code: "x = 1".to_string(),
            language: None,
            test_framework: Some("f".repeat(MAX_FRAMEWORK_LENGTH + 1)),
        };
        assert!(request.validate().unwrap_err().contains("test_framework"));
    }

    #[test]
    fn test_error_response_serializes_type_field() {
        let error = ErrorResponse::new("validation_error", "code cannot be empty");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "validation_error");
        assert_eq!(json["message"], "code cannot be empty");
        assert!(json.get("details").is_none());
    }
}
