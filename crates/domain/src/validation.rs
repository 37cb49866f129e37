use crate::errors::ValidationError;
use crate::models::CodeSnippet;

/// Business rules applied to inbound code before any provider is called.
///
/// Constructed once at startup from the configured maximum code length and
/// shared read-only by every handler.
#[derive(Debug, Clone, Copy)]
pub struct CodeValidator {
    max_code_length: usize,
}

impl CodeValidator {
    pub fn new(max_code_length: usize) -> Self {
        Self { max_code_length }
    }

    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    /// Validate raw code content: non-empty after trim and within the size cap.
    pub fn validate_code(&self, code: &str) -> Result<(), ValidationError> {
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        let actual_size = code.chars().count();
        if actual_size > self.max_code_length {
            return Err(ValidationError::CodeTooLarge {
                actual_size,
                max_size: self.max_code_length,
            });
        }
        Ok(())
    }

    /// Build a validated snippet from raw code and an optional language hint.
    ///
    /// The hint is lowercased and trimmed; empty-after-trim becomes unset.
    pub fn create_snippet(
        &self,
        code: &str,
        language: Option<&str>,
    ) -> Result<CodeSnippet, ValidationError> {
        self.validate_code(code)?;
        CodeSnippet::new(code, normalize_hint(language))
            .map_err(|violation| ValidationError::InvalidInput(violation.0))
    }
}

/// Lowercase and trim an optional hint, mapping empty-after-trim to `None`.
pub fn normalize_hint(hint: Option<&str>) -> Option<String> {
    hint.map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
}

/// Trim an optional free-text field, mapping empty-after-trim to `None`.
pub fn normalize_text(text: Option<&str>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
