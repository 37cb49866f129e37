//! AI provider backends for the code assistant
//!
//! This crate provides a trait interface over external model-completion
//! services, enabling seamless switching between backends: a real
//! OpenAI-backed provider and a deterministic mock for development and tests.
//!
//! Providers accept a validated [`CodeSnippet`] and return domain value
//! objects; free-text model output is turned into structured fields by the
//! heuristics in [`parser`], which are pure functions so a future
//! schema-constrained backend can bypass them without touching callers.

pub mod mock;
pub mod models;
pub mod openai;
pub mod parser;
pub mod prompts;

use async_trait::async_trait;
use domain::{AiProviderError, CodeExplanation, CodeRefactor, CodeSnippet, TestScaffold};

// Re-export commonly used types for convenience
pub use mock::MockProvider;
pub use models::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatResponseMessage,
    MessageRole,
};
pub use openai::{OpenAiConfig, OpenAiProvider};

/// Capability set every AI backend must satisfy.
///
/// Any implementation is substitutable; handlers hold an `Arc<dyn AiProvider>`
/// and never know which backend serves them.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Explain what the given snippet does.
    async fn explain_code(&self, snippet: CodeSnippet) -> Result<CodeExplanation, AiProviderError>;

    /// Suggest a refactoring of the snippet, optionally steered by a goal.
    async fn refactor_code(
        &self,
        snippet: CodeSnippet,
        goal: Option<&str>,
    ) -> Result<CodeRefactor, AiProviderError>;

    /// Generate a unit-test scaffold for the snippet.
    async fn generate_tests(
        &self,
        snippet: CodeSnippet,
        test_framework: Option<&str>,
    ) -> Result<TestScaffold, AiProviderError>;

    /// Stable provider identity, reported in results and logs.
    fn provider_name(&self) -> &'static str;
}

/// Pick a test framework when the caller gave no hint.
pub fn default_test_framework(language: Option<&str>) -> &'static str {
    match language {
        Some("rust") => "cargo test",
        Some("javascript") | Some("typescript") => "jest",
        Some("go") => "go test",
        Some("java") => "junit",
        _ => "pytest",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_framework_by_language() {
        assert_eq!(default_test_framework(Some("rust")), "cargo test");
        assert_eq!(default_test_framework(Some("typescript")), "jest");
        assert_eq!(default_test_framework(Some("python")), "pytest");
        assert_eq!(default_test_framework(None), "pytest");
    }
}
