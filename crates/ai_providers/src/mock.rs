//! Deterministic mock provider for development and tests
//!
//! Generates plausible canned results from the snippet itself without any
//! network access. Every result is flagged as a placeholder so callers can
//! tell it apart from a genuine model answer.

use async_trait::async_trait;

use domain::{AiProviderError, CodeExplanation, CodeRefactor, CodeSnippet, TestScaffold};

use crate::{default_test_framework, AiProvider};

const PROVIDER_NAME: &str = "mock";

#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn explain_code(&self, snippet: CodeSnippet) -> Result<CodeExplanation, AiProviderError> {
        let language = snippet.language().unwrap_or("unknown").to_string();
        let explanation = format!(
            "This {language} snippet spans {lines} line(s) and {chars} character(s). \
It was analyzed by the mock provider, which returns deterministic placeholder \
explanations for development and testing.",
            lines = snippet.line_count(),
            chars = snippet.character_count(),
        );

        Ok(CodeExplanation::new(
            snippet,
            explanation,
            PROVIDER_NAME,
            true,
        )?)
    }

    async fn refactor_code(
        &self,
        snippet: CodeSnippet,
        goal: Option<&str>,
    ) -> Result<CodeRefactor, AiProviderError> {
        let explanation = match goal {
            Some(goal) => format!(
                "Mock refactoring suggestion targeting the goal: {goal}. The code is \
returned unchanged; a real provider would rewrite it."
            ),
            None => "Mock refactoring suggestion. The code is returned unchanged; a real \
provider would rewrite it."
                .to_string(),
        };

        let refactored_code = snippet.content().to_string();
        Ok(CodeRefactor::new(
            snippet,
            refactored_code,
            explanation,
            vec![
                "Placeholder improvement: extract repeated logic".to_string(),
                "Placeholder improvement: name intermediate values".to_string(),
            ],
            PROVIDER_NAME,
            true,
        )?)
    }

    async fn generate_tests(
        &self,
        snippet: CodeSnippet,
        test_framework: Option<&str>,
    ) -> Result<TestScaffold, AiProviderError> {
        let framework = test_framework
            .map(str::to_string)
            .unwrap_or_else(|| default_test_framework(snippet.language()).to_string());

        let test_code = format!(
            "# {framework} scaffold generated by the mock provider\n\
def test_basic_functionality():\n    assert True\n\n\
def test_edge_cases():\n    assert True\n"
        );

        Ok(TestScaffold::new(
            snippet,
            test_code,
            framework,
            vec![
                "test_basic_functionality".to_string(),
                "test_edge_cases".to_string(),
            ],
            None,
            PROVIDER_NAME,
            true,
        )?)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
