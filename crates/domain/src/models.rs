use serde::{Deserialize, Serialize};

use crate::errors::InvariantViolation;

/// A validated unit of source text plus an optional lowercase language hint.
///
/// Construction goes through [`crate::validation::CodeValidator`]; the only
/// invariant enforced here is that the content is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    content: String,
    language: Option<String>,
}

impl CodeSnippet {
    pub fn new(
        content: impl Into<String>,
        language: Option<String>,
    ) -> Result<Self, InvariantViolation> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(InvariantViolation(
                "code content cannot be empty".to_string(),
            ));
        }
        Ok(Self { content, language })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn line_count(&self) -> usize {
        self.content.matches('\n').count() + 1
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// An explanation of a snippet, produced by a provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeExplanation {
    pub snippet: CodeSnippet,
    pub explanation: String,
    pub provider: String,
    pub is_placeholder: bool,
}

impl CodeExplanation {
    pub fn new(
        snippet: CodeSnippet,
        explanation: impl Into<String>,
        provider: impl Into<String>,
        is_placeholder: bool,
    ) -> Result<Self, InvariantViolation> {
        let explanation = explanation.into();
        if explanation.trim().is_empty() {
            return Err(InvariantViolation("explanation cannot be empty".to_string()));
        }
        Ok(Self {
            snippet,
            explanation,
            provider: provider.into(),
            is_placeholder,
        })
    }
}

/// A refactoring suggestion: replacement code plus discrete improvements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRefactor {
    pub original_snippet: CodeSnippet,
    pub refactored_code: String,
    pub explanation: String,
    pub improvements: Vec<String>,
    pub provider: String,
    pub is_placeholder: bool,
}

impl CodeRefactor {
    pub fn new(
        original_snippet: CodeSnippet,
        refactored_code: impl Into<String>,
        explanation: impl Into<String>,
        improvements: Vec<String>,
        provider: impl Into<String>,
        is_placeholder: bool,
    ) -> Result<Self, InvariantViolation> {
        let refactored_code = refactored_code.into();
        let explanation = explanation.into();
        if refactored_code.trim().is_empty() {
            return Err(InvariantViolation(
                "refactored code cannot be empty".to_string(),
            ));
        }
        if explanation.trim().is_empty() {
            return Err(InvariantViolation(
                "refactoring explanation cannot be empty".to_string(),
            ));
        }
        if improvements.is_empty() {
            return Err(InvariantViolation(
                "at least one improvement must be specified".to_string(),
            ));
        }
        Ok(Self {
            original_snippet,
            refactored_code,
            explanation,
            improvements,
            provider: provider.into(),
            is_placeholder,
        })
    }

    pub fn line_count(&self) -> usize {
        self.refactored_code.matches('\n').count() + 1
    }

    pub fn character_count(&self) -> usize {
        self.refactored_code.chars().count()
    }
}

/// A generated unit-test scaffold for a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestScaffold {
    pub original_snippet: CodeSnippet,
    pub test_code: String,
    pub test_framework: String,
    pub test_cases: Vec<String>,
    pub setup_instructions: Option<String>,
    pub provider: String,
    pub is_placeholder: bool,
}

impl TestScaffold {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        original_snippet: CodeSnippet,
        test_code: impl Into<String>,
        test_framework: impl Into<String>,
        test_cases: Vec<String>,
        setup_instructions: Option<String>,
        provider: impl Into<String>,
        is_placeholder: bool,
    ) -> Result<Self, InvariantViolation> {
        let test_code = test_code.into();
        let test_framework = test_framework.into();
        if test_code.trim().is_empty() {
            return Err(InvariantViolation("test code cannot be empty".to_string()));
        }
        if test_framework.trim().is_empty() {
            return Err(InvariantViolation(
                "test framework cannot be empty".to_string(),
            ));
        }
        if test_cases.is_empty() {
            return Err(InvariantViolation(
                "at least one test case must be specified".to_string(),
            ));
        }
        Ok(Self {
            original_snippet,
            test_code,
            test_framework,
            test_cases,
            setup_instructions,
            provider: provider.into(),
            is_placeholder,
        })
    }

    pub fn line_count(&self) -> usize {
        self.test_code.matches('\n').count() + 1
    }

    pub fn character_count(&self) -> usize {
        self.test_code.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(content: &str) -> CodeSnippet {
        CodeSnippet::new(content, None).unwrap()
    }

    #[test]
    fn test_snippet_rejects_whitespace_only_content() {
        assert!(CodeSnippet::new("", None).is_err());
        assert!(CodeSnippet::new("   \n\t  ", None).is_err());
    }

    #[test]
    fn test_snippet_counts() {
        let s = CodeSnippet::new("fn main() {}\nprintln!();", Some("rust".to_string())).unwrap();
        assert_eq!(s.line_count(), 2);
        assert_eq!(s.character_count(), 24);
        assert_eq!(s.language(), Some("rust"));

        let single = snippet("x = 1");
        assert_eq!(single.line_count(), 1);
        assert_eq!(single.character_count(), 5);
    }

    #[test]
    fn test_character_count_is_chars_not_bytes() {
        let s = snippet("let π = 3.14;");
        assert_eq!(s.character_count(), 13);
        assert!(s.content().len() > 13);
    }

    #[test]
    fn test_explanation_requires_text() {
        let err = CodeExplanation::new(snippet("x"), "  ", "openai", false);
        assert!(err.is_err());

        let ok = CodeExplanation::new(snippet("x"), "assigns x", "openai", false).unwrap();
        assert_eq!(ok.provider, "openai");
        assert!(!ok.is_placeholder);
    }

    #[test]
    fn test_refactor_requires_at_least_one_improvement() {
        let err = CodeRefactor::new(
            snippet("x"),
            "let x = 1;",
            "renamed for clarity",
            vec![],
            "openai",
            false,
        );
        assert!(err.is_err());

        let ok = CodeRefactor::new(
            snippet("x"),
            "let x = 1;\nlet y = 2;",
            "renamed for clarity",
            vec!["clearer names".to_string()],
            "openai",
            false,
        )
        .unwrap();
        assert_eq!(ok.line_count(), 2);
        assert_eq!(ok.character_count(), 21);
    }

    #[test]
    fn test_scaffold_requires_framework_and_cases() {
        let no_framework = TestScaffold::new(
            snippet("x"),
            "def test_x(): pass",
            " ",
            vec!["test_x".to_string()],
            None,
            "openai",
            false,
        );
        assert!(no_framework.is_err());

        let no_cases = TestScaffold::new(
            snippet("x"),
            "def test_x(): pass",
            "pytest",
            vec![],
            None,
            "openai",
            false,
        );
        assert!(no_cases.is_err());

        let ok = TestScaffold::new(
            snippet("x"),
            "def test_x(): pass",
            "pytest",
            vec!["test_x".to_string()],
            Some("pip install pytest".to_string()),
            "openai",
            false,
        )
        .unwrap();
        assert_eq!(ok.line_count(), 1);
        assert_eq!(ok.setup_instructions.as_deref(), Some("pip install pytest"));
    }
}
