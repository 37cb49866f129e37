use serde::{Deserialize, Serialize};

/// Result of a code explanation. Counts describe the analyzed snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResult {
    pub explanation: String,
    pub line_count: usize,
    pub character_count: usize,
    pub provider: String,
    pub placeholder: bool,
}

/// Result of a refactoring. Counts describe the refactored code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefactorResult {
    pub refactored_code: String,
    pub explanation: String,
    pub improvements: Vec<String>,
    pub line_count: usize,
    pub character_count: usize,
    pub provider: String,
    pub placeholder: bool,
}

/// Result of test generation. Counts describe the generated test code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestScaffoldResult {
    pub test_code: String,
    pub test_framework: String,
    pub test_cases: Vec<String>,
    pub setup_instructions: Option<String>,
    pub line_count: usize,
    pub character_count: usize,
    pub provider: String,
    pub placeholder: bool,
}
