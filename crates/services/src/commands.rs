use crate::dto::{ExplainResult, RefactorResult, TestScaffoldResult};

/// An immutable request describing one capability invocation.
///
/// The associated output type ties each command to the transfer object its
/// handler produces, so dispatch stays fully typed end to end.
pub trait Command: Send + Sync + 'static {
    type Output: Send;

    /// Stable command name used in logs and error messages.
    fn name() -> &'static str;
}

/// Command to explain a piece of code.
#[derive(Debug, Clone)]
pub struct ExplainCodeCommand {
    pub code: String,
    pub language: Option<String>,
}

impl Command for ExplainCodeCommand {
    type Output = ExplainResult;

    fn name() -> &'static str {
        "ExplainCode"
    }
}

/// Command to refactor a piece of code.
#[derive(Debug, Clone)]
pub struct RefactorCodeCommand {
    pub code: String,
    pub language: Option<String>,
    pub goal: Option<String>,
}

impl Command for RefactorCodeCommand {
    type Output = RefactorResult;

    fn name() -> &'static str {
        "RefactorCode"
    }
}

/// Command to generate unit tests for a piece of code.
#[derive(Debug, Clone)]
pub struct GenerateTestsCommand {
    pub code: String,
    pub language: Option<String>,
    pub test_framework: Option<String>,
}

impl Command for GenerateTestsCommand {
    type Output = TestScaffoldResult;

    fn name() -> &'static str {
        "GenerateTests"
    }
}
