// Domain Layer - Value Objects and Error Taxonomy
//
// This crate contains the technology-agnostic core of the code assistant:
// - models: immutable value objects (snippets and analysis results)
// - errors: the closed error taxonomy every other layer reports through
// - validation: business rules applied before any provider is called

pub mod errors;
pub mod models;
pub mod validation;

pub use errors::{AiProviderError, DomainError, InvariantViolation, ValidationError};
pub use models::{CodeExplanation, CodeRefactor, CodeSnippet, TestScaffold};
pub use validation::CodeValidator;
