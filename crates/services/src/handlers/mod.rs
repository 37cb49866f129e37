//! Capability handlers, one per command type.
//!
//! Every handler follows the same shape: validate the raw code, normalize
//! optional hints, build a snippet, call the shared provider, and map the
//! returned value object onto a transfer object. Validation and provider
//! errors propagate unchanged.

mod explain;
mod refactor;

pub use explain::ExplainCodeHandler;
pub use generate_tests::GenerateTestsHandler;
pub use refactor::RefactorCodeHandler;
