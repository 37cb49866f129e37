// Application Layer - Command Dispatch and Capability Handlers
//
// This crate wires validated requests to AI provider calls:
// - commands: immutable request payloads, one per capability
// - dispatch: the type-keyed command bus
// - handlers: validate -> provider call -> result assembly, one per capability
// - dto: serializable transfer objects returned to the transport boundary

pub mod commands;
pub mod dispatch;
pub mod dto;
pub mod handlers;

pub use commands::{Command, ExplainCodeCommand, GenerateTestsCommand, RefactorCodeCommand};
pub use dispatch::{CommandDispatcher, DispatchError, Handler};
pub use dto::{ExplainResult, RefactorResult, TestScaffoldResult};
pub use handlers::{ExplainCodeHandler, GenerateTestsHandler, RefactorCodeHandler};
