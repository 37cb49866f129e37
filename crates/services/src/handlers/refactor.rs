use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use ai_providers::AiProvider;
use domain::validation::normalize_text;
use domain::{CodeValidator, DomainError};

use crate::commands::RefactorCodeCommand;
use crate::dispatch::Handler;
use crate::dto::RefactorResult;

/// Handler for refactoring code snippets.
pub struct RefactorCodeHandler {
    provider: Arc<dyn AiProvider>,
    validator: CodeValidator,
}

impl RefactorCodeHandler {
    pub fn new(provider: Arc<dyn AiProvider>, validator: CodeValidator) -> Self {
        Self {
            provider,
            validator,
        }
    }
}

#[async_trait]
impl Handler<RefactorCodeCommand> for RefactorCodeHandler {
    async fn handle(&self, command: RefactorCodeCommand) -> Result<RefactorResult, DomainError> {
        let start = Instant::now();
        tracing::info!(
            provider = self.provider.provider_name(),
            "refactoring code"
        );

        let snippet = self
            .validator
            .create_snippet(&command.code, command.language.as_deref())?;
        let goal = normalize_text(command.goal.as_deref());

        let refactor = self
            .provider
            .refactor_code(snippet, goal.as_deref())
            .await
            .map_err(|err| {
                tracing::error!(
                    provider = self.provider.provider_name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %err,
                    "refactor failed"
                );
                err
            })?;

        tracing::info!(
            provider = %refactor.provider,
            elapsed_ms = start.elapsed().as_millis() as u64,
            improvements = refactor.improvements.len(),
            "refactor generated"
        );

        // Counts describe the generated code, not the input snippet.
        let line_count = refactor.line_count();
        let character_count = refactor.character_count();

        Ok(RefactorResult {
            refactored_code: refactor.refactored_code,
            explanation: refactor.explanation,
            improvements: refactor.improvements,
            line_count,
            character_count,
            provider: refactor.provider,
            placeholder: refactor.is_placeholder,
        })
    }
}
