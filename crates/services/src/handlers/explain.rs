use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use ai_providers::AiProvider;
use domain::{CodeValidator, DomainError};

use crate::commands::ExplainCodeCommand;
use crate::dispatch::Handler;
use crate::dto::ExplainResult;

/// Handler for explaining code snippets.
pub struct ExplainCodeHandler {
    provider: Arc<dyn AiProvider>,
    validator: CodeValidator,
}

impl ExplainCodeHandler {
    pub fn new(provider: Arc<dyn AiProvider>, validator: CodeValidator) -> Self {
        Self {
            provider,
            validator,
        }
    }
}

#[async_trait]
impl Handler<ExplainCodeCommand> for ExplainCodeHandler {
    async fn handle(&self, command: ExplainCodeCommand) -> Result<ExplainResult, DomainError> {
        let start = Instant::now();
        tracing::info!(
            provider = self.provider.provider_name(),
            "explaining code"
        );

        let snippet = self
            .validator
            .create_snippet(&command.code, command.language.as_deref())?;

        // Explain reports counts for the analyzed snippet, which is moved
        // into the provider call below.
        let line_count = snippet.line_count();
        let character_count = snippet.character_count();

        let explanation = self.provider.explain_code(snippet).await.map_err(|err| {
            tracing::error!(
                provider = self.provider.provider_name(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %err,
                "explanation failed"
            );
            err
        })?;

        tracing::info!(
            provider = %explanation.provider,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "explanation generated"
        );

        Ok(ExplainResult {
            explanation: explanation.explanation,
            line_count,
            character_count,
            provider: explanation.provider,
            placeholder: explanation.is_placeholder,
        })
    }
}
