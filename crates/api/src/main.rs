use std::sync::Arc;

use ai_providers::{AiProvider, MockProvider, OpenAiConfig, OpenAiProvider};
use api::{build_router, AppState};
use config::{AiConfig, AppConfig, LoggingConfig};
use domain::CodeValidator;
use services::{
    CommandDispatcher, ExplainCodeCommand, ExplainCodeHandler, GenerateTestsCommand,
    GenerateTestsHandler, RefactorCodeCommand, RefactorCodeHandler,
};

#[tokio::main]
async fn main() {
    // Load configuration first to get logging settings
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        eprintln!("Application cannot start without a valid configuration.");
        std::process::exit(1);
    });

    init_tracing(&config.logging);

    let provider = build_provider(&config.ai).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to construct AI provider");
        std::process::exit(1);
    });

    let dispatcher: AppState = Arc::new(build_dispatcher(provider, &config));
    tracing::info!(
        commands = ?dispatcher.registered_commands(),
        "command dispatcher ready"
    );

    let app = build_router(dispatcher, &config.cors);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(address = %bind_address, error = %e, "Failed to bind server address");
            std::process::exit(1);
        });

    tracing::info!(address = %bind_address, "server listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

/// Select and construct the AI provider from configuration.
fn build_provider(config: &AiConfig) -> Result<Arc<dyn AiProvider>, String> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or("OpenAI API key is required when ai.provider is 'openai'")?;

            Ok(Arc::new(OpenAiProvider::new(OpenAiConfig {
                api_key,
                model: config.model.clone(),
                base_url: config.base_url.clone(),
                timeout_secs: config.timeout_secs,
                max_retries: config.max_retries,
            })))
        }
        _ => Ok(Arc::new(MockProvider::new())),
    }
}

/// Register one handler per capability, all sharing the same provider.
fn build_dispatcher(provider: Arc<dyn AiProvider>, config: &AppConfig) -> CommandDispatcher {
    let validator = CodeValidator::new(config.limits.max_code_length);

    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register::<ExplainCodeCommand>(Arc::new(ExplainCodeHandler::new(
        provider.clone(),
        validator,
    )));
    dispatcher.register::<RefactorCodeCommand>(Arc::new(RefactorCodeHandler::new(
        provider.clone(),
        validator,
    )));
    dispatcher.register::<GenerateTestsCommand>(Arc::new(GenerateTestsHandler::new(
        provider,
        validator,
    )));

    dispatcher
}

fn init_tracing(logging_config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging_config.level.clone()));

    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}
