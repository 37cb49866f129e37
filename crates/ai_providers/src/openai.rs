//! OpenAI-backed provider implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint over HTTPS
//! with bearer-token auth. One pooled client is reused across calls; every
//! call is bounded by the configured timeout, and retryable failures
//! (timeout, 5xx) are retried with exponential backoff up to `max_retries`
//! extra attempts.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use domain::{AiProviderError, CodeExplanation, CodeRefactor, CodeSnippet, TestScaffold};

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::{default_test_framework, parser, prompts, AiProvider};

const PROVIDER_NAME: &str = "openai";

const TEMPERATURE: f32 = 0.3;
const MAX_COMPLETION_TOKENS: u32 = 2000;

const INITIAL_BACKOFF_MS: u64 = 100;
const BACKOFF_MULTIPLIER: u64 = 2;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra attempts for retryable failures. Zero disables retry.
    pub max_retries: u32,
}

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Run one completion round-trip, retrying retryable failures.
    async fn complete(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<String, AiProviderError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
            stream: false,
        };

        let start = Instant::now();
        let mut attempt = 0u32;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            attempt += 1;

            match self.send_request(&request).await {
                Ok(content) => {
                    if attempt > 1 {
                        tracing::info!(
                            provider = PROVIDER_NAME,
                            attempt,
                            duration_ms = start.elapsed().as_millis() as u64,
                            "completion succeeded after retry"
                        );
                    }
                    return Ok(content);
                }
                Err(err) if err.is_retryable() && attempt <= self.config.max_retries => {
                    tracing::warn!(
                        provider = PROVIDER_NAME,
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %err,
                        backoff_ms,
                        "completion request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= BACKOFF_MULTIPLIER;
                }
                Err(err) => {
                    tracing::error!(
                        provider = PROVIDER_NAME,
                        attempt,
                        duration_ms = start.elapsed().as_millis() as u64,
                        error = %err,
                        "completion request failed permanently"
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn send_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, AiProviderError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(request)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|err| format!("failed to read error response body: {err}"));
            tracing::error!(
                provider = PROVIDER_NAME,
                status = status.as_u16(),
                body = %body,
                "provider returned error status"
            );
            return Err(map_status(status.as_u16()));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AiProviderError::Unexpected(format!("failed to parse response: {err}")))?;

        let content = completion.first_content().map(str::trim).unwrap_or("");
        if content.is_empty() {
            return Err(AiProviderError::EmptyResponse);
        }

        Ok(content.to_string())
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AiProviderError {
        if err.is_timeout() {
            AiProviderError::Timeout {
                seconds: self.config.timeout_secs,
            }
        } else {
            AiProviderError::Unexpected(format!("request failed: {err}"))
        }
    }
}

/// Map a non-2xx status to the domain taxonomy: 429 is a quota condition,
/// everything else keeps its status code for the caller to classify.
fn map_status(status: u16) -> AiProviderError {
    match status {
        429 => AiProviderError::Quota,
        status => AiProviderError::Http { status },
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn explain_code(&self, snippet: CodeSnippet) -> Result<CodeExplanation, AiProviderError> {
        tracing::info!(
            provider = PROVIDER_NAME,
            characters = snippet.character_count(),
            "requesting explanation"
        );

        let content = self
            .complete(
                prompts::explain_system_prompt().to_string(),
                prompts::explain_user_prompt(&snippet),
            )
            .await?;

        Ok(CodeExplanation::new(snippet, content, PROVIDER_NAME, false)?)
    }

    async fn refactor_code(
        &self,
        snippet: CodeSnippet,
        goal: Option<&str>,
    ) -> Result<CodeRefactor, AiProviderError> {
        tracing::info!(
            provider = PROVIDER_NAME,
            characters = snippet.character_count(),
            goal = goal.unwrap_or(""),
            "requesting refactor"
        );

        let content = self
            .complete(
                prompts::refactor_system_prompt().to_string(),
                prompts::refactor_user_prompt(&snippet, goal),
            )
            .await?;

        let (refactored_code, code_is_placeholder) = parser::extract_code(&content);
        let improvements = parser::extract_improvements(&content);

        Ok(CodeRefactor::new(
            snippet,
            refactored_code,
            content,
            improvements,
            PROVIDER_NAME,
            code_is_placeholder,
        )?)
    }

    async fn generate_tests(
        &self,
        snippet: CodeSnippet,
        test_framework: Option<&str>,
    ) -> Result<TestScaffold, AiProviderError> {
        tracing::info!(
            provider = PROVIDER_NAME,
            characters = snippet.character_count(),
            framework = test_framework.unwrap_or(""),
            "requesting test scaffold"
        );

        let content = self
            .complete(
                prompts::tests_system_prompt().to_string(),
                prompts::tests_user_prompt(&snippet, test_framework),
            )
            .await?;

        let framework = test_framework
            .map(str::to_string)
            .unwrap_or_else(|| default_test_framework(snippet.language()).to_string());

        let (test_code, code_is_placeholder) = parser::extract_code(&content);
        let (test_cases, cases_are_placeholder) = parser::extract_test_cases(&test_code);
        let setup_instructions = parser::extract_setup_instructions(&content);

        Ok(TestScaffold::new(
            snippet,
            test_code,
            framework,
            test_cases,
            setup_instructions,
            PROVIDER_NAME,
            code_is_placeholder || cases_are_placeholder,
        )?)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn provider_for(server: &MockServer, max_retries: u32, timeout_secs: u64) -> OpenAiProvider {
        OpenAiProvider::new(OpenAiConfig {
            api_key: "sk-test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: server.base_url(),
            timeout_secs,
            max_retries,
        })
    }

    fn snippet(content: &str) -> CodeSnippet {
        CodeSnippet::new(content, Some("python".to_string())).unwrap()
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    // ==================== Status Mapping Tests ====================

    #[test]
    fn test_map_status() {
        assert_eq!(map_status(429), AiProviderError::Quota);
        assert_eq!(map_status(503), AiProviderError::Http { status: 503 });
        assert_eq!(map_status(500), AiProviderError::Http { status: 500 });
        assert_eq!(map_status(401), AiProviderError::Http { status: 401 });
    }

    // ==================== Request Construction Tests ====================

    #[tokio::test]
    async fn test_explain_sends_bearer_auth_and_fixed_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test-key")
                .json_body_partial(
                    r#"{"model": "gpt-4o-mini", "temperature": 0.3, "max_tokens": 2000, "stream": false}"#,
                );
            then.status(200)
                .json_body(completion_body("This code adds two numbers."));
        });

        let provider = provider_for(&server, 0, 5);
        let explanation = provider.explain_code(snippet("def add(a, b): return a + b")).await.unwrap();

        mock.assert();
        assert_eq!(explanation.explanation, "This code adds two numbers.");
        assert_eq!(explanation.provider, "openai");
        assert!(!explanation.is_placeholder);
    }

    // ==================== Error Mapping Tests ====================

    #[tokio::test]
    async fn test_quota_status_not_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limited");
        });

        let provider = provider_for(&server, 3, 5);
        let err = provider.explain_code(snippet("x = 1")).await.unwrap_err();

        assert_eq!(err, AiProviderError::Quota);
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_server_error_retried_then_surfaced_with_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("upstream overloaded");
        });

        let provider = provider_for(&server, 2, 5);
        let err = provider.explain_code(snippet("x = 1")).await.unwrap_err();

        assert_eq!(err, AiProviderError::Http { status: 503 });
        // initial attempt + two retries
        mock.assert_hits(3);
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(400).body("bad request");
        });

        let provider = provider_for(&server, 3, 5);
        let err = provider.explain_code(snippet("x = 1")).await.unwrap_err();

        assert_eq!(err, AiProviderError::Http { status: 400 });
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_empty_content_is_an_empty_response_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body("   "));
        });

        let provider = provider_for(&server, 0, 5);
        let err = provider.explain_code(snippet("x = 1")).await.unwrap_err();

        assert_eq!(err, AiProviderError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_missing_choices_is_an_empty_response_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        });

        let provider = provider_for(&server, 0, 5);
        let err = provider.explain_code(snippet("x = 1")).await.unwrap_err();

        assert_eq!(err, AiProviderError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(std::time::Duration::from_secs(3))
                .json_body(completion_body("too late"));
        });

        let provider = provider_for(&server, 0, 1);
        let err = provider.explain_code(snippet("x = 1")).await.unwrap_err();

        assert_eq!(err, AiProviderError::Timeout { seconds: 1 });
    }

    // ==================== Parsing Integration Tests ====================

    #[tokio::test]
    async fn test_refactor_extracts_code_and_improvements() {
        let response_text = "Analysis first.\n\n```python\ndef add(a, b):\n    return a + b\n```\n\n- improvement: replaces duplicated arithmetic with a helper\n";
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body(response_text));
        });

        let provider = provider_for(&server, 0, 5);
        let refactor = provider
            .refactor_code(snippet("a + b; a + b"), Some("deduplicate"))
            .await
            .unwrap();

        assert_eq!(refactor.refactored_code, "def add(a, b):\n    return a + b");
        assert_eq!(
            refactor.improvements,
            vec!["replaces duplicated arithmetic with a helper"]
        );
        assert_eq!(refactor.explanation, response_text.trim());
        assert!(!refactor.is_placeholder);
    }

    #[tokio::test]
    async fn test_generate_tests_parses_names_and_setup() {
        let response_text = "```python\ndef test_addition():\n    assert add(1, 2) == 3\n\ndef test_negative_numbers():\n    assert add(-1, -2) == -3\n```\nRun `pytest` after:\npip install pytest";
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body(response_text));
        });

        let provider = provider_for(&server, 0, 5);
        let scaffold = provider
            .generate_tests(snippet("def add(a, b): return a + b"), None)
            .await
            .unwrap();

        assert_eq!(
            scaffold.test_cases,
            vec!["test_addition", "test_negative_numbers"]
        );
        // framework defaults from the snippet's language hint
        assert_eq!(scaffold.test_framework, "pytest");
        assert_eq!(scaffold.setup_instructions.as_deref(), Some("pip install pytest"));
        assert!(!scaffold.is_placeholder);
    }
}
