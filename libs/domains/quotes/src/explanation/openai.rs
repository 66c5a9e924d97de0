use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ExplanationProvider;
use crate::embedding::DEFAULT_BASE_URL;
use crate::error::{QuoteError, QuoteResult};

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 150;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

fn user_prompt(quote_text: &str) -> String {
    format!("Explain this motivational quote in simple terms: \"{quote_text}\"")
}

/// Chat completion settings for quote explanations
#[derive(Debug, Clone)]
pub struct OpenAIChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl OpenAIChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl FromEnv for OpenAIChatConfig {
    /// - OPENAI_API_KEY: required
    /// - OPENAI_BASE_URL: defaults to the public API
    /// - CHAT_MODEL: defaults to `gpt-3.5-turbo`
    /// - EXPLANATION_MAX_TOKENS: defaults to 150
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            model: env_or_default("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            max_tokens: env_parse("EXPLANATION_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
        })
    }
}

/// Explains quotes through the OpenAI chat completions API
pub struct OpenAIChatProvider {
    client: Client,
    config: OpenAIChatConfig,
}

impl OpenAIChatProvider {
    pub fn new(config: OpenAIChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> QuoteResult<Self> {
        let config =
            OpenAIChatConfig::from_env().map_err(|e| QuoteError::Config(e.to_string()))?;
        Ok(Self::new(config))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if it has any.
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }
}

#[async_trait]
impl ExplanationProvider for OpenAIChatProvider {
    #[instrument(skip(self, quote_text), fields(model = %self.config.model))]
    async fn explain(&self, quote_text: &str) -> QuoteResult<String> {
        let prompt = user_prompt(quote_text);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QuoteError::Dependency(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.into_text()
            .ok_or_else(|| QuoteError::Dependency("No explanation returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    fn provider(server: &MockServer) -> OpenAIChatProvider {
        OpenAIChatProvider::new(OpenAIChatConfig::new("sk-test").with_base_url(server.uri()))
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_BASE_URL", None),
                ("CHAT_MODEL", None),
                ("EXPLANATION_MAX_TOKENS", None),
            ],
            || {
                let config = OpenAIChatConfig::from_env().unwrap();
                assert_eq!(config.model, "gpt-3.5-turbo");
                assert_eq!(config.max_tokens, 150);

                let provider = OpenAIChatProvider::new(config);
                assert_eq!(
                    provider.endpoint(),
                    "https://api.openai.com/v1/chat/completions"
                );
            },
        );
    }

    #[test]
    fn test_prompt_quotes_the_text() {
        assert_eq!(
            user_prompt("Dream big"),
            "Explain this motivational quote in simple terms: \"Dream big\""
        );
    }

    #[tokio::test]
    async fn test_explain_sends_chat_request_and_trims_reply() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/chat/completions"))
            .and(matchers::header("authorization", "Bearer sk-test"))
            .and(matchers::body_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "You are a helpful assistant." },
                    {
                        "role": "user",
                        "content": "Explain this motivational quote in simple terms: \"Dream big\""
                    }
                ],
                "max_tokens": 150
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "\n  Aim high.  \n" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let explanation = provider(&mock_server).explain("Dream big").await.unwrap();
        assert_eq!(explanation, "Aim high.");
    }

    #[tokio::test]
    async fn test_explain_error_status_is_dependency_error() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server).explain("Dream big").await.unwrap_err();
        match err {
            QuoteError::Dependency(msg) => {
                assert!(msg.contains("429"), "{msg}");
                assert!(msg.contains("Rate limit reached"), "{msg}");
            }
            other => panic!("expected dependency error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_explain_without_choices_is_dependency_error() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server).explain("Dream big").await.unwrap_err();
        assert!(matches!(err, QuoteError::Dependency(msg) if msg == "No explanation returned"));
    }
}
