//! Gemini API key client for the streaming chat endpoint.

use anyhow::Result;
use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::{Value, json};

use super::sse::GeminiSseParser;
use crate::providers::shared::{USER_AGENT, resolve_api_key, resolve_base_url};
use crate::providers::{ConversationChannel, ProviderError, ProviderErrorKind, ProviderStream};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini channel configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Bounded maximum reply length.
    pub max_output_tokens: u32,
    /// Fixed persona instruction sent with every turn.
    pub system_instruction: String,
}

impl GeminiConfig {
    /// Creates a new config from environment.
    ///
    /// Authentication: `GEMINI_API_KEY` environment variable (no key is
    /// stored in the config file). `GEMINI_BASE_URL` overrides the
    /// endpoint, then the config value, then the public default.
    pub fn from_env(
        model: String,
        max_output_tokens: u32,
        config_base_url: Option<&str>,
        system_instruction: String,
    ) -> Result<Self> {
        let api_key = resolve_api_key(None, "GEMINI_API_KEY")?;
        let base_url = resolve_base_url(
            config_base_url,
            "GEMINI_BASE_URL",
            DEFAULT_BASE_URL,
            "Gemini",
        )?;

        Ok(Self {
            api_key,
            base_url,
            model,
            max_output_tokens,
            system_instruction,
        })
    }
}

/// One entry of the cumulative conversation context, in Gemini wire form.
#[derive(Debug, Clone, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: "user",
            parts: vec![Part { text: text.to_string() }],
        }
    }

    fn model(text: &str) -> Self {
        Self {
            role: "model",
            parts: vec![Part { text: text.to_string() }],
        }
    }
}

/// Gemini conversation channel.
///
/// Holds the conversation context across turns; the handle is created
/// lazily by the session on first use and reused for its whole lifetime.
pub struct GeminiChannel {
    config: GeminiConfig,
    http: reqwest::Client,
    history: Vec<Content>,
}

impl GeminiChannel {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            history: Vec::new(),
        }
    }

    fn build_request(&self, text: &str) -> Value {
        let mut contents: Vec<Value> = self
            .history
            .iter()
            .map(|c| serde_json::to_value(c).unwrap_or(Value::Null))
            .collect();
        contents.push(
            serde_json::to_value(Content::user(text)).unwrap_or(Value::Null),
        );

        json!({
            "contents": contents,
            "systemInstruction": {
                "parts": [{ "text": self.config.system_instruction }]
            },
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens
            }
        })
    }

    async fn send(&self, text: &str) -> Result<ProviderStream> {
        let request = self.build_request(text);
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url, self.config.model
        );

        tracing::debug!(model = %self.config.model, "sending turn to Gemini");

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProviderError::http_status(status.as_u16(), &error_body).into());
        }

        Ok(GeminiSseParser::new(response.bytes_stream()).boxed())
    }
}

impl ConversationChannel for GeminiChannel {
    fn send_stream(&mut self, text: &str) -> BoxFuture<'_, Result<ProviderStream>> {
        let text = text.to_string();
        Box::pin(async move { self.send(&text).await })
    }

    fn record_turn(&mut self, user: &str, reply: &str) {
        self.history.push(Content::user(user));
        self.history.push(Content::model(reply));
    }
}

fn classify_reqwest_error(e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout(format!("Request timed out: {e}"))
    } else {
        ProviderError::new(ProviderErrorKind::ApiError, format!("Request failed: {e}"))
    }
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("text/event-stream"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}
