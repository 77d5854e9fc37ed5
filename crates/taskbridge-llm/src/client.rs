//! Model provider clients.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ModelError;

/// One model call: a fixed system instruction and a per-call user message.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub instructions: String,
    pub input: String,
}

/// A remote language model that returns its raw response envelope.
///
/// Implementations perform exactly one attempt per call.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn respond(&self, request: ModelRequest) -> Result<Value, ModelError>;
}

/// Mock model client for tests/examples.
///
/// Returns the same reply on every call and counts how often it was called.
pub struct MockModelClient {
    reply: Result<Value, ModelError>,
    calls: AtomicUsize,
}

impl MockModelClient {
    /// Reply with the given envelope.
    pub fn replying(envelope: Value) -> Self {
        Self {
            reply: Ok(envelope),
            calls: AtomicUsize::new(0),
        }
    }

    /// Reply with a text-output envelope wrapping `text`.
    pub fn replying_text(text: impl Into<String>) -> Self {
        Self::replying(serde_json::json!({
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": text.into()}]
            }]
        }))
    }

    /// Fail every call with `error`.
    pub fn failing(error: ModelError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn respond(&self, _request: ModelRequest) -> Result<Value, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// HTTP client config (OpenAI Responses API).
#[derive(Debug, Clone)]
pub struct HttpModelConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,

    /// Bearer credential.
    pub api_key: String,

    /// Model name.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,
}

impl HttpModelConfig {
    /// Config with the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: api_key.into(),
            model: "gpt-4.1-mini".to_string(),
            temperature: 0.2,
        }
    }

    /// Builder method to set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder method to set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Model client speaking the OpenAI Responses API over HTTP.
pub struct HttpModelClient {
    client: reqwest::Client,
    config: HttpModelConfig,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: Vec<InputMessage<'a>>,
    temperature: f32,
}

impl HttpModelClient {
    pub fn new(config: HttpModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ModelError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.config.base_url.trim_end_matches('/'))
    }

    fn headers(&self) -> Result<HeaderMap, ModelError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", self.config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|e| ModelError::Config(e.to_string()))?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn respond(&self, request: ModelRequest) -> Result<Value, ModelError> {
        let body = ResponsesRequest {
            model: &self.config.model,
            instructions: &request.instructions,
            input: vec![InputMessage {
                role: "user",
                content: &request.input,
            }],
            temperature: self.config.temperature,
        };

        let url = self.endpoint();
        debug!(url = %url, model = %self.config.model, "Calling model provider");

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ModelError::Decode(format!("{e}: {text}")))
    }
}
