//! LLM backend trait and concrete implementations.
//!
//! Backends:
//!   OpenAiBackend           — OpenAI chat completions API (gpt-4o, gpt-4o-mini, …)
//!   OpenAiCompatibleBackend — any OpenAI-compatible endpoint (Azure proxy,
//!                             vLLM, LMStudio, OpenRouter, …)
//!   UnavailableBackend      — placeholder used when no API key is configured
//!
//! Every backend supports a one-shot completion (optionally constrained by a
//! JSON schema) and a streamed completion yielding text deltas in order.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_core::Stream;
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sse::{parse_openai_delta, SseLineDecoder};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.1;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
    #[error("Model returned unusable output: {0}")]
    InvalidOutput(String),
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Named JSON schema the completion must conform to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub name: String,
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self { name: name.into(), schema }
    }

    fn to_openai(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name":   self.name,
                "schema": self.schema,
                "strict": false,
            }
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Ordered text deltas of a streamed completion.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    /// Resolves once the upstream accepted the request; errors after that
    /// point arrive as items of the stream.
    async fn stream(&self, req: LlmRequest) -> Result<TextStream, LlmError>;
    fn model_id(&self) -> &str;
    fn backend_name(&self) -> &'static str;
}

// ── Helpers: OpenAI-style wire format ─────────────────────────────────────────

fn chat_body(req: &LlmRequest, model: &str, stream: bool) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model":       req.model.as_deref().unwrap_or(model),
        "messages":    req.messages,
        "max_tokens":  req.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        "temperature": req.temperature.unwrap_or(DEFAULT_TEMPERATURE),
    });
    if let Some(format) = &req.response_format {
        body["response_format"] = format.to_openai();
    }
    if stream {
        body["stream"] = serde_json::Value::Bool(true);
    }
    body
}

fn parse_openai_response(json: &serde_json::Value, fallback_model: &str) -> LlmResponse {
    LlmResponse {
        content: json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        model: json["model"]
            .as_str()
            .unwrap_or(fallback_model)
            .to_string(),
        prompt_tokens:     json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    }
}

/// Turn a 4xx/5xx into `LlmError`, pulling the message out of the usual
/// `{"error": {"message": …}}` envelope when there is one.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = resp.status().as_u16();
    if status < 400 {
        return Ok(resp);
    }
    if status == 429 {
        return Err(LlmError::RateLimitExceeded);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| {
            body["error"]["message"]
                .as_str()
                .or_else(|| body["message"].as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| if text.is_empty() { "unknown API error".to_string() } else { text });
    Err(LlmError::ApiError { status, message })
}

/// Decode an OpenAI `text/event-stream` body into text deltas.
fn delta_stream(resp: reqwest::Response) -> TextStream {
    let chunks = Box::pin(resp.bytes_stream().map(|chunk| chunk.map_err(LlmError::Http)));
    Box::pin(decode_deltas(chunks))
}

/// Text deltas from raw body chunks. A final line left without its newline
/// when the body ends is still decoded.
fn decode_deltas<S, B>(chunks: S) -> impl Stream<Item = Result<String, LlmError>> + Send + 'static
where
    S: Stream<Item = Result<B, LlmError>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    futures_util::stream::unfold(Some((chunks, SseLineDecoder::default())), |state| async move {
        let Some((mut chunks, mut decoder)) = state else {
            return None;
        };
        let batch: Vec<Result<String, LlmError>> = match chunks.next().await {
            Some(Ok(bytes)) => decoder
                .push(bytes.as_ref())
                .iter()
                .filter_map(|line| parse_openai_delta(line))
                .map(Ok)
                .collect(),
            Some(Err(e)) => vec![Err(e)],
            None => {
                let tail = decoder.finish().and_then(|line| parse_openai_delta(&line));
                return Some((tail.map(Ok).into_iter().collect(), None));
            }
        };
        Some((batch, Some((chunks, decoder))))
    })
    .flat_map(futures_util::stream::iter)
}

/// Shared transport for both OpenAI-flavoured backends.
struct ChatEndpoint {
    url: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl ChatEndpoint {
    fn new(base_url: &str, api_key: Option<SecretString>) -> Self {
        Self {
            url: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    async fn post(&self, body: &serde_json::Value) -> Result<reqwest::Response, LlmError> {
        let mut builder = self.client.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }
        let resp = builder.send().await?;
        ensure_success(resp).await
    }

    async fn complete(&self, req: &LlmRequest, model: &str) -> Result<LlmResponse, LlmError> {
        let resp = self.post(&chat_body(req, model, false)).await?;
        let json: serde_json::Value = resp.json().await?;
        Ok(parse_openai_response(&json, model))
    }

    async fn stream(&self, req: &LlmRequest, model: &str) -> Result<TextStream, LlmError> {
        let resp = self.post(&chat_body(req, model, true)).await?;
        Ok(delta_stream(resp))
    }
}

// ── 1. OpenAI ─────────────────────────────────────────────────────────────────

pub struct OpenAiBackend {
    pub model: String,
    endpoint: ChatEndpoint,
}

impl OpenAiBackend {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            endpoint: ChatEndpoint::new(OPENAI_BASE_URL, Some(api_key)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.endpoint = self.endpoint.with_timeout(timeout)?;
        Ok(self)
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.endpoint.complete(&req, &self.model).await
    }

    async fn stream(&self, req: LlmRequest) -> Result<TextStream, LlmError> {
        self.endpoint.stream(&req, &self.model).await
    }

    fn model_id(&self) -> &str { &self.model }
    fn backend_name(&self) -> &'static str { "openai" }
}

// ── 2. OpenAI-Compatible ──────────────────────────────────────────────────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    endpoint: ChatEndpoint,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Self {
        let base_url = base_url.into();
        let endpoint = ChatEndpoint::new(&base_url, api_key);
        Self { base_url, model: model.into(), endpoint }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.endpoint = self.endpoint.with_timeout(timeout)?;
        Ok(self)
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.endpoint.complete(&req, &self.model).await
    }

    async fn stream(&self, req: LlmRequest) -> Result<TextStream, LlmError> {
        self.endpoint.stream(&req, &self.model).await
    }

    fn model_id(&self) -> &str { &self.model }
    fn backend_name(&self) -> &'static str { "openai_compatible" }
}

// ── 3. Unavailable ────────────────────────────────────────────────────────────

/// Stands in when the server starts without credentials; every call fails
/// with `LlmError::Unavailable` so the AI endpoints answer 500.
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl LlmBackend for UnavailableBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        Err(LlmError::Unavailable(self.reason.clone()))
    }

    async fn stream(&self, _req: LlmRequest) -> Result<TextStream, LlmError> {
        Err(LlmError::Unavailable(self.reason.clone()))
    }

    fn model_id(&self) -> &str { "none" }
    fn backend_name(&self) -> &'static str { "unavailable" }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_backend_identity() {
        let b = OpenAiBackend::new(SecretString::from("sk-test".to_string()), "gpt-4o");
        assert_eq!(b.model_id(), "gpt-4o");
        assert_eq!(b.backend_name(), "openai");
        assert_eq!(b.endpoint.url, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_openai_compatible_with_no_key() {
        let b = OpenAiCompatibleBackend::new("http://localhost:1234/", "local-model", None);
        assert_eq!(b.model_id(), "local-model");
        assert_eq!(b.endpoint.url, "http://localhost:1234/v1/chat/completions");
        assert!(b.endpoint.api_key.is_none());
    }

    #[tokio::test]
    async fn test_deltas_include_unterminated_last_line() {
        let chunks = futures_util::stream::iter(vec![
            Ok::<_, LlmError>(b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n".to_vec()),
            Ok(b"data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}".to_vec()),
        ]);
        let deltas: Vec<String> = decode_deltas(chunks).map(|d| d.unwrap()).collect().await;
        assert_eq!(deltas, vec!["Hel", "lo"]);
    }

    #[tokio::test]
    async fn test_deltas_forward_transport_errors() {
        let chunks = futures_util::stream::iter(vec![
            Ok(b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n".to_vec()),
            Err(LlmError::Unavailable("reset".into())),
        ]);
        let items: Vec<Result<String, LlmError>> = decode_deltas(chunks).collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().ok(), Some("a"));
        assert!(matches!(items[1], Err(LlmError::Unavailable(_))));
    }

    #[test]
    fn test_chat_body_defaults_and_overrides() {
        let req = LlmRequest {
            messages: vec![Message::system("sys"), Message::user("hi")],
            temperature: Some(0.3),
            max_tokens: Some(1000),
            ..Default::default()
        };
        let body = chat_body(&req, "gpt-4o", true);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!(body.get("response_format").is_none());

        let plain = chat_body(&LlmRequest::default(), "gpt-4o", false);
        assert_eq!(plain["max_tokens"], DEFAULT_MAX_TOKENS);
        assert!(plain.get("stream").is_none());
    }

    #[test]
    fn test_chat_body_carries_json_schema() {
        let req = LlmRequest {
            response_format: Some(ResponseFormat::json_schema(
                "nda_anatomy",
                serde_json::json!({"type": "object"}),
            )),
            ..Default::default()
        };
        let body = chat_body(&req, "gpt-4o", false);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "nda_anatomy");
    }

    #[test]
    fn test_parse_openai_response() {
        let json = serde_json::json!({
            "model": "gpt-4o-2024-08-06",
            "choices": [{"message": {"role": "assistant", "content": "{}"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        });
        let resp = parse_openai_response(&json, "gpt-4o");
        assert_eq!(resp.content, "{}");
        assert_eq!(resp.model, "gpt-4o-2024-08-06");
        assert_eq!(resp.prompt_tokens, 12);
        assert_eq!(resp.completion_tokens, 3);
    }

    #[tokio::test]
    async fn test_unavailable_backend_fails_both_calls() {
        let b = UnavailableBackend::new("no API key configured");
        assert!(matches!(b.complete(LlmRequest::default()).await, Err(LlmError::Unavailable(_))));
        assert!(matches!(b.stream(LlmRequest::default()).await, Err(LlmError::Unavailable(_))));
    }
}
