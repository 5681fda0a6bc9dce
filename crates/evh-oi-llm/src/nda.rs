//! The two model calls behind the document chat: structured analysis of an
//! uploaded NDA, and the streamed question/answer turn over that analysis.

use std::time::Instant;

use evh_oi_common::NdaAnalysis;
use tracing::{debug, info};

use crate::backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message, ResponseFormat, TextStream};
use crate::prompts::{analysis_prompt, chat_system_prompt, nda_anatomy_schema, ANALYSIS_SCHEMA_NAME};

/// Sampling settings for the chat turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self { temperature: 0.3, max_output_tokens: 1000 }
    }
}

pub fn analysis_request(document_text: &str) -> LlmRequest {
    LlmRequest {
        messages: vec![Message::user(analysis_prompt(document_text))],
        response_format: Some(ResponseFormat::json_schema(ANALYSIS_SCHEMA_NAME, nda_anatomy_schema())),
        ..Default::default()
    }
}

pub fn chat_request(analysis: &NdaAnalysis, question: &str, settings: ChatSettings) -> LlmRequest {
    LlmRequest {
        messages: vec![
            Message::system(chat_system_prompt(analysis)),
            Message::user(question),
        ],
        temperature: Some(settings.temperature),
        max_tokens: Some(settings.max_output_tokens),
        ..Default::default()
    }
}

/// Parse model output into an analysis. Tolerates a Markdown code fence
/// around the JSON, which some compatible endpoints add.
pub fn parse_analysis(content: &str) -> Result<NdaAnalysis, LlmError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();
    if body.is_empty() {
        return Err(LlmError::InvalidOutput("empty analysis".to_string()));
    }
    Ok(serde_json::from_str(body)?)
}

/// One schema-constrained completion over the document text.
pub async fn analyze_document(
    backend: &dyn LlmBackend,
    document_text: &str,
) -> Result<(NdaAnalysis, LlmResponse), LlmError> {
    let started = Instant::now();
    let response = backend.complete(analysis_request(document_text)).await?;
    let analysis = parse_analysis(&response.content)?;
    info!(
        model = %response.model,
        backend = backend.backend_name(),
        latency_ms = started.elapsed().as_millis() as u64,
        risk = %analysis.risk_level(),
        "NDA analysis complete"
    );
    Ok((analysis, response))
}

/// Open the streamed answer to one chat question.
pub async fn stream_chat(
    backend: &dyn LlmBackend,
    analysis: &NdaAnalysis,
    question: &str,
    settings: ChatSettings,
) -> Result<TextStream, LlmError> {
    debug!(question_chars = question.len(), "Opening chat stream");
    backend.stream(chat_request(analysis, question, settings)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Role;
    use async_trait::async_trait;
    use futures_util::StreamExt;

    struct Scripted(&'static str);

    #[async_trait]
    impl LlmBackend for Scripted {
        async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
            assert!(req.response_format.is_some());
            Ok(LlmResponse {
                content: self.0.to_string(),
                model: "scripted".to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
            })
        }

        async fn stream(&self, req: LlmRequest) -> Result<TextStream, LlmError> {
            assert_eq!(req.temperature, Some(0.3));
            let parts: Vec<Result<String, LlmError>> =
                self.0.split(' ').map(|w| Ok(format!("{w} "))).collect();
            Ok(Box::pin(futures_util::stream::iter(parts)))
        }

        fn model_id(&self) -> &str { "scripted" }
        fn backend_name(&self) -> &'static str { "scripted" }
    }

    #[test]
    fn test_chat_request_shape() {
        let req = chat_request(&NdaAnalysis::default(), "What is the term?", ChatSettings::default());
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert_eq!(req.messages[1], Message::user("What is the term?"));
        assert_eq!(req.max_tokens, Some(1000));
    }

    #[test]
    fn test_parse_analysis_accepts_fenced_json() {
        let a = parse_analysis("```json\n{\"term\":\"2 years\"}\n```").unwrap();
        assert_eq!(a.term.as_deref(), Some("2 years"));
        assert!(matches!(parse_analysis("  "), Err(LlmError::InvalidOutput(_))));
        assert!(matches!(parse_analysis("not json"), Err(LlmError::Serde(_))));
    }

    #[tokio::test]
    async fn test_analyze_document_parses_backend_output() {
        let backend = Scripted(r#"{"party_receiving":"Beta LLC","governing_law":"Delaware"}"#);
        let (analysis, resp) = analyze_document(&backend, "doc").await.unwrap();
        assert_eq!(analysis.party_receiving.as_deref(), Some("Beta LLC"));
        assert_eq!(analysis.governing_law_or_default(), "Delaware");
        assert_eq!(resp.model, "scripted");
    }

    #[tokio::test]
    async fn test_stream_chat_yields_fragments_in_order() {
        let backend = Scripted("two year term");
        let stream = stream_chat(&backend, &NdaAnalysis::default(), "q", ChatSettings::default())
            .await
            .unwrap();
        let parts: Vec<String> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(parts.concat(), "two year term ");
    }
}
