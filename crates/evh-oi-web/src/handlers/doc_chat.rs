//! Single-document chat: upload an NDA, get a structured analysis, then ask
//! questions answered by a streamed completion.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use evh_oi_common::rules::search_rules;
use evh_oi_common::{NdaAnalysis, Priority};
use evh_oi_llm::audit::{LlmAuditEntry, LlmOperation};
use evh_oi_llm::{nda, prompts};

use crate::config::AnalysisConfig;
use crate::error::ApiError;
use crate::handlers::compliance::render_rules;
use crate::handlers::layout::{page_header, render_page};
use crate::pdf;
use crate::sse::relay_chat;
use crate::state::SharedState;

const MISSING_FILE: &str = "Missing file data or name";
const UPLOAD_TOO_LARGE: &str = "File too large";
const ANALYSIS_FAILED: &str = "Failed to analyze document";
const MISSING_CHAT_INPUT: &str = "Missing message or analysis data";
const CHAT_FAILED: &str = "Chat processing failed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub file_data: Option<String>,
    pub file_name: Option<String>,
    /// Always `nda_anatomy` from the page; accepted and ignored.
    pub schema: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LabelledValue {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: NdaAnalysis,
    pub file_name: String,
    pub timestamp: String,
    /// First assistant message for the chat panel.
    pub intro_message: String,
    pub risk_level: Priority,
    pub summary: Vec<LabelledValue>,
    pub sections: Vec<LabelledValue>,
}

impl AnalyzeResponse {
    fn new(analysis: NdaAnalysis, file_name: String) -> Self {
        let summary = analysis
            .summary()
            .into_iter()
            .map(|(label, value)| LabelledValue { label, value })
            .collect();
        let sections = analysis
            .sections()
            .into_iter()
            .map(|(label, value)| LabelledValue { label, value: value.to_string() })
            .collect();
        Self {
            intro_message: analysis.intro_message(&file_name),
            risk_level: analysis.risk_level(),
            summary,
            sections,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            analysis,
            file_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub analysis: Option<NdaAnalysis>,
    /// Always `nda_analysis` from the page; accepted and ignored.
    pub context: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DocChatFilter {
    pub rules: Option<String>,
}

// === API Endpoints ===

/// POST /api/analyze-document
pub async fn analyze_document(
    State(state): State<SharedState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(error = %rejection, "Rejected oversized document upload");
            return Err(ApiError::PayloadTooLarge(UPLOAD_TOO_LARGE));
        }
        Err(_) => return Err(ApiError::BadRequest(MISSING_FILE.to_string())),
    };
    let (Some(file_data), Some(file_name)) = (
        req.file_data.filter(|s| !s.is_empty()),
        req.file_name.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(MISSING_FILE.to_string()));
    };

    let started = Instant::now();
    let document = document_text(&state.config.analysis, file_data, &file_name).await;

    match nda::analyze_document(state.llm.as_ref(), &document).await {
        Ok((analysis, response)) => {
            state
                .audit
                .record(LlmAuditEntry::new(
                    LlmOperation::AnalyzeDocument,
                    response.model.clone(),
                    state.llm.backend_name().to_string(),
                    response.prompt_tokens,
                    response.completion_tokens,
                    &response.content,
                    started.elapsed().as_millis() as u64,
                    true,
                ))
                .await;
            Ok(Json(AnalyzeResponse::new(analysis, file_name)))
        }
        Err(e) => {
            tracing::error!(error = %e, file = %file_name, "Document analysis failed");
            state
                .audit
                .record(LlmAuditEntry::new(
                    LlmOperation::AnalyzeDocument,
                    state.llm.model_id().to_string(),
                    state.llm.backend_name().to_string(),
                    0,
                    0,
                    "",
                    started.elapsed().as_millis() as u64,
                    false,
                ))
                .await;
            Err(ApiError::Internal(ANALYSIS_FAILED))
        }
    }
}

/// Text handed to the model: extracted PDF text when enabled and readable,
/// otherwise the placeholder body.
async fn document_text(config: &AnalysisConfig, file_data: String, file_name: &str) -> String {
    if config.extract_pdf_text {
        let max_chars = config.max_document_chars;
        match tokio::task::spawn_blocking(move || pdf::document_text(&file_data, max_chars)).await {
            Ok(Ok(text)) => {
                tracing::info!(file = %file_name, chars = text.chars().count(), "Extracted PDF text");
                return text;
            }
            Ok(Err(e)) => tracing::warn!(file = %file_name, error = %e, "PDF extraction failed; using placeholder"),
            Err(e) => tracing::warn!(file = %file_name, error = %e, "PDF extraction task failed; using placeholder"),
        }
    }
    prompts::placeholder_document(file_name)
}

/// POST /api/chat-document — answers as `data: {"content": ...}` events
pub async fn chat_document(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Ok(Json(req)) = payload else {
        return Err(ApiError::BadRequestText(MISSING_CHAT_INPUT));
    };
    let (Some(message), Some(analysis)) = (req.message.filter(|m| !m.trim().is_empty()), req.analysis) else {
        return Err(ApiError::BadRequestText(MISSING_CHAT_INPUT));
    };

    let started = Instant::now();
    match nda::stream_chat(state.llm.as_ref(), &analysis, &message, state.chat_settings()).await {
        Ok(upstream) => Ok(relay_chat(state.clone(), upstream, started).into_response()),
        Err(e) => {
            tracing::error!(error = %e, "Chat request failed");
            state
                .audit
                .record(LlmAuditEntry::new(
                    LlmOperation::ChatDocument,
                    state.llm.model_id().to_string(),
                    state.llm.backend_name().to_string(),
                    0,
                    0,
                    "",
                    started.elapsed().as_millis() as u64,
                    false,
                ))
                .await;
            Err(ApiError::InternalText(CHAT_FAILED))
        }
    }
}

// === Page ===

pub async fn doc_chat_page(
    State(state): State<SharedState>,
    Query(filter): Query<DocChatFilter>,
) -> Html<String> {
    let rule_query = filter.rules.unwrap_or_default();
    let rules: Vec<_> = search_rules(&state.catalog.decision_rules, &rule_query)
        .into_iter()
        .cloned()
        .collect();

    let body = format!(r#"
{header}

<div class="card mb-4">
    <details open>
        <summary class="card-header d-flex justify-between align-center">
            <span>Decision Rules</span>
            <span class="badge badge-outline">{rule_count} rules</span>
        </summary>
        <div class="card-body">{rules}</div>
    </details>
</div>

<div class="grid-2 mb-4">
    <div>
        <div class="card mb-4">
            <div class="card-header">Document Upload</div>
            <div class="card-body">
                <label class="dropzone" for="doc-file">
                    <input id="doc-file" type="file" accept="application/pdf" hidden>
                    <p class="mb-1">Click to upload or drag and drop</p>
                    <p class="text-muted small mb-0">PDF files only, up to 10MB</p>
                </label>
                <div class="progress-track mt-3" hidden data-upload-progress>
                    <div class="progress-bar" style="width: 0%"></div>
                </div>
                <p class="text-muted small" data-upload-status></p>
            </div>
        </div>
        <div class="card" hidden data-analysis-summary>
            <div class="card-header d-flex justify-between align-center">
                <span>Document Summary</span>
                <span class="badge" data-risk-badge></span>
            </div>
            <div class="card-body" data-summary-fields></div>
        </div>
    </div>

    <div class="card chat-card">
        <div class="card-header">AI Document Chat</div>
        <div class="card-body">
            <div class="chat-log" data-chat-log>
                <p class="text-muted text-center">Upload an NDA to start chatting about it.</p>
            </div>
            <form class="d-flex gap-2 mt-3" data-chat-form>
                <textarea class="input flex-1" name="message" rows="2" disabled
                          placeholder="Upload a document first"></textarea>
                <button class="btn btn-primary" type="submit" disabled>Send</button>
            </form>
        </div>
    </div>
</div>

<div class="card" hidden data-analysis-detail>
    <div class="card-header">Detailed Analysis</div>
    <div class="card-body">
        <div class="tabs" data-tabs>
            <button class="tab active" data-tab="structure">Document Structure</button>
            <button class="tab" data-tab="obligations">Obligations</button>
            <button class="tab" data-tab="risks">Risk Assessment</button>
            <button class="tab" data-tab="recommendations">Recommendations</button>
        </div>
        <div class="tab-panel" data-panel="structure"></div>
        <div class="tab-panel" data-panel="obligations" hidden></div>
        <div class="tab-panel" data-panel="risks" hidden></div>
        <div class="tab-panel" data-panel="recommendations" hidden></div>
    </div>
</div>"#,
        header = page_header(
            "Experienced™ AI Single Doc Chat",
            "Upload and analyze legal documents with AI-powered insights",
            &format!(r#"<span class="badge badge-outline">{}</span>"#, state.llm.model_id()),
        ),
        rule_count = rules.len(),
        rules = render_rules(&rules, &rule_query, "/ai-doc-chat"),
    );

    render_page("AI Doc Chat", "/ai-doc-chat", &body, r#"<script src="/static/js/doc_chat.js"></script>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::analysis::NOT_SPECIFIED;

    #[test]
    fn test_response_carries_display_fields() {
        let analysis = NdaAnalysis { term: Some("3 years".into()), ..Default::default() };
        let resp = AnalyzeResponse::new(analysis, "nda.pdf".into());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["fileName"], "nda.pdf");
        assert_eq!(json["riskLevel"], "medium");
        assert_eq!(json["summary"][1]["label"], "Term");
        assert_eq!(json["summary"][1]["value"], "3 years");
        assert_eq!(json["summary"][2]["value"], NOT_SPECIFIED);
        assert_eq!(json["sections"].as_array().unwrap().len(), 7);
        assert!(json["introMessage"].as_str().unwrap().contains("\"nda.pdf\""));
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_placeholder_used_when_extraction_disabled() {
        let config = AnalysisConfig::default();
        let text = document_text(&config, "data:application/pdf;base64,AAAA".into(), "a.pdf").await;
        assert_eq!(text, prompts::placeholder_document("a.pdf"));
    }

    #[tokio::test]
    async fn test_placeholder_used_when_extraction_fails() {
        let config = AnalysisConfig { extract_pdf_text: true, max_document_chars: 100 };
        let text = document_text(&config, "not a data url".into(), "b.pdf").await;
        assert_eq!(text, prompts::placeholder_document("b.pdf"));
    }
}
