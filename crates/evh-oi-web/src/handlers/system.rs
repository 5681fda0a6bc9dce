//! System status, LLM backend, and the audit trail of model calls.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use evh_oi_llm::audit::LlmAuditEntry;

use crate::handlers::layout::{escape_html, page_header, render_page};
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub backend: &'static str,
    pub model: String,
    pub uptime_secs: i64,
    pub audited_calls: usize,
}

/// GET /api/health
pub async fn api_health(State(state): State<SharedState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok",
        backend: state.llm.backend_name(),
        model: state.llm.model_id().to_string(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        audited_calls: state.audit.len().await,
    })
}

pub async fn system_page(State(state): State<SharedState>) -> Html<String> {
    let entries = state.audit.recent().await;
    let failed = entries.iter().filter(|e| !e.succeeded).count();
    let uptime = Utc::now() - state.started_at;

    let rows: String = if entries.is_empty() {
        r#"<tr><td colspan="7" class="text-center text-muted py-4">No model invocations logged in the audit trail.</td></tr>"#.to_string()
    } else {
        entries.iter().map(audit_row).collect()
    };

    let body = format!(r#"
{header}

<div class="stats-grid mb-4">
    <div class="stat-card"><div class="stat-label">Backend</div><div class="stat-value">{backend}</div></div>
    <div class="stat-card"><div class="stat-label">Model</div><div class="stat-value">{model}</div></div>
    <div class="stat-card"><div class="stat-label">Audited Calls</div><div class="stat-value">{calls}</div></div>
    <div class="stat-card"><div class="stat-label">Failed Calls</div><div class="stat-value text-danger">{failed}</div></div>
</div>

<div class="card">
    <div class="card-header d-flex justify-between align-center">
        <span>LLM Audit Log</span>
        <span class="text-muted small">Last {capacity} calls · up {hours}h {minutes}m</span>
    </div>
    <div class="table-container">
        <table class="table">
            <thead>
                <tr>
                    <th>Operation</th>
                    <th>Model</th>
                    <th>Backend</th>
                    <th class="text-end">Prompt</th>
                    <th class="text-end">Completion</th>
                    <th class="text-end">Latency</th>
                    <th class="text-end">Time</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    </div>
</div>"#,
        header = page_header("System", "LLM backend status and audit trail", ""),
        backend = state.llm.backend_name(),
        model = escape_html(state.llm.model_id()),
        calls = entries.len(),
        capacity = state.audit.capacity(),
        hours = uptime.num_hours(),
        minutes = uptime.num_minutes() % 60,
    );
    render_page("System", "/system", &body, "")
}

fn audit_row(entry: &LlmAuditEntry) -> String {
    let outcome = if entry.succeeded {
        r#"<span class="badge badge-success">ok</span>"#
    } else {
        r#"<span class="badge badge-danger">failed</span>"#
    };
    format!(r#"<tr>
        <td>{} {}</td>
        <td>{}</td>
        <td><span class="badge badge-outline">{}</span></td>
        <td class="text-end">{}</td>
        <td class="text-end">{}</td>
        <td class="text-end">{} ms</td>
        <td class="text-end text-muted small" title="sha256 {}">{}</td>
    </tr>"#,
        entry.operation.as_str(),
        outcome,
        escape_html(&entry.model),
        escape_html(&entry.backend),
        entry.prompt_tokens,
        entry.completion_tokens,
        entry.latency_ms,
        entry.output_hash,
        entry.called_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_llm::audit::LlmOperation;

    #[test]
    fn test_failed_call_badge() {
        let entry = LlmAuditEntry::new(
            LlmOperation::AnalyzeDocument,
            "gpt-4o".into(),
            "openai".into(),
            0,
            0,
            "",
            12,
            false,
        );
        let html = audit_row(&entry);
        assert!(html.contains("analyze_document"));
        assert!(html.contains("badge-danger"));
        assert!(html.contains("12 ms"));
    }
}
