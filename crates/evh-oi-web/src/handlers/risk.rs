//! AI risk dashboard: gauges, vector lake queries, generated insights and
//! the Operational Intelligence assistant.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use evh_oi_common::assistant;
use evh_oi_common::risk::{AiInsight, InsightKind, QueryStatus, VectorQuery};

use crate::error::ApiError;
use crate::handlers::dashboard::assistant_panel;
use crate::handlers::layout::{escape_html, page_header, render_page, CHART_SCRIPTS};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: Option<String>,
}

/// POST /api/assistant
pub async fn api_assistant(
    payload: Result<Json<AssistantRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let message = match payload {
        Ok(Json(req)) => req.message.unwrap_or_default(),
        Err(_) => String::new(),
    };
    let reply = assistant::reply_to(&message)?;
    Ok(Json(reply))
}

pub async fn risk_dashboard_page(State(state): State<SharedState>) -> Html<String> {
    let catalog = &state.catalog;

    let gauges: String = (0..catalog.risk_metrics.len())
        .map(|i| format!(r#"<div class="card"><div class="card-body">
            <div class="chart" data-chart="/api/charts/gauge/{i}" style="height: 250px"></div>
        </div></div>"#))
        .collect();

    let body = format!(r#"
{header}

<div class="grid-3-1">
    <div>
        <div class="grid-2 mb-4">{gauges}</div>
        <div class="card mb-4">
            <div class="card-header">Vector Data Lake Queries</div>
            <div class="card-body">{queries}</div>
        </div>
        <div class="card">
            <div class="card-header">AI-Generated Insights</div>
            <div class="card-body">{insights}</div>
        </div>
    </div>
    <div>{assistant}</div>
</div>"#,
        header = page_header(
            "Experienced™ AI Risk Dashboard",
            "Operational Intelligence with Vector Data Lake Integration",
            r#"<span class="badge badge-info">AI Powered</span><span class="badge badge-outline">Live Data</span>"#,
        ),
        queries = render_queries(&catalog.vector_queries),
        insights = render_insights(&catalog.insights),
        assistant = assistant_panel("OI Assistant"),
    );

    let scripts = format!("{CHART_SCRIPTS}\n<script src=\"/static/js/assistant.js\"></script>");
    render_page("AI Risk Dashboard", "/ai-risk-dashboard", &body, &scripts)
}

fn render_queries(queries: &[VectorQuery]) -> String {
    queries
        .iter()
        .map(|q| {
            let (badge, label) = match q.status {
                QueryStatus::Completed  => ("badge-success", "completed"),
                QueryStatus::Processing => ("badge-warning", "processing"),
            };
            let detail = match (q.confidence, q.results) {
                (Some(c), Some(r)) => format!("{c}% confidence · {r} results"),
                _ => "Running…".to_string(),
            };
            format!(r#"<div class="row-item">
                <div><code>{}</code><p class="text-muted small mb-0">{}</p></div>
                <div class="text-end"><span class="badge {}">{}</span><p class="text-muted small mb-0">{}</p></div>
            </div>"#,
                escape_html(&q.query),
                detail,
                badge,
                label,
                escape_html(&q.timestamp),
            )
        })
        .collect()
}

fn render_insights(insights: &[AiInsight]) -> String {
    insights
        .iter()
        .map(|i| {
            let kind = match i.kind {
                InsightKind::Risk       => "Risk",
                InsightKind::Compliance => "Compliance",
                InsightKind::Data       => "Data",
            };
            format!(r#"<div class="insight">
                <div class="d-flex justify-between align-center">
                    <strong>{}</strong>
                    <span class="badge priority-{}">{}</span>
                </div>
                <p class="text-muted small">{}</p>
                <div class="d-flex gap-2"><span class="badge badge-outline">{}</span><span class="text-muted small">{}% confidence</span></div>
            </div>"#,
                escape_html(&i.title),
                i.priority,
                i.priority.label(),
                escape_html(&i.description),
                kind,
                i.confidence,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::Catalog;

    #[test]
    fn test_processing_query_has_no_scores() {
        let html = render_queries(&Catalog::seeded().vector_queries);
        assert!(html.contains("94% confidence · 847 results"));
        assert!(html.contains("Running…"));
    }

    #[test]
    fn test_insights_render_priority() {
        let html = render_insights(&Catalog::seeded().insights);
        assert!(html.contains("Elevated Risk Pattern Detected"));
        assert!(html.contains("priority-high"));
    }
}
