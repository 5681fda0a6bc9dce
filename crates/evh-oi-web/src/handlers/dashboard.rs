//! Dashboard handler — landing page with the heat map, entity tree,
//! fact marquee and recent activity.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};

use evh_oi_common::activity::{marquee_sequence, ActivityItem, ActivityKind, Fact, Trend};
use evh_oi_common::assistant;

use crate::handlers::layout::{escape_html, page_header, render_page, CHART_SCRIPTS};
use crate::state::SharedState;

/// GET /api/activity
pub async fn api_activity(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.catalog.activity.clone())
}

/// GET /api/facts
pub async fn api_facts(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.catalog.facts.clone())
}

pub async fn dashboard(State(state): State<SharedState>) -> Html<String> {
    let catalog = &state.catalog;

    let body = format!(r#"
{header}

{assistant}

<div class="marquee card mb-4" data-marquee>
    <div class="marquee-track">{marquee}</div>
</div>

<div class="grid-2 mb-4">
    <div class="card">
        <div class="card-header">Compliance Heat Map</div>
        <div class="card-body">
            <div class="chart" data-chart="/api/charts/heatmap" style="height: 400px"></div>
        </div>
    </div>
    <div class="card">
        <div class="card-header">Entity Relationships</div>
        <div class="card-body">
            <div class="chart" data-chart="/api/charts/entity-tree" style="height: 400px"></div>
        </div>
    </div>
</div>

<div class="card">
    <details open>
        <summary class="card-header d-flex justify-between align-center">
            <span>Recent Activity</span>
            <span class="badge badge-outline">Live</span>
        </summary>
        <div class="card-body activity-feed">{activity}</div>
    </details>
</div>"#,
        header = page_header(
            "Operational Overview",
            "Entity compliance risk and document intelligence",
            &format!(r#"<span class="badge badge-outline">{} Entities</span>"#, catalog.entities.len()),
        ),
        assistant = assistant_panel("EVH Legal Assistant"),
        marquee = render_marquee(&catalog.facts),
        activity = render_activity(&catalog.activity),
    );

    let scripts = format!("{CHART_SCRIPTS}\n<script src=\"/static/js/assistant.js\"></script>");
    render_page("Overview", "/", &body, &scripts)
}

/// Chat panel driven by `static/js/assistant.js` against `/api/assistant`.
pub fn assistant_panel(title: &str) -> String {
    let greeting = assistant::greeting();
    format!(r#"<div class="card mb-4 assistant" data-assistant>
    <div class="card-header d-flex justify-between align-center">
        <span><span class="pulse-dot"></span> {title}</span>
        <span class="badge badge-outline">{confidence}% confidence</span>
    </div>
    <div class="card-body">
        <div class="assistant-messages" data-assistant-log>
            <div class="chat-bubble assistant-bubble">{greeting}</div>
        </div>
        <form class="d-flex gap-2 mt-3" data-assistant-form>
            <input class="input flex-1" name="message" autocomplete="off"
                   placeholder="Ask about entities, compliance, or documents...">
            <button class="btn btn-primary" type="submit">Send</button>
        </form>
    </div>
</div>"#,
        title = escape_html(title),
        confidence = greeting.confidence,
        greeting = escape_html(&greeting.content),
    )
}

fn render_marquee(facts: &[Fact]) -> String {
    marquee_sequence(facts)
        .iter()
        .map(|fact| {
            let trend = fact
                .trend
                .map(|t| {
                    let class = match t {
                        Trend::Up     => "up",
                        Trend::Down   => "down",
                        Trend::Stable => "stable",
                    };
                    format!(r#"<span class="trend trend-{class}">{}</span>"#, t.arrow())
                })
                .unwrap_or_default();
            let change = fact
                .change
                .as_deref()
                .map(|c| format!(r#"<span class="text-muted small">{}</span>"#, escape_html(c)))
                .unwrap_or_default();
            format!(r#"<div class="marquee-item priority-{}">
        <span class="small text-muted">{}</span>
        <strong>{}</strong>{}{}
    </div>"#,
                fact.priority,
                escape_html(&fact.text),
                escape_html(&fact.value),
                trend,
                change,
            )
        })
        .collect()
}

fn render_activity(items: &[ActivityItem]) -> String {
    if items.is_empty() {
        return r#"<p class="text-center text-muted">No recent activity.</p>"#.to_string();
    }
    items
        .iter()
        .map(|item| {
            let icon = match item.kind {
                ActivityKind::Document   => "📄",
                ActivityKind::Entity     => "🏢",
                ActivityKind::Compliance => "⚠️",
                ActivityKind::Filing     => "✅",
            };
            format!(r#"<div class="activity-item">
            <span class="activity-icon status-{}">{}</span>
            <div class="flex-1">
                <div class="d-flex justify-between">
                    <strong>{}</strong>
                    <span class="text-muted small">{}</span>
                </div>
                <p class="text-muted small mb-0">{}</p>
            </div>
        </div>"#,
                item.status.as_str(),
                icon,
                escape_html(&item.title),
                escape_html(&item.timestamp),
                escape_html(&item.description),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::Catalog;

    #[test]
    fn test_marquee_renders_each_fact_twice() {
        let facts = Catalog::seeded().facts;
        let html = render_marquee(&facts);
        assert_eq!(html.matches("marquee-item").count(), facts.len() * 2);
        assert_eq!(html.matches("Documents Processed Today").count(), 2);
    }

    #[test]
    fn test_activity_feed_lists_items() {
        let html = render_activity(&Catalog::seeded().activity);
        assert!(html.contains("Document Analysis Complete"));
        assert!(html.contains("status-warning"));
        assert!(render_activity(&[]).contains("No recent activity."));
    }
}
