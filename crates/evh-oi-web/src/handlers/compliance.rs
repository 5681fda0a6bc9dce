//! Compliance dashboard: filing requirements turned into sharp obligations,
//! plus the decision rule search shared with the document chat page.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use evh_oi_common::compliance::{ComplianceStats, FilingQuery, Selection, Urgency};
use evh_oi_common::error::OiError;
use evh_oi_common::rules::{search_rules, DecisionRule, RuleStatus};
use evh_oi_common::{FilingRequirement, FilingStatus, Priority};

use crate::error::ApiError;
use crate::handlers::layout::{escape_html, page_header, render_page};
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct FilingFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl FilingFilter {
    pub fn to_query(&self) -> Result<FilingQuery, OiError> {
        Ok(FilingQuery {
            search: self.search.clone().unwrap_or_default().trim().to_string(),
            status: Selection::parse(self.status.as_deref())?,
            priority: Selection::parse(self.priority.as_deref())?,
        })
    }

    /// Like [`to_query`](Self::to_query), but an unrecognised select value
    /// falls back to "all" for that select alone.
    pub fn to_query_lenient(&self) -> FilingQuery {
        FilingQuery {
            search: self.search.clone().unwrap_or_default().trim().to_string(),
            status: lenient(self.status.as_deref()),
            priority: lenient(self.priority.as_deref()),
        }
    }
}

fn lenient<T>(raw: Option<&str>) -> Selection<T>
where
    T: FromStr<Err = OiError>,
{
    Selection::parse(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring invalid compliance filter");
        Selection::default()
    })
}

#[derive(Debug, Deserialize, Default)]
pub struct RuleFilter {
    pub q: Option<String>,
}

// === API Endpoints ===

/// GET /api/filings?search=&status=&priority=
pub async fn api_filings(
    State(state): State<SharedState>,
    Query(filter): Query<FilingFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let query = filter.to_query()?;
    let rows: Vec<FilingRequirement> = query.apply(&state.catalog.filings).into_iter().cloned().collect();
    Ok(Json(rows))
}

/// GET /api/filings/stats
pub async fn api_filing_stats(State(state): State<SharedState>) -> impl IntoResponse {
    Json(ComplianceStats::compute(&state.catalog.filings))
}

/// GET /api/decision-rules?q=
pub async fn api_decision_rules(
    State(state): State<SharedState>,
    Query(filter): Query<RuleFilter>,
) -> impl IntoResponse {
    let rules: Vec<DecisionRule> = search_rules(&state.catalog.decision_rules, filter.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Json(rules)
}

// === Page ===

pub async fn compliance_page(
    State(state): State<SharedState>,
    Query(filter): Query<FilingFilter>,
) -> Html<String> {
    let filings = &state.catalog.filings;
    let query = filter.to_query_lenient();
    let stats = ComplianceStats::compute(filings);
    let rows = query.apply(filings);

    let ticker: String = filings
        .iter()
        .map(|r| format!(r#"<span class="ticker-item urgency-{}">{}</span>"#, r.urgency().as_str(), escape_html(&r.alert_line())))
        .collect();

    let table = if rows.is_empty() {
        r#"<p class="text-center text-muted py-4">No filing requirements match your current filters.</p>"#.to_string()
    } else {
        format!(r#"<div class="table-container">
            <table class="table">
                <thead>
                    <tr>
                        <th>Transformation</th>
                        <th>Entity</th>
                        <th>Due Date</th>
                        <th>Status</th>
                        <th>Priority</th>
                        <th>Risk</th>
                        <th>Alerts</th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
            </table>
        </div>"#, rows.iter().map(|r| render_filing_row(r)).collect::<String>())
    };

    let body = format!(r#"
{header}

<div class="stats-grid mb-4">
    <div class="stat-card"><div class="stat-label">Total Requirements</div><div class="stat-value">{total}</div></div>
    <div class="stat-card"><div class="stat-label">Overdue</div><div class="stat-value text-danger">{overdue}</div></div>
    <div class="stat-card"><div class="stat-label">Due This Week</div><div class="stat-value text-warning">{week}</div></div>
    <div class="stat-card"><div class="stat-label">Critical Priority</div><div class="stat-value text-danger">{critical}</div></div>
</div>

<div class="card ticker mb-4"><div class="marquee-track">{ticker}{ticker}</div></div>

<div class="card mb-4">
    <div class="card-header">Filing Requirements → Due Instances</div>
    <div class="card-body">
        <form class="d-flex gap-2 mb-3" method="get" action="/compliance">
            <input class="input flex-1" name="search" value="{search}"
                   placeholder="Search requirements, obligations, or entities...">
            <select class="input" name="status">{status_options}</select>
            <select class="input" name="priority">{priority_options}</select>
            <button class="btn btn-primary" type="submit">Filter</button>
        </form>
        {table}
    </div>
</div>

<div class="card callout">
    <div class="card-body">
        <h3>Compliance Philosophy</h3>
        <p class="text-muted small mb-0">Compliance is boring until it's catastrophic. This dashboard transforms vague
        requirements into sharp, actionable obligations with automated alerts, audit trails, and penalty risk
        assessment. We provide foresight before panic, dashboards before fines.</p>
    </div>
</div>"#,
        header = page_header(
            "Compliance Dashboard",
            "Transforming vague requirements into sharp obligations. Foresight before panic.",
            "",
        ),
        total = stats.total,
        overdue = stats.overdue,
        week = stats.due_this_week,
        critical = stats.critical,
        search = escape_html(&query.search),
        status_options = select_options(
            "All Statuses",
            &query.status,
            FilingStatus::all().iter().map(|s| (*s, s.as_str(), s.label())),
        ),
        priority_options = select_options(
            "All Priorities",
            &query.priority,
            Priority::all().iter().map(|p| (*p, p.as_str(), p.label())),
        ),
    );
    render_page("Compliance", "/compliance", &body, "")
}

fn select_options<T: PartialEq + Copy>(
    all_label: &str,
    selected: &Selection<T>,
    options: impl Iterator<Item = (T, &'static str, &'static str)>,
) -> String {
    let mut html = format!(
        r#"<option value="all"{}>{}</option>"#,
        if *selected == Selection::All { " selected" } else { "" },
        all_label,
    );
    for (value, key, label) in options {
        let mark = if *selected == Selection::Only(value) { " selected" } else { "" };
        html.push_str(&format!(r#"<option value="{key}"{mark}>{label}</option>"#));
    }
    html
}

fn render_filing_row(req: &FilingRequirement) -> String {
    let urgency = match req.urgency() {
        Urgency::Overdue | Urgency::Urgent => "badge-danger",
        Urgency::Warning                   => "badge-warning",
        Urgency::Normal                    => "badge-success",
    };
    format!(r#"<tr>
        <td>
            <div class="text-muted small strike">"{}"</div>
            <div><strong>{}</strong></div>
            <div class="text-muted small">Est. {}h • {}</div>
        </td>
        <td><span class="badge badge-outline">{}</span></td>
        <td><div>{}</div><span class="badge {}">{}</span></td>
        <td><span class="badge status-{}">{}</span></td>
        <td><span class="badge priority-{}">{}</span></td>
        <td class="text-muted small">{}</td>
        <td class="text-muted small">{}</td>
    </tr>"#,
        escape_html(&req.vague_requirement),
        escape_html(&req.sharp_obligation),
        req.estimated_hours,
        escape_html(&req.assigned_to),
        escape_html(&req.entity),
        req.due_date,
        urgency,
        req.days_label(),
        req.status.as_str(),
        req.status.label(),
        req.priority,
        req.priority.label(),
        escape_html(&req.penalty_risk),
        escape_html(&req.alert_schedule.join(", ")),
    )
}

/// Decision rule list with its search box; `action` is the page the form submits to.
pub fn render_rules(rules: &[DecisionRule], query: &str, action: &str) -> String {
    let items = if rules.is_empty() {
        r#"<p class="text-center text-muted py-4">No decision rules found matching your search.</p>"#.to_string()
    } else {
        rules
            .iter()
            .map(|rule| {
                let status = match rule.status {
                    RuleStatus::Active                       => "badge-success",
                    RuleStatus::Pending | RuleStatus::Review => "badge-warning",
                    RuleStatus::Draft                        => "badge-info",
                    RuleStatus::Inactive                     => "badge-outline",
                };
                format!(r#"<div class="rule-item">
            <div class="d-flex justify-between align-center">
                <code>{}</code>
                <span class="text-muted small">{} · v{}</span>
            </div>
            <p class="small mb-1">{}</p>
            <div class="d-flex gap-2">
                <span class="badge {}">{}</span>
                <span class="badge priority-{}">{}</span>
                <span class="text-muted small">Updated {}</span>
            </div>
        </div>"#,
                    escape_html(&rule.id_slug),
                    rule.short_id(),
                    escape_html(&rule.version),
                    escape_html(&rule.rule_text),
                    status,
                    rule.status.as_str(),
                    rule.priority,
                    rule.priority.label(),
                    rule.last_updated,
                )
            })
            .collect()
    };
    format!(r#"<form class="mb-3" method="get" action="{}">
        <input class="input" name="rules" value="{}"
               placeholder="Search decision rules by slug, rule text, version, or status...">
    </form>
    <div class="rule-list">{}</div>"#, action, escape_html(query), items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::Catalog;

    #[test]
    fn test_filter_parses_select_values() {
        let filter = FilingFilter {
            search: Some("  tax ".into()),
            status: Some("all".into()),
            priority: Some("critical".into()),
        };
        let query = filter.to_query().unwrap();
        assert_eq!(query.search, "tax");
        assert_eq!(query.status, Selection::All);
        assert_eq!(query.priority, Selection::Only(Priority::Critical));
    }

    #[test]
    fn test_filter_rejects_unknown_status() {
        let filter = FilingFilter { status: Some("lost".into()), ..Default::default() };
        assert!(filter.to_query().is_err());
    }

    #[test]
    fn test_lenient_filter_keeps_valid_select() {
        let filter = FilingFilter {
            search: None,
            status: Some("lost".into()),
            priority: Some("critical".into()),
        };
        let query = filter.to_query_lenient();
        assert_eq!(query.status, Selection::All);
        assert_eq!(query.priority, Selection::Only(Priority::Critical));
    }

    #[test]
    fn test_select_marks_current_choice() {
        let html = select_options(
            "All Priorities",
            &Selection::Only(Priority::High),
            Priority::all().iter().map(|p| (*p, p.as_str(), p.label())),
        );
        assert!(html.contains(r#"<option value="high" selected>High</option>"#));
        assert!(html.contains(r#"<option value="all">All Priorities</option>"#));
    }

    #[test]
    fn test_overdue_row_shows_days_left() {
        let catalog = Catalog::seeded();
        let row = render_filing_row(&catalog.filings[2]);
        assert!(row.contains("27 days left"));
        assert!(row.contains("status-overdue"));
    }

    #[test]
    fn test_rules_empty_state() {
        let html = render_rules(&[], "zzz", "/ai-doc-chat");
        assert!(html.contains("No decision rules found matching your search."));
        assert!(html.contains(r#"value="zzz""#));
    }
}
