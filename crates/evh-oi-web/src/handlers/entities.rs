//! Entities page: one card per legal entity with its risk profile,
//! cap table, insurance, banking and filing schedule.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    Json,
};

use evh_oi_common::entities::Entity;
use evh_oi_common::FilingStatus;

use crate::error::ApiError;
use crate::handlers::layout::{escape_html, page_header, render_page};
use crate::state::SharedState;

// === API Endpoints ===

/// GET /api/entities
pub async fn api_entities(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.catalog.entities.clone())
}

/// GET /api/entities/{id} — case-insensitive on the entity id
pub async fn api_entity_detail(
    State(state): State<SharedState>,
    Path(entity_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entity = state.catalog.entity(&entity_id)?;
    Ok(Json(entity.clone()))
}

// === Page ===

pub async fn entities_page(State(state): State<SharedState>) -> Html<String> {
    let entities = &state.catalog.entities;
    let cards: String = entities.iter().map(render_entity).collect();

    let body = format!(r#"
{}
<div class="entity-grid">{}</div>"#,
        page_header(
            "Entities",
            "Comprehensive view of all entities and their profiles",
            &format!(r#"<span class="badge badge-outline">{} Entities</span>"#, entities.len()),
        ),
        cards,
    );
    render_page("Entities", "/entities", &body, "")
}

fn status_badge(status: FilingStatus) -> &'static str {
    match status {
        FilingStatus::Filed                               => "badge-success",
        FilingStatus::InProgress | FilingStatus::Scheduled => "badge-info",
        FilingStatus::Pending                             => "badge-warning",
        FilingStatus::Overdue                             => "badge-danger",
    }
}

fn render_entity(entity: &Entity) -> String {
    let risk = &entity.risk_profile;
    let trend = if risk.overall_score >= 80 {
        r#"<span class="trend trend-up">▲</span>"#
    } else {
        r#"<span class="trend trend-down">▼</span>"#
    };

    let factors: String = risk
        .factors
        .iter()
        .map(|f| format!("<li>{}</li>", escape_html(f)))
        .collect();

    let cap_rows: String = entity
        .cap_table
        .iter()
        .map(|e| format!(r#"<div class="row-item">
                <span>{}</span>
                <span class="text-muted small">{} shares <span class="badge badge-outline">{}%</span></span>
            </div>"#,
            escape_html(&e.shareholder),
            group_thousands(e.shares),
            e.percentage,
        ))
        .collect();

    let policy_rows: String = entity
        .insurance_policies
        .iter()
        .map(|p| format!(r#"<div class="row-item">
                <div><span>{}</span><p class="text-muted small mb-0">{} · expires {}</p></div>
                <div><span>{}</span> <span class="badge {}">{}</span></div>
            </div>"#,
            escape_html(&p.policy_type),
            escape_html(&p.provider),
            p.expiry,
            escape_html(&p.coverage),
            if p.status.needs_attention() { "badge-warning" } else { "badge-success" },
            p.status.as_str(),
        ))
        .collect();

    let bank_rows: String = entity
        .bank_profiles
        .iter()
        .map(|b| format!(r#"<div class="row-item">
                <div><span>{}</span><p class="text-muted small mb-0">{}</p></div>
                <div><span>{}</span> <span class="badge badge-success">{}</span></div>
            </div>"#,
            escape_html(&b.bank),
            escape_html(&b.account_type),
            escape_html(&b.balance),
            escape_html(&b.status),
        ))
        .collect();

    let filing_rows: String = entity
        .filing_due_instances
        .iter()
        .map(|f| format!(r#"<div class="row-item">
                <div><span>{}</span><p class="text-muted small mb-0">Due: {}</p></div>
                <div><span class="badge priority-{}">{}</span> <span class="badge {}">{}</span></div>
            </div>"#,
            escape_html(&f.form),
            f.due_date,
            f.priority,
            f.priority.label(),
            status_badge(f.status),
            f.status.label(),
        ))
        .collect();

    format!(r#"
<div class="card mb-4" id="{id}">
    <div class="card-header d-flex justify-between align-center">
        <div>
            <div class="card-title">{name}</div>
            <p class="text-muted small mb-0">{id} • {kind}</p>
        </div>
        <div class="d-flex gap-2 align-center">
            <span class="badge badge-{badge}">{level} Risk</span>
            {trend}<strong>{score}%</strong>
        </div>
    </div>
    <div class="card-body grid-2 gap-3">
        <section><h3>Risk Factors</h3><ul class="factor-list">{factors}</ul></section>
        <section><h3>Cap Table</h3>{cap_rows}</section>
        <section><h3>Insurance Policies</h3>{policy_rows}</section>
        <section><h3>Bank Profiles</h3>{bank_rows}</section>
        <section><h3>Filing Due Instances</h3>{filing_rows}</section>
    </div>
</div>"#,
        id = escape_html(&entity.entity_id),
        name = escape_html(&entity.name),
        kind = escape_html(&entity.entity_type),
        badge = risk.level.badge_class(),
        level = risk.level.as_str(),
        score = risk.overall_score,
    )
}

/// 1000000 -> "1,000,000"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::Catalog;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(50_000), "50,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn test_entity_card_sections() {
        let catalog = Catalog::seeded();
        let html = render_entity(catalog.entity("ENT-C-004").unwrap());
        assert!(html.contains("Entity C Partners"));
        assert!(html.contains("Medium-High Risk"));
        assert!(html.contains("Renewal Required"));
        assert!(html.contains("trend-down"));
        for section in ["Risk Factors", "Cap Table", "Insurance Policies", "Bank Profiles", "Filing Due Instances"] {
            assert!(html.contains(section), "missing {section}");
        }
    }
}
