//! Stakeholder personas with DISC profiles and interaction guidance.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use evh_oi_common::personas::{search_personas, Persona, PersonalityTraits};

use crate::handlers::layout::{escape_html, page_header, render_page, CHART_SCRIPTS};
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct PersonaFilter {
    pub q: Option<String>,
    /// Persona shown in the detail panel; defaults to the first match.
    pub persona: Option<String>,
}

/// GET /api/personas?q=
pub async fn api_personas(
    State(state): State<SharedState>,
    Query(filter): Query<PersonaFilter>,
) -> impl IntoResponse {
    let personas: Vec<Persona> = search_personas(&state.catalog.personas, filter.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Json(personas)
}

pub async fn users_page(
    State(state): State<SharedState>,
    Query(filter): Query<PersonaFilter>,
) -> Html<String> {
    let term = filter.q.clone().unwrap_or_default();
    let matches = search_personas(&state.catalog.personas, &term);
    let selected = filter
        .persona
        .as_deref()
        .and_then(|id| state.catalog.persona(id).ok())
        .or_else(|| matches.first().copied());

    let cards = if matches.is_empty() {
        r#"<p class="text-center text-muted py-4">No personas match your search.</p>"#.to_string()
    } else {
        matches
            .iter()
            .map(|p| persona_card(p, &term, selected.map(|s| s.id == p.id).unwrap_or(false)))
            .collect()
    };

    let detail = selected.map(persona_detail).unwrap_or_default();

    let body = format!(r#"
{header}

<form class="mb-4" method="get" action="/users">
    <input class="input" name="q" value="{term}" placeholder="Search by name, title, or DISC type...">
</form>

<div class="grid-1-2">
    <div class="persona-list">{cards}</div>
    <div>{detail}</div>
</div>"#,
        header = page_header(
            "User Personas",
            "Comprehensive personality profiles and interaction guidelines",
            &format!(r#"<span class="badge badge-outline">{} Profiles</span>"#, state.catalog.personas.len()),
        ),
        term = escape_html(&term),
    );
    render_page("User Personas", "/users", &body, CHART_SCRIPTS)
}

fn persona_card(p: &Persona, term: &str, active: bool) -> String {
    let traits: String = p
        .traits
        .iter()
        .map(|t| format!(r#"<span class="badge badge-outline">{}</span>"#, escape_html(t)))
        .collect();
    let mut href = format!("/users?persona={}", escape_html(&p.id));
    if !term.is_empty() {
        href.push_str("&amp;q=");
        href.push_str(&escape_html(term));
    }
    format!(r#"<a class="card persona-card mb-3{}" href="{}">
    <div class="card-body d-flex gap-3">
        <div class="avatar" style="background: {}">{}</div>
        <div class="flex-1">
            <div class="d-flex justify-between align-center">
                <strong>{}</strong>
                <span class="badge badge-info">{}</span>
            </div>
            <p class="text-muted small mb-1">{} · {}</p>
            <div class="d-flex gap-2 flex-wrap">{}</div>
        </div>
    </div>
</a>"#,
        if active { " active" } else { "" },
        href,
        escape_html(&p.color),
        escape_html(&p.initials),
        escape_html(&p.name),
        escape_html(&p.disc_type),
        escape_html(&p.title),
        escape_html(&p.company),
        traits,
    )
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|i| format!("<li>{}</li>", escape_html(i))).collect()
}

fn persona_detail(p: &Persona) -> String {
    let scores: String = PersonalityTraits::AXES
        .iter()
        .zip(p.personality.values())
        .map(|(axis, value)| {
            let pct = u32::from(value) * 100 / u32::from(PersonalityTraits::MAX);
            format!(r#"<div class="trait-row">
            <span class="small">{axis}</span>
            <div class="progress-track"><div class="progress-bar" style="width: {pct}%"></div></div>
            <span class="small text-muted">{value}/{max}</span>
        </div>"#, max = PersonalityTraits::MAX)
        })
        .collect();

    format!(r#"<div class="card">
    <div class="card-header">{name} · {disc}</div>
    <div class="card-body">
        <p class="text-muted">{description}</p>
        <div class="grid-2 mb-4">
            <div class="chart" data-chart="/api/charts/radar/{id}" style="height: 300px"></div>
            <div>{scores}</div>
        </div>
        <div class="grid-2 gap-3">
            <section><h3>Energized By</h3><ul>{energizers}</ul></section>
            <section><h3>Drained By</h3><ul>{drainers}</ul></section>
            <section><h3>Strengths</h3><ul>{strengths}</ul></section>
            <section><h3>Blind Spots</h3><ul>{blind_spots}</ul></section>
        </div>
    </div>
</div>"#,
        name = escape_html(&p.name),
        disc = escape_html(&p.disc_type),
        description = escape_html(&p.description),
        id = escape_html(&p.id),
        energizers = bullet_list(&p.energizers),
        drainers = bullet_list(&p.drainers),
        strengths = bullet_list(&p.strengths),
        blind_spots = bullet_list(&p.blind_spots),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::Catalog;

    #[test]
    fn test_detail_links_radar_chart() {
        let catalog = Catalog::seeded();
        let persona = &catalog.personas[0];
        let html = persona_detail(persona);
        assert!(html.contains(&format!("/api/charts/radar/{}", persona.id)));
        assert_eq!(html.matches("trait-row").count(), PersonalityTraits::AXES.len());
        assert!(html.contains("Blind Spots"));
    }

    #[test]
    fn test_card_keeps_search_term() {
        let catalog = Catalog::seeded();
        let html = persona_card(&catalog.personas[0], "ceo", true);
        assert!(html.contains("&amp;q=ceo"));
        assert!(html.contains("persona-card mb-3 active"));
    }
}
