//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    dashboard::{dashboard, api_activity, api_facts},
    entities::{entities_page, api_entities, api_entity_detail},
    compliance::{compliance_page, api_filings, api_filing_stats, api_decision_rules},
    doc_chat::{doc_chat_page, analyze_document, chat_document},
    risk::{risk_dashboard_page, api_assistant},
    users::{users_page, api_personas},
    system::{system_page, api_health},
    charts::{api_heatmap, api_entity_tree, api_gauge, api_radar},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let body_limit = state.config.server.max_upload_bytes;
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                  get(dashboard))
        .route("/entities",          get(entities_page))
        .route("/compliance",        get(compliance_page))
        .route("/ai-doc-chat",       get(doc_chat_page))
        .route("/ai-risk-dashboard", get(risk_dashboard_page))
        .route("/users",             get(users_page))
        .route("/system",            get(system_page))

        // AI endpoints
        .route("/api/analyze-document", post(analyze_document))
        .route("/api/chat-document",    post(chat_document))
        .route("/api/assistant",        post(api_assistant))

        // Data endpoints
        .route("/api/entities",        get(api_entities))
        .route("/api/entities/{id}",   get(api_entity_detail))
        .route("/api/filings",         get(api_filings))
        .route("/api/filings/stats",   get(api_filing_stats))
        .route("/api/decision-rules",  get(api_decision_rules))
        .route("/api/personas",        get(api_personas))
        .route("/api/activity",        get(api_activity))
        .route("/api/facts",           get(api_facts))
        .route("/api/health",          get(api_health))

        // Chart options
        .route("/api/charts/heatmap",          get(api_heatmap))
        .route("/api/charts/entity-tree",      get(api_entity_tree))
        .route("/api/charts/gauge/{index}",    get(api_gauge))
        .route("/api/charts/radar/{persona_id}", get(api_radar))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
