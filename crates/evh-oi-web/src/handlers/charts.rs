//! ECharts option endpoints consumed by `static/js/charts.js`.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::charts;
use crate::error::ApiError;
use crate::state::SharedState;

/// GET /api/charts/heatmap
pub async fn api_heatmap(State(state): State<SharedState>) -> impl IntoResponse {
    Json(charts::heatmap_option(&state.catalog.heat_map))
}

/// GET /api/charts/entity-tree
pub async fn api_entity_tree(State(state): State<SharedState>) -> impl IntoResponse {
    Json(charts::entity_tree_option(&state.catalog.entity_tree))
}

/// GET /api/charts/gauge/{index}
pub async fn api_gauge(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let metric = state
        .catalog
        .risk_metrics
        .get(index)
        .ok_or_else(|| ApiError::NotFound(format!("Risk metric not found: {index}")))?;
    Ok(Json(charts::gauge_option(metric, "%")))
}

/// GET /api/charts/radar/{persona_id}
pub async fn api_radar(
    State(state): State<SharedState>,
    Path(persona_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let persona = state.catalog.persona(&persona_id)?;
    Ok(Json(charts::radar_option(persona)))
}
