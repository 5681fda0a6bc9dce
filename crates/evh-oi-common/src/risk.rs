//! AI risk dashboard data: gauge metrics, vector lake queries, insights.

use serde::{Deserialize, Serialize};

use crate::compliance::Priority;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetric {
    pub title: String,
    pub value: f64,
    pub max: f64,
    pub color: String,
}

impl RiskMetric {
    /// Fraction of the gauge filled, clamped to [0, 1].
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Completed,
    Processing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorQuery {
    pub id: String,
    pub query: String,
    pub status: QueryStatus,
    pub confidence: Option<u32>,
    pub results: Option<u64>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Risk,
    Compliance,
    Data,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub confidence: u32,
    pub priority: Priority,
}
