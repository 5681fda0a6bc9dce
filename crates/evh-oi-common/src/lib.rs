//! evh-oi-common — Shared domain types, the seeded catalog, and the
//! filtering logic used by every EVH Operational Intelligence crate.

pub mod error;
pub mod entities;
pub mod compliance;
pub mod rules;
pub mod analysis;
pub mod personas;
pub mod activity;
pub mod risk;
pub mod assistant;
pub mod catalog;

// Re-export commonly used types
pub use catalog::Catalog;
pub use compliance::{FilingQuery, FilingRequirement, FilingStatus, Priority, Urgency};
pub use analysis::{NdaAnalysis, RiskAssessment};
