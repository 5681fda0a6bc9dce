//! evh-oi-web — web front end for EVH Operational Intelligence.
//! Serves:
//!   - Operational overview with heat map and entity tree
//!   - Entity profiles and compliance filings
//!   - Single-document NDA analysis and streamed chat
//!   - AI risk dashboard and stakeholder personas
//!   - System status & LLM audit log

pub mod config;
pub mod error;
pub mod router;
pub mod handlers;
pub mod state;
pub mod sse;
pub mod charts;
pub mod pdf;
