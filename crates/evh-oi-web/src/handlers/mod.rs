//! HTTP handlers for all web routes.

pub mod layout;
pub mod dashboard;
pub mod entities;
pub mod compliance;
pub mod doc_chat;
pub mod risk;
pub mod users;
pub mod system;
pub mod charts;
