//! Recent activity feed and the scrolling fact marquee.

use serde::{Deserialize, Serialize};

use crate::compliance::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Document,
    Entity,
    Compliance,
    Filing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Warning,
    Error,
    Info,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Success => "success",
            ActivityStatus::Warning => "warning",
            ActivityStatus::Error   => "error",
            ActivityStatus::Info    => "info",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Relative time as displayed ("2 minutes ago").
    pub timestamp: String,
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up     => "▲",
            Trend::Down   => "▼",
            Trend::Stable => "–",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub id: String,
    pub text: String,
    pub value: String,
    pub trend: Option<Trend>,
    pub change: Option<String>,
    pub priority: Priority,
}

/// The marquee scrolls a doubled list so the loop has no visible seam.
pub fn marquee_sequence(facts: &[Fact]) -> Vec<&Fact> {
    facts.iter().chain(facts.iter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_marquee_doubles_facts_in_order() {
        let facts = Catalog::seeded().facts;
        let seq = marquee_sequence(&facts);
        assert_eq!(seq.len(), facts.len() * 2);
        assert_eq!(seq[0].id, seq[facts.len()].id);
    }
}
