//! Decision rules: versioned compliance policy statements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compliance::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Draft,
    Active,
    Pending,
    Inactive,
    Review,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Draft    => "draft",
            RuleStatus::Active   => "active",
            RuleStatus::Pending  => "pending",
            RuleStatus::Inactive => "inactive",
            RuleStatus::Review   => "review",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRule {
    pub id: Uuid,
    /// Stable identifier such as `contract-approval-workflow`.
    pub id_slug: String,
    pub version: String,
    pub status: RuleStatus,
    pub priority: Priority,
    pub rule_text: String,
    pub created_date: NaiveDate,
    pub last_updated: NaiveDate,
}

impl DecisionRule {
    /// First eight characters of the UUID, as shown next to each rule.
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }

    pub fn matches(&self, lowered_query: &str) -> bool {
        self.id_slug.to_lowercase().contains(lowered_query)
            || self.rule_text.to_lowercase().contains(lowered_query)
            || self.version.to_lowercase().contains(lowered_query)
            || self.status.as_str().contains(lowered_query)
            || self.priority.as_str().contains(lowered_query)
    }
}

/// Substring search over slug, rule text, version, status and priority.
/// A blank query returns every rule.
pub fn search_rules<'a>(rules: &'a [DecisionRule], query: &str) -> Vec<&'a DecisionRule> {
    if query.trim().is_empty() {
        return rules.iter().collect();
    }
    let q = query.to_lowercase();
    rules.iter().filter(|r| r.matches(&q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn slugs<'a>(rules: &[&'a DecisionRule]) -> Vec<&'a str> {
        rules.iter().map(|r| r.id_slug.as_str()).collect()
    }

    #[test]
    fn test_blank_query_returns_all() {
        let catalog = Catalog::seeded();
        assert_eq!(search_rules(&catalog.decision_rules, "   ").len(), 10);
    }

    #[test]
    fn test_search_by_status() {
        let catalog = Catalog::seeded();
        let hits = search_rules(&catalog.decision_rules, "Draft");
        assert_eq!(slugs(&hits), vec!["data-retention-policy-impl"]);
    }

    #[test]
    fn test_search_by_version_fragment() {
        let catalog = Catalog::seeded();
        let hits = search_rules(&catalog.decision_rules, "4.1.0");
        assert_eq!(slugs(&hits), vec!["contract-approval-workflow"]);
    }

    #[test]
    fn test_search_by_rule_text() {
        let catalog = Catalog::seeded();
        let hits = search_rules(&catalog.decision_rules, "cap table");
        assert_eq!(slugs(&hits), vec!["cap-table-update-notifications"]);
    }

    #[test]
    fn test_short_id() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.decision_rules[0].short_id(), "550e8400");
    }
}
