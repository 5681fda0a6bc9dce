//! Legal entity records shown on the entities page.
//! These are read-only snapshots; nothing here is ever mutated after seeding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::compliance::{FilingStatus, Priority};

// ---------------------------------------------------------------------------
// Risk profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low        => "Low",
            RiskLevel::Medium     => "Medium",
            RiskLevel::MediumHigh => "Medium-High",
            RiskLevel::High       => "High",
        }
    }

    /// CSS badge class used by the HTML views.
    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskLevel::Low        => "success",
            RiskLevel::Medium     => "warning",
            RiskLevel::MediumHigh => "orange",
            RiskLevel::High       => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub overall_score: u32,
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapTableEntry {
    pub shareholder: String,
    pub percentage: f64,
    pub shares: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStatus {
    Active,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    #[serde(rename = "Renewal Required")]
    RenewalRequired,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active          => "Active",
            PolicyStatus::ExpiringSoon    => "Expiring Soon",
            PolicyStatus::RenewalRequired => "Renewal Required",
        }
    }

    pub fn needs_attention(&self) -> bool {
        !matches!(self, PolicyStatus::Active)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub policy_type: String,
    pub provider: String,
    pub coverage: String,
    pub expiry: NaiveDate,
    pub status: PolicyStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankProfile {
    pub bank: String,
    pub account_type: String,
    pub balance: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingDueInstance {
    pub form: String,
    pub due_date: NaiveDate,
    pub status: FilingStatus,
    pub priority: Priority,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,
    pub name: String,
    pub entity_type: String,
    pub risk_profile: RiskProfile,
    pub cap_table: Vec<CapTableEntry>,
    pub insurance_policies: Vec<InsurancePolicy>,
    pub bank_profiles: Vec<BankProfile>,
    pub filing_due_instances: Vec<FilingDueInstance>,
}

impl Entity {
    /// Sum of cap table percentages; 100.0 for a complete table.
    pub fn cap_table_total(&self) -> f64 {
        self.cap_table.iter().map(|e| e.percentage).sum()
    }

    pub fn overdue_filings(&self) -> usize {
        self.filing_due_instances
            .iter()
            .filter(|f| f.status == FilingStatus::Overdue)
            .count()
    }

    pub fn policies_needing_attention(&self) -> usize {
        self.insurance_policies
            .iter()
            .filter(|p| p.status.needs_attention())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Relationship tree
// ---------------------------------------------------------------------------

/// A node in the ownership tree; `documents` drives the node size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityNode {
    pub name: String,
    pub documents: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntityNode>,
}

impl EntityNode {
    pub fn leaf(name: &str, documents: u32) -> Self {
        Self { name: name.to_string(), documents, children: Vec::new() }
    }

    pub fn with_children(name: &str, documents: u32, children: Vec<EntityNode>) -> Self {
        Self { name: name.to_string(), documents, children }
    }

    /// Depth-first count of nodes including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(EntityNode::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(EntityNode::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;

    #[test]
    fn test_cap_tables_are_complete() {
        let catalog = Catalog::seeded();
        for entity in &catalog.entities {
            assert!((entity.cap_table_total() - 100.0).abs() < 1e-9, "{} cap table", entity.name);
        }
    }

    #[test]
    fn test_entity_c_has_policy_needing_renewal() {
        let catalog = Catalog::seeded();
        let c = catalog.entity("ENT-C-004").unwrap();
        assert_eq!(c.policies_needing_attention(), 1);
        assert_eq!(c.overdue_filings(), 1);
    }

    #[test]
    fn test_relationship_tree_shape() {
        let tree = Catalog::seeded().entity_tree;
        assert_eq!(tree.name, "EVH Legal");
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
    }
}
