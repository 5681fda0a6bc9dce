//! Filing requirements: the sharp obligations behind each vague requirement,
//! plus the filter, urgency and summary logic the compliance views use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::OiError;

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Pending,
    InProgress,
    Overdue,
    Scheduled,
    Filed,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Pending    => "pending",
            FilingStatus::InProgress => "in_progress",
            FilingStatus::Overdue    => "overdue",
            FilingStatus::Scheduled  => "scheduled",
            FilingStatus::Filed      => "filed",
        }
    }

    /// Human label, e.g. "In Progress".
    pub fn label(&self) -> &'static str {
        match self {
            FilingStatus::Pending    => "Pending",
            FilingStatus::InProgress => "In Progress",
            FilingStatus::Overdue    => "Overdue",
            FilingStatus::Scheduled  => "Scheduled",
            FilingStatus::Filed      => "Filed",
        }
    }

    pub fn all() -> [FilingStatus; 5] {
        [
            FilingStatus::Overdue,
            FilingStatus::Pending,
            FilingStatus::InProgress,
            FilingStatus::Scheduled,
            FilingStatus::Filed,
        ]
    }
}

impl std::str::FromStr for FilingStatus {
    type Err = OiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "pending"     => Ok(FilingStatus::Pending),
            "in_progress" => Ok(FilingStatus::InProgress),
            "overdue"     => Ok(FilingStatus::Overdue),
            "scheduled"   => Ok(FilingStatus::Scheduled),
            "filed"       => Ok(FilingStatus::Filed),
            other         => Err(OiError::InvalidInput(format!("unknown filing status '{other}'"))),
        }
    }
}

/// Priority shared by filings, risk assessments, decision rules and insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High     => "high",
            Priority::Medium   => "medium",
            Priority::Low      => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High     => "High",
            Priority::Medium   => "Medium",
            Priority::Low      => "Low",
        }
    }

    pub fn all() -> [Priority; 4] {
        [Priority::Critical, Priority::High, Priority::Medium, Priority::Low]
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = OiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high"     => Ok(Priority::High),
            "medium"   => Ok(Priority::Medium),
            "low"      => Ok(Priority::Low),
            other      => Err(OiError::InvalidInput(format!("unknown priority '{other}'"))),
        }
    }
}

// ── Urgency ───────────────────────────────────────────────────────────────────

/// Bucket derived from days until due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Overdue,
    Urgent,
    Warning,
    Normal,
}

impl Urgency {
    pub fn from_days(days_until_due: i64) -> Self {
        match days_until_due {
            d if d < 0   => Urgency::Overdue,
            0..=7        => Urgency::Urgent,
            8..=30       => Urgency::Warning,
            _            => Urgency::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Urgent  => "urgent",
            Urgency::Warning => "warning",
            Urgency::Normal  => "normal",
        }
    }
}

// ── Filing requirement ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRequirement {
    pub id: String,
    pub vague_requirement: String,
    pub entity: String,
    pub sharp_obligation: String,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub status: FilingStatus,
    pub priority: Priority,
    pub estimated_hours: u32,
    pub assigned_to: String,
    pub last_filed: NaiveDate,
    pub penalty_risk: String,
    pub alert_schedule: Vec<String>,
}

impl FilingRequirement {
    pub fn urgency(&self) -> Urgency {
        Urgency::from_days(self.days_until_due)
    }

    /// "12 days left" or "3 days overdue".
    pub fn days_label(&self) -> String {
        if self.days_until_due < 0 {
            format!("{} days overdue", self.days_until_due.abs())
        } else {
            format!("{} days left", self.days_until_due)
        }
    }

    /// One line of the alert ticker above the requirements table.
    pub fn alert_line(&self) -> String {
        match self.status {
            FilingStatus::Overdue => {
                format!("{} overdue by {} days", self.sharp_obligation, self.days_until_due.abs())
            }
            FilingStatus::Filed => format!("{} filed successfully", self.sharp_obligation),
            _ => format!("{} due in {} days", self.sharp_obligation, self.days_until_due),
        }
    }
}

// ── Query ─────────────────────────────────────────────────────────────────────

/// Either "all" or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All     => true,
            Selection::Only(v) => v == value,
        }
    }
}

impl<T: std::str::FromStr<Err = OiError>> Selection<T> {
    /// Parse a select-box value. `None`, empty and `"all"` mean no filter.
    pub fn parse(raw: Option<&str>) -> Result<Self, OiError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Selection::All),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(Selection::All),
            Some(s) => s.parse().map(Selection::Only),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilingQuery {
    pub search: String,
    pub status: Selection<FilingStatus>,
    pub priority: Selection<Priority>,
}

impl FilingQuery {
    pub fn matches(&self, req: &FilingRequirement) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = req.vague_requirement.to_lowercase().contains(&needle)
            || req.sharp_obligation.to_lowercase().contains(&needle)
            || req.entity.to_lowercase().contains(&needle);

        matches_search && self.status.matches(&req.status) && self.priority.matches(&req.priority)
    }

    pub fn apply<'a>(&self, reqs: &'a [FilingRequirement]) -> Vec<&'a FilingRequirement> {
        reqs.iter().filter(|r| self.matches(r)).collect()
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceStats {
    pub total: usize,
    pub overdue: usize,
    pub due_this_week: usize,
    pub critical: usize,
}

impl ComplianceStats {
    pub fn compute(reqs: &[FilingRequirement]) -> Self {
        Self {
            total: reqs.len(),
            overdue: reqs.iter().filter(|r| r.status == FilingStatus::Overdue).count(),
            due_this_week: reqs
                .iter()
                .filter(|r| (0..=7).contains(&r.days_until_due))
                .count(),
            critical: reqs.iter().filter(|r| r.priority == Priority::Critical).count(),
        }
    }
}

// ── Heat map ──────────────────────────────────────────────────────────────────

/// Monthly compliance scores per entity.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceHeatMap {
    pub entities: Vec<String>,
    pub months: Vec<String>,
    /// `[month_index, entity_index, score]`
    pub cells: Vec<[u32; 3]>,
}

impl ComplianceHeatMap {
    /// Risk band shown in the tooltip.
    pub fn risk_band(score: u32) -> &'static str {
        if score >= 90 {
            "Low"
        } else if score >= 75 {
            "Medium"
        } else {
            "High"
        }
    }

    pub fn score(&self, month: usize, entity: usize) -> Option<u32> {
        self.cells
            .iter()
            .find(|c| c[0] as usize == month && c[1] as usize == entity)
            .map(|c| c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_urgency_boundaries() {
        assert_eq!(Urgency::from_days(-1), Urgency::Overdue);
        assert_eq!(Urgency::from_days(0), Urgency::Urgent);
        assert_eq!(Urgency::from_days(7), Urgency::Urgent);
        assert_eq!(Urgency::from_days(8), Urgency::Warning);
        assert_eq!(Urgency::from_days(30), Urgency::Warning);
        assert_eq!(Urgency::from_days(31), Urgency::Normal);
    }

    #[test]
    fn test_search_tax_returns_two_rows() {
        let catalog = Catalog::seeded();
        let query = FilingQuery { search: "tax".to_string(), ..Default::default() };
        let ids: Vec<&str> = query.apply(&catalog.filings).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["req-002", "req-006"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_matches_entity() {
        let catalog = Catalog::seeded();
        let query = FilingQuery { search: "EVH legal".to_string(), ..Default::default() };
        let ids: Vec<&str> = query.apply(&catalog.filings).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["req-001", "req-005"]);
    }

    #[test]
    fn test_status_and_priority_filters_combine() {
        let catalog = Catalog::seeded();
        let query = FilingQuery {
            search: String::new(),
            status: Selection::Only(FilingStatus::Pending),
            priority: Selection::Only(Priority::High),
        };
        let ids: Vec<&str> = query.apply(&catalog.filings).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["req-001", "req-004"]);

        let critical_overdue = FilingQuery {
            status: Selection::Only(FilingStatus::Overdue),
            priority: Selection::Only(Priority::Critical),
            ..Default::default()
        };
        assert_eq!(critical_overdue.apply(&catalog.filings).len(), 1);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let catalog = Catalog::seeded();
        assert_eq!(FilingQuery::default().apply(&catalog.filings).len(), catalog.filings.len());
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::<Priority>::parse(None).unwrap(), Selection::All);
        assert_eq!(Selection::<Priority>::parse(Some("all")).unwrap(), Selection::All);
        assert_eq!(
            Selection::<FilingStatus>::parse(Some("in_progress")).unwrap(),
            Selection::Only(FilingStatus::InProgress)
        );
        assert!(Selection::<Priority>::parse(Some("urgent")).is_err());
    }

    #[test]
    fn test_stats_over_seed() {
        let catalog = Catalog::seeded();
        let stats = ComplianceStats::compute(&catalog.filings);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_this_week, 0);
        assert_eq!(stats.critical, 2);
    }

    #[test]
    fn test_alert_lines_follow_status() {
        let catalog = Catalog::seeded();
        let lines: Vec<String> = catalog.filings.iter().map(|r| r.alert_line()).collect();
        assert_eq!(lines[2], "Q4 2024 Financial Report to Members overdue by 27 days");
        assert_eq!(lines[3], "California Partnership Registration Renewal due in 42 days");
        assert_eq!(lines[5], "Quarterly Payroll Tax Report (Form 941) filed successfully");
    }

    #[test]
    fn test_days_label() {
        let mut req = Catalog::seeded().filings[0].clone();
        assert_eq!(req.days_label(), "157 days left");
        req.days_until_due = -4;
        assert_eq!(req.days_label(), "4 days overdue");
    }

    #[test]
    fn test_heat_map_risk_band() {
        assert_eq!(ComplianceHeatMap::risk_band(90), "Low");
        assert_eq!(ComplianceHeatMap::risk_band(89), "Medium");
        assert_eq!(ComplianceHeatMap::risk_band(75), "Medium");
        assert_eq!(ComplianceHeatMap::risk_band(74), "High");
    }
}
