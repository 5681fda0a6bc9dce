//! The in-memory catalog every page and API reads from.
//!
//! `Catalog::seeded()` builds the fixed dataset the dashboard ships with.
//! It is constructed once at startup and shared read-only behind an `Arc`.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::activity::{ActivityItem, ActivityKind, ActivityStatus, Fact, Trend};
use crate::compliance::{ComplianceHeatMap, FilingRequirement, FilingStatus, Priority};
use crate::entities::{
    BankProfile, CapTableEntry, Entity, EntityNode, FilingDueInstance, InsurancePolicy,
    PolicyStatus, RiskLevel, RiskProfile,
};
use crate::error::{OiError, Result};
use crate::personas::{Persona, PersonalityTraits};
use crate::risk::{AiInsight, InsightKind, QueryStatus, RiskMetric, VectorQuery};
use crate::rules::{DecisionRule, RuleStatus};

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub entities: Vec<Entity>,
    pub entity_tree: EntityNode,
    pub filings: Vec<FilingRequirement>,
    pub decision_rules: Vec<DecisionRule>,
    pub personas: Vec<Persona>,
    pub heat_map: ComplianceHeatMap,
    pub risk_metrics: Vec<RiskMetric>,
    pub vector_queries: Vec<VectorQuery>,
    pub insights: Vec<AiInsight>,
    pub activity: Vec<ActivityItem>,
    pub facts: Vec<Fact>,
}

impl Catalog {
    pub fn seeded() -> Self {
        Self {
            entities: seed_entities(),
            entity_tree: seed_entity_tree(),
            filings: seed_filings(),
            decision_rules: seed_decision_rules(),
            personas: seed_personas(),
            heat_map: seed_heat_map(),
            risk_metrics: seed_risk_metrics(),
            vector_queries: seed_vector_queries(),
            insights: seed_insights(),
            activity: seed_activity(),
            facts: seed_facts(),
        }
    }

    pub fn entity(&self, entity_id: &str) -> Result<&Entity> {
        self.entities
            .iter()
            .find(|e| e.entity_id.eq_ignore_ascii_case(entity_id))
            .ok_or_else(|| OiError::EntityNotFound(entity_id.to_string()))
    }

    pub fn persona(&self, id: &str) -> Result<&Persona> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| OiError::PersonaNotFound(id.to_string()))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn cap(shareholder: &str, percentage: f64, shares: u64) -> CapTableEntry {
    CapTableEntry { shareholder: shareholder.to_string(), percentage, shares }
}

fn policy(policy_type: &str, provider: &str, coverage: &str, expiry: NaiveDate, status: PolicyStatus) -> InsurancePolicy {
    InsurancePolicy {
        policy_type: policy_type.to_string(),
        provider: provider.to_string(),
        coverage: coverage.to_string(),
        expiry,
        status,
    }
}

fn bank(name: &str, account_type: &str, balance: &str) -> BankProfile {
    BankProfile {
        bank: name.to_string(),
        account_type: account_type.to_string(),
        balance: balance.to_string(),
        status: "Active".to_string(),
    }
}

fn due(form: &str, due_date: NaiveDate, status: FilingStatus, priority: Priority) -> FilingDueInstance {
    FilingDueInstance { form: form.to_string(), due_date, status, priority }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn seed_entities() -> Vec<Entity> {
    vec![
        Entity {
            entity_id: "EVH-001".to_string(),
            name: "EVH Legal".to_string(),
            entity_type: "Parent Company".to_string(),
            risk_profile: RiskProfile {
                overall_score: 85,
                level: RiskLevel::Low,
                factors: strs(&["Strong compliance history", "Adequate insurance coverage", "Regular filings"]),
            },
            cap_table: vec![
                cap("Founders", 65.0, 650_000),
                cap("Series A Investors", 25.0, 250_000),
                cap("Employee Pool", 10.0, 100_000),
            ],
            insurance_policies: vec![
                policy("General Liability", "AIG", "$2M", ymd(2024, 12, 31), PolicyStatus::Active),
                policy("Professional Liability", "Chubb", "$5M", ymd(2024, 11, 15), PolicyStatus::Active),
                policy("Cyber Liability", "Travelers", "$1M", ymd(2024, 10, 30), PolicyStatus::ExpiringSoon),
            ],
            bank_profiles: vec![
                bank("JPMorgan Chase", "Operating", "$2.5M"),
                bank("Silicon Valley Bank", "Escrow", "$500K"),
            ],
            filing_due_instances: vec![
                due("Form 10-K", ymd(2024, 3, 15), FilingStatus::Pending, Priority::High),
                due("State Annual Report", ymd(2024, 2, 28), FilingStatus::Filed, Priority::Medium),
                due("Tax Return", ymd(2024, 4, 15), FilingStatus::InProgress, Priority::High),
            ],
        },
        Entity {
            entity_id: "ENT-A-002".to_string(),
            name: "Entity A Corp".to_string(),
            entity_type: "Subsidiary".to_string(),
            risk_profile: RiskProfile {
                overall_score: 72,
                level: RiskLevel::Medium,
                factors: strs(&["Recent compliance issues", "Insurance gaps identified", "Delayed filings"]),
            },
            cap_table: vec![
                cap("EVH Legal", 80.0, 800_000),
                cap("Management", 15.0, 150_000),
                cap("Advisors", 5.0, 50_000),
            ],
            insurance_policies: vec![
                policy("General Liability", "Hartford", "$1M", ymd(2024, 9, 30), PolicyStatus::Active),
                policy("Workers Compensation", "State Fund", "$500K", ymd(2024, 12, 31), PolicyStatus::Active),
            ],
            bank_profiles: vec![
                bank("Bank of America", "Operating", "$750K"),
                bank("Wells Fargo", "Savings", "$200K"),
            ],
            filing_due_instances: vec![
                due("Quarterly Report", ymd(2024, 1, 31), FilingStatus::Overdue, Priority::Critical),
                due("Employment Tax", ymd(2024, 2, 15), FilingStatus::Pending, Priority::High),
            ],
        },
        Entity {
            entity_id: "ENT-B-003".to_string(),
            name: "Entity B LLC".to_string(),
            entity_type: "Subsidiary".to_string(),
            risk_profile: RiskProfile {
                overall_score: 91,
                level: RiskLevel::Low,
                factors: strs(&["Excellent compliance record", "Comprehensive insurance", "Timely filings"]),
            },
            cap_table: vec![cap("EVH Legal", 100.0, 1_000_000)],
            insurance_policies: vec![
                policy("General Liability", "Zurich", "$3M", ymd(2024, 8, 15), PolicyStatus::Active),
                policy("Property Insurance", "FM Global", "$10M", ymd(2024, 7, 1), PolicyStatus::Active),
                policy("Directors & Officers", "AIG", "$5M", ymd(2024, 12, 31), PolicyStatus::Active),
            ],
            bank_profiles: vec![
                bank("Goldman Sachs", "Operating", "$5.2M"),
                bank("Morgan Stanley", "Investment", "$1.8M"),
            ],
            filing_due_instances: vec![
                due("Annual Report", ymd(2024, 3, 1), FilingStatus::Filed, Priority::Medium),
                due("Tax Return", ymd(2024, 3, 15), FilingStatus::InProgress, Priority::Medium),
            ],
        },
        Entity {
            entity_id: "ENT-C-004".to_string(),
            name: "Entity C Partners".to_string(),
            entity_type: "Partnership".to_string(),
            risk_profile: RiskProfile {
                overall_score: 68,
                level: RiskLevel::MediumHigh,
                factors: strs(&["Partnership disputes", "Insurance coverage gaps", "Regulatory scrutiny"]),
            },
            cap_table: vec![
                cap("Entity A Corp", 60.0, 600_000),
                cap("External Partner", 40.0, 400_000),
            ],
            insurance_policies: vec![
                policy("General Liability", "Liberty Mutual", "$1.5M", ymd(2024, 6, 30), PolicyStatus::Active),
                policy("Professional Liability", "Beazley", "$2M", ymd(2024, 5, 15), PolicyStatus::RenewalRequired),
            ],
            bank_profiles: vec![bank("Citibank", "Operating", "$1.1M")],
            filing_due_instances: vec![
                due("Partnership Return", ymd(2024, 3, 15), FilingStatus::Pending, Priority::High),
                due("State Registration", ymd(2024, 2, 1), FilingStatus::Overdue, Priority::Critical),
            ],
        },
    ]
}

fn seed_entity_tree() -> EntityNode {
    EntityNode::with_children(
        "EVH Legal",
        150,
        vec![
            EntityNode::with_children(
                "Entity A Corp",
                45,
                vec![EntityNode::leaf("Entity C Partners", 23)],
            ),
            EntityNode::leaf("Entity B LLC", 32),
        ],
    )
}

// ── Filings ───────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn filing(
    id: &str,
    vague: &str,
    entity: &str,
    sharp: &str,
    due_date: NaiveDate,
    days_until_due: i64,
    status: FilingStatus,
    priority: Priority,
    estimated_hours: u32,
    assigned_to: &str,
    last_filed: NaiveDate,
    penalty_risk: &str,
    alert_schedule: &[&str],
) -> FilingRequirement {
    FilingRequirement {
        id: id.to_string(),
        vague_requirement: vague.to_string(),
        entity: entity.to_string(),
        sharp_obligation: sharp.to_string(),
        due_date,
        days_until_due,
        status,
        priority,
        estimated_hours,
        assigned_to: assigned_to.to_string(),
        last_filed,
        penalty_risk: penalty_risk.to_string(),
        alert_schedule: strs(alert_schedule),
    }
}

fn seed_filings() -> Vec<FilingRequirement> {
    vec![
        filing(
            "req-001", "Annual Report", "EVH Legal", "Delaware Annual Report Filing",
            ymd(2025, 3, 1), 157, FilingStatus::Pending, Priority::High, 8, "Legal Team",
            ymd(2024, 3, 1), "$200 late fee + $50/month", &["30 days", "15 days", "5 days"],
        ),
        filing(
            "req-002", "Tax Return", "Entity A Corp", "Federal Corporate Tax Return (Form 1120)",
            ymd(2025, 4, 15), 202, FilingStatus::InProgress, Priority::Critical, 24, "Tax Advisor",
            ymd(2024, 4, 15), "5% of unpaid tax + interest", &["60 days", "30 days", "15 days", "5 days"],
        ),
        filing(
            "req-003", "Quarterly Report", "Entity B LLC", "Q4 2024 Financial Report to Members",
            ymd(2025, 1, 31), 27, FilingStatus::Overdue, Priority::Critical, 12, "CFO",
            ymd(2024, 10, 31), "Member agreement violation", &["15 days", "5 days", "1 day"],
        ),
        filing(
            "req-004", "State Registration", "Entity C Partners", "California Partnership Registration Renewal",
            ymd(2025, 2, 15), 42, FilingStatus::Pending, Priority::High, 4, "Compliance Officer",
            ymd(2024, 2, 15), "$250 penalty + suspension risk", &["30 days", "15 days", "5 days"],
        ),
        filing(
            "req-005", "Insurance Review", "EVH Legal", "D&O Insurance Policy Renewal Decision",
            ymd(2025, 6, 30), 278, FilingStatus::Scheduled, Priority::Medium, 6, "Risk Manager",
            ymd(2024, 6, 30), "Coverage gap exposure", &["90 days", "60 days", "30 days"],
        ),
        filing(
            "req-006", "Employment Filing", "Entity A Corp", "Quarterly Payroll Tax Report (Form 941)",
            ymd(2025, 1, 31), 27, FilingStatus::Filed, Priority::High, 3, "Payroll Service",
            ymd(2025, 1, 28), "2% of unpaid tax", &["30 days", "15 days", "5 days"],
        ),
    ]
}

// ── Decision rules ────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn rule(
    id: u128,
    slug: &str,
    version: &str,
    status: RuleStatus,
    priority: Priority,
    text: &str,
    created: NaiveDate,
    updated: NaiveDate,
) -> DecisionRule {
    DecisionRule {
        id: Uuid::from_u128(id),
        id_slug: slug.to_string(),
        version: version.to_string(),
        status,
        priority,
        rule_text: text.to_string(),
        created_date: created,
        last_updated: updated,
    }
}

fn seed_decision_rules() -> Vec<DecisionRule> {
    vec![
        rule(
            0x550e8400_e29b_41d4_a716_446655440001, "entity-formation-docs-req", "2.1.0",
            RuleStatus::Active, Priority::High,
            "All new entity formations must include complete documentation package with articles of incorporation, bylaws, and initial board resolutions within 30 days of formation.",
            ymd(2024, 1, 15), ymd(2024, 1, 20),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440002, "insurance-policy-review-cycle", "1.5.2",
            RuleStatus::Active, Priority::Medium,
            "Insurance policies must be reviewed quarterly for coverage adequacy and premium optimization opportunities. Reviews must be documented and approved by risk management.",
            ymd(2024, 1, 12), ymd(2024, 1, 18),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440003, "cap-table-update-notifications", "3.0.1",
            RuleStatus::Pending, Priority::High,
            "All cap table changes must be communicated to stakeholders within 5 business days of execution via secure notification system.",
            ymd(2024, 1, 10), ymd(2024, 1, 16),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440004, "bank-reconciliation-standards", "1.8.0",
            RuleStatus::Active, Priority::Medium,
            "Monthly bank reconciliations must be completed within 10 days of month-end with documented variance explanations exceeding $1,000.",
            ymd(2024, 1, 8), ymd(2024, 1, 14),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440005, "filing-deadline-alert-system", "2.3.1",
            RuleStatus::Review, Priority::High,
            "Automated alerts must be configured 30, 15, and 5 days before any regulatory filing deadlines with escalation to compliance officer.",
            ymd(2024, 1, 5), ymd(2024, 1, 12),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440006, "contract-approval-workflow", "4.1.0",
            RuleStatus::Active, Priority::High,
            "All contracts exceeding $50,000 require legal review and C-level approval before execution. Emergency contracts may be approved retroactively within 48 hours.",
            ymd(2024, 1, 3), ymd(2024, 1, 10),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440007, "data-retention-policy-impl", "1.2.3",
            RuleStatus::Draft, Priority::Medium,
            "Implement 7-year retention policy for financial records and 3-year policy for operational documents with automated deletion workflows.",
            ymd(2024, 1, 1), ymd(2024, 1, 8),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440008, "board-meeting-docs-standards", "2.0.5",
            RuleStatus::Active, Priority::Medium,
            "Board meeting minutes must be prepared within 48 hours and distributed to all directors within 5 business days via secure portal.",
            ymd(2023, 12, 28), ymd(2024, 1, 5),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440009, "vendor-due-diligence-req", "1.0.8",
            RuleStatus::Inactive, Priority::Low,
            "All new vendors must complete security questionnaire and provide insurance certificates before contract execution. Annual reviews required for active vendors.",
            ymd(2023, 12, 25), ymd(2024, 1, 2),
        ),
        rule(
            0x550e8400_e29b_41d4_a716_446655440010, "employee-stock-option-grants", "3.2.1",
            RuleStatus::Active, Priority::High,
            "Stock option grants require compensation committee approval and must be documented within equity management system within 24 hours of approval.",
            ymd(2023, 12, 20), ymd(2023, 12, 28),
        ),
    ]
}

// ── Personas ──────────────────────────────────────────────────────────────────

const INFLUENCER_ENERGIZERS: [&str; 4] = ["Exploration & discovery", "Storytelling", "Public speaking", "Fun & excitement"];
const INFLUENCER_DRAINERS: [&str; 4] = ["Using too much caution", "Overly factual discussions", "Rigid schedules", "Feeling micromanaged"];
const INFLUENCER_STRENGTHS: [&str; 4] = [
    "Taking action with limited information",
    "Telling vivid stories",
    "Searching for growth opportunities",
    "Actively engaging with others",
];
const INFLUENCER_BLIND_SPOTS: [&str; 4] = [
    "May display impatience with detailed instruction",
    "May prioritize excitement over security",
    "May trust instinct over data",
    "May be overly idealistic",
];
const DRIVER_ENERGIZERS: [&str; 4] = ["Professional growth", "Competition & winning", "Challenges", "Leading the group"];
const DRIVER_STRENGTHS: [&str; 4] = [
    "High tolerance for risk and bold decisions",
    "Persistently pursuing goals",
    "Committing to decisions quickly",
    "Motivating others with challenges",
];
const DRIVER_BLIND_SPOTS: [&str; 4] = [
    "Working with urgency that may stress others",
    "Hard time in supporting roles",
    "Trouble accepting authority",
    "Making changes that disrupt others",
];

fn seed_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: "paul-cowart".to_string(),
            name: "Paul Cowart".to_string(),
            title: "Product Manager".to_string(),
            company: "Paul's Company".to_string(),
            initials: "PC".to_string(),
            disc_type: "Influencer (Id)".to_string(),
            traits: strs(&["ADVENTUROUS", "PIONEERING", "SOCIABLE"]),
            description: "Paul is likely comfortable delivering important messages verbally and communicating a bold vision.".to_string(),
            personality: PersonalityTraits {
                risk_tolerance: 8, trust: 7, optimism: 9, pace: 8, expression: 8, collaboration: 7, dominance: 6,
            },
            energizers: strs(&INFLUENCER_ENERGIZERS),
            drainers: strs(&INFLUENCER_DRAINERS),
            strengths: strs(&INFLUENCER_STRENGTHS),
            blind_spots: strs(&INFLUENCER_BLIND_SPOTS),
            color: "#3b82f6".to_string(),
        },
        Persona {
            id: "benjamin-cowart".to_string(),
            name: "Benjamin Cowart".to_string(),
            title: "CEO".to_string(),
            company: "Benjamin's Company".to_string(),
            initials: "BC".to_string(),
            disc_type: "Architect (Dc)".to_string(),
            traits: strs(&["VIGOROUS", "COMPETITIVE", "FOCUSED"]),
            description: "Benjamin likely approaches life like a driving force, focused on creating processes that improve results.".to_string(),
            personality: PersonalityTraits {
                risk_tolerance: 9, trust: 5, optimism: 6, pace: 9, expression: 4, collaboration: 3, dominance: 9,
            },
            energizers: strs(&DRIVER_ENERGIZERS),
            drainers: strs(&[
                "Following inflexible rules",
                "Tangents unrelated to main conversation",
                "Slow pace of work",
                "People blindly supporting others",
            ]),
            strengths: strs(&DRIVER_STRENGTHS),
            blind_spots: strs(&DRIVER_BLIND_SPOTS),
            color: "#ef4444".to_string(),
        },
        Persona {
            id: "ayana-hill".to_string(),
            name: "Ayana Hill".to_string(),
            title: "Executive Director of Creative Strategy & Brand Innovation".to_string(),
            company: "Ayana's Company".to_string(),
            initials: "AH".to_string(),
            disc_type: "Influencer (Id)".to_string(),
            traits: strs(&["ADVENTUROUS", "VISIONARY", "OUTGOING"]),
            description: "Ayana is likely comfortable delivering important messages verbally and communicating a bold vision.".to_string(),
            personality: PersonalityTraits {
                risk_tolerance: 8, trust: 7, optimism: 9, pace: 8, expression: 9, collaboration: 8, dominance: 6,
            },
            energizers: strs(&INFLUENCER_ENERGIZERS),
            drainers: strs(&INFLUENCER_DRAINERS),
            strengths: strs(&INFLUENCER_STRENGTHS),
            blind_spots: strs(&INFLUENCER_BLIND_SPOTS),
            color: "#f97316".to_string(),
        },
        Persona {
            id: "taylor-taylor".to_string(),
            name: "Taylor Taylor".to_string(),
            title: "Intern".to_string(),
            company: "Taylor's Company".to_string(),
            initials: "TT".to_string(),
            disc_type: "Captain (D)".to_string(),
            traits: strs(&["DECISIVE", "FAST-PACED", "ASSERTIVE"]),
            description: "Taylor tends to be confident and fast-paced, especially when achieving ambitious goals.".to_string(),
            personality: PersonalityTraits {
                risk_tolerance: 9, trust: 4, optimism: 5, pace: 9, expression: 3, collaboration: 2, dominance: 9,
            },
            energizers: strs(&DRIVER_ENERGIZERS),
            drainers: strs(&[
                "Following inflexible rules",
                "Tangents unrelated to conversation",
                "Slow pace of work",
                "People blindly supporting others",
            ]),
            strengths: strs(&DRIVER_STRENGTHS),
            blind_spots: strs(&DRIVER_BLIND_SPOTS),
            color: "#a855f7".to_string(),
        },
    ]
}

// ── Heat map ──────────────────────────────────────────────────────────────────

fn seed_heat_map() -> ComplianceHeatMap {
    let scores: [[u32; 12]; 4] = [
        [95, 97, 94, 96, 98, 99, 97, 95, 93, 96, 98, 99],
        [88, 90, 87, 89, 91, 93, 90, 88, 85, 87, 89, 92],
        [76, 78, 74, 80, 82, 85, 83, 81, 79, 77, 80, 84],
        [65, 68, 62, 70, 73, 75, 72, 69, 66, 71, 74, 76],
    ];
    let cells = scores
        .iter()
        .enumerate()
        .flat_map(|(entity, row)| {
            row.iter()
                .enumerate()
                .map(move |(month, score)| [month as u32, entity as u32, *score])
        })
        .collect();

    ComplianceHeatMap {
        entities: strs(&["EVH Legal", "Entity A Corp", "Entity B LLC", "Entity C Partners"]),
        months: strs(&["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]),
        cells,
    }
}

// ── AI risk dashboard ─────────────────────────────────────────────────────────

fn seed_risk_metrics() -> Vec<RiskMetric> {
    [
        ("Overall Risk Score", 73.0, "#f59e0b"),
        ("Compliance Rate", 87.0, "#10b981"),
        ("AI Confidence", 94.0, "#8b5cf6"),
        ("Data Quality", 91.0, "#06b6d4"),
    ]
    .iter()
    .map(|(title, value, color)| RiskMetric {
        title: title.to_string(),
        value: *value,
        max: 100.0,
        color: color.to_string(),
    })
    .collect()
}

fn seed_vector_queries() -> Vec<VectorQuery> {
    vec![
        VectorQuery {
            id: "vq-001".to_string(),
            query: "liability-cap-saas-12mo-fees".to_string(),
            status: QueryStatus::Completed,
            confidence: Some(94),
            results: Some(847),
            timestamp: "2 min ago".to_string(),
        },
        VectorQuery {
            id: "vq-002".to_string(),
            query: "entity-risk-correlation-analysis".to_string(),
            status: QueryStatus::Processing,
            confidence: None,
            results: None,
            timestamp: "5 min ago".to_string(),
        },
        VectorQuery {
            id: "vq-003".to_string(),
            query: "compliance-gap-detection".to_string(),
            status: QueryStatus::Completed,
            confidence: Some(89),
            results: Some(234),
            timestamp: "8 min ago".to_string(),
        },
    ]
}

fn seed_insights() -> Vec<AiInsight> {
    vec![
        AiInsight {
            kind: InsightKind::Risk,
            title: "Elevated Risk Pattern Detected".to_string(),
            description: "Entity B LLC shows 23% increase in liability exposure over 30 days".to_string(),
            confidence: 91,
            priority: Priority::High,
        },
        AiInsight {
            kind: InsightKind::Compliance,
            title: "Decision Rule Optimization".to_string(),
            description: "Rule v1.3.0 can be consolidated with v1.2.8 for better efficiency".to_string(),
            confidence: 87,
            priority: Priority::Medium,
        },
        AiInsight {
            kind: InsightKind::Data,
            title: "Vector Data Lake Update".to_string(),
            description: "New compliance patterns identified in recent filings".to_string(),
            confidence: 95,
            priority: Priority::Low,
        },
    ]
}

// ── Activity & facts ──────────────────────────────────────────────────────────

fn seed_activity() -> Vec<ActivityItem> {
    [
        ("1", ActivityKind::Document, "Document Analysis Complete", "Annual Report 2024 processed successfully", "2 minutes ago", ActivityStatus::Success),
        ("2", ActivityKind::Compliance, "Compliance Alert", "Entity B requires updated filing by Dec 31", "15 minutes ago", ActivityStatus::Warning),
        ("3", ActivityKind::Entity, "New Entity Added", "Entity C registered in Delaware", "1 hour ago", ActivityStatus::Info),
        ("4", ActivityKind::Filing, "Filing Submitted", "Form 10-K submitted for Entity A", "2 hours ago", ActivityStatus::Success),
        ("5", ActivityKind::Compliance, "Risk Assessment Updated", "Entity A compliance score improved to 95%", "3 hours ago", ActivityStatus::Success),
    ]
    .iter()
    .map(|(id, kind, title, description, timestamp, status)| ActivityItem {
        id: id.to_string(),
        kind: *kind,
        title: title.to_string(),
        description: description.to_string(),
        timestamp: timestamp.to_string(),
        status: *status,
    })
    .collect()
}

fn seed_facts() -> Vec<Fact> {
    [
        ("1", "Active Compliance Issues", "3", Trend::Down, "-2 from last week", Priority::High),
        ("2", "Entities Under Management", "47", Trend::Up, "+3 this month", Priority::Medium),
        ("3", "Upcoming Filing Deadlines", "12", Trend::Stable, "Next: March 15", Priority::High),
        ("4", "Documents Processed Today", "156", Trend::Up, "+23% vs yesterday", Priority::Low),
        ("5", "Compliance Score", "94%", Trend::Up, "+2% this quarter", Priority::Medium),
        ("6", "Completed Filings", "28", Trend::Up, "100% on-time rate", Priority::Low),
    ]
    .iter()
    .map(|(id, text, value, trend, change, priority)| Fact {
        id: id.to_string(),
        text: text.to_string(),
        value: value.to_string(),
        trend: Some(*trend),
        change: Some(change.to_string()),
        priority: *priority,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        let c = Catalog::seeded();
        assert_eq!(c.entities.len(), 4);
        assert_eq!(c.filings.len(), 6);
        assert_eq!(c.decision_rules.len(), 10);
        assert_eq!(c.personas.len(), 4);
        assert_eq!(c.heat_map.cells.len(), 48);
        assert_eq!(c.risk_metrics.len(), 4);
    }

    #[test]
    fn test_entity_lookup() {
        let c = Catalog::seeded();
        assert_eq!(c.entity("evh-001").unwrap().name, "EVH Legal");
        assert!(matches!(c.entity("NOPE"), Err(OiError::EntityNotFound(_))));
    }

    #[test]
    fn test_heat_map_indexing() {
        let c = Catalog::seeded();
        assert_eq!(c.heat_map.score(0, 0), Some(95));
        assert_eq!(c.heat_map.score(11, 3), Some(76));
        assert_eq!(c.heat_map.score(12, 0), None);
    }
}
