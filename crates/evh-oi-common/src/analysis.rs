//! Structured NDA analysis returned by the document analysis endpoint.
//!
//! Every field is optional because the model may leave any of them out.
//! Display code never prints an empty value; it goes through the fallback
//! accessors below.

use serde::{Deserialize, Serialize};

use crate::compliance::Priority;

pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub priority: Priority,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NdaAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_disclosing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_receiving: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidential_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obligations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_of_materials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governing_law: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miscellaneous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessment>,
}

/// `value` when present and non-blank, otherwise `fallback`.
pub fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

impl NdaAnalysis {
    /// Priority of the risk assessment; `medium` when the model gave none.
    pub fn risk_level(&self) -> Priority {
        self.risk_assessment
            .as_ref()
            .map(|r| r.priority)
            .unwrap_or(Priority::Medium)
    }

    pub fn party_disclosing_or_default(&self) -> &str {
        or_fallback(&self.party_disclosing, NOT_SPECIFIED)
    }

    pub fn party_receiving_or_default(&self) -> &str {
        or_fallback(&self.party_receiving, NOT_SPECIFIED)
    }

    pub fn term_or_default(&self) -> &str {
        or_fallback(&self.term, NOT_SPECIFIED)
    }

    pub fn effective_date_or_default(&self) -> &str {
        or_fallback(&self.effective_date, NOT_SPECIFIED)
    }

    pub fn governing_law_or_default(&self) -> &str {
        or_fallback(&self.governing_law, NOT_SPECIFIED)
    }

    /// Summary card lines, in display order.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Parties",
                format!(
                    "{} → {}",
                    self.party_disclosing_or_default(),
                    self.party_receiving_or_default()
                ),
            ),
            ("Term", self.term_or_default().to_string()),
            ("Effective Date", self.effective_date_or_default().to_string()),
        ]
    }

    /// Detail tab sections with their per-field fallback text.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Definitions", or_fallback(&self.definitions, "No specific definitions found")),
            (
                "Confidential Information",
                or_fallback(&self.confidential_information, "Standard confidential information clause"),
            ),
            ("Exclusions", or_fallback(&self.exclusions, "Standard exclusions apply")),
            ("Governing Law", self.governing_law_or_default()),
            ("Key Obligations", or_fallback(&self.obligations, "Standard confidentiality obligations")),
            ("Return of Materials", or_fallback(&self.return_of_materials, "Standard return requirements")),
            ("Remedies", or_fallback(&self.remedies, "Standard legal remedies apply")),
        ]
    }

    /// First assistant message posted into the chat after an upload.
    pub fn intro_message(&self, file_name: &str) -> String {
        format!(
            "I've analyzed your NDA document \"{}\". Here's what I found:\n\n\
             **Key Parties:**\n- Disclosing: {}\n- Receiving: {}\n\n\
             **Term:** {}\n\n\
             **Risk Level:** {}\n\n\
             You can ask me specific questions about any aspect of this NDA.",
            file_name,
            self.party_disclosing_or_default(),
            self.party_receiving_or_default(),
            self.term_or_default(),
            self.risk_level(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_falls_back_to_not_specified() {
        let analysis = NdaAnalysis::default();
        for (label, value) in analysis.summary() {
            assert!(value.contains(NOT_SPECIFIED), "{label} should fall back");
        }
        assert_eq!(analysis.governing_law_or_default(), NOT_SPECIFIED);
    }

    #[test]
    fn test_blank_values_also_fall_back() {
        let analysis = NdaAnalysis { term: Some("  ".to_string()), ..Default::default() };
        assert_eq!(analysis.term_or_default(), NOT_SPECIFIED);
    }

    #[test]
    fn test_risk_level_defaults_to_medium() {
        assert_eq!(NdaAnalysis::default().risk_level(), Priority::Medium);
    }

    #[test]
    fn test_intro_message_mentions_file_and_parties() {
        let analysis = NdaAnalysis {
            party_disclosing: Some("Acme Inc.".to_string()),
            term: Some("2 years".to_string()),
            risk_assessment: Some(RiskAssessment {
                priority: Priority::High,
                issues: vec![],
                recommendations: vec![],
            }),
            ..Default::default()
        };
        let msg = analysis.intro_message("nda.pdf");
        assert!(msg.contains("\"nda.pdf\""));
        assert!(msg.contains("- Disclosing: Acme Inc."));
        assert!(msg.contains("- Receiving: Not specified"));
        assert!(msg.contains("**Term:** 2 years"));
        assert!(msg.contains("**Risk Level:** high"));
    }

    #[test]
    fn test_deserialize_partial_model_output() {
        let json = r#"{"party_disclosing":"A","risk_assessment":{"priority":"critical","issues":["x"],"recommendations":[]}}"#;
        let analysis: NdaAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.party_disclosing.as_deref(), Some("A"));
        assert_eq!(analysis.risk_level(), Priority::Critical);
        assert!(analysis.term.is_none());
    }

    #[test]
    fn test_sections_use_field_specific_fallbacks() {
        let analysis = NdaAnalysis::default();
        let sections = analysis.sections();
        assert!(sections.contains(&("Remedies", "Standard legal remedies apply")));
        assert!(sections.contains(&("Exclusions", "Standard exclusions apply")));
    }
}
