//! Prompt templates and the response schema for NDA work.

use evh_oi_common::analysis::{or_fallback, NdaAnalysis, NOT_SPECIFIED};

/// Schema name the analysis call is constrained by.
pub const ANALYSIS_SCHEMA_NAME: &str = "nda_anatomy";

/// Stand-in document body used when no text is extracted from the upload.
pub fn placeholder_document(file_name: &str) -> String {
    format!(
        "Sample NDA document content for {file_name}. This would be extracted from the actual PDF."
    )
}

pub fn analysis_prompt(document_text: &str) -> String {
    format!(
        "Analyze this NDA document and extract key information according to the {ANALYSIS_SCHEMA_NAME} schema.

Document: {document_text}

Please identify:
1. The disclosing and receiving parties
2. Effective date and term
3. Definitions of confidential information
4. Exclusions from confidentiality
5. Key obligations of the receiving party
6. Return of materials requirements
7. Remedies for breach
8. Governing law
9. Risk assessment with priority level and specific issues
10. Recommendations for improvement

Provide a comprehensive analysis focusing on legal risks and compliance requirements."
    )
}

/// JSON schema for `NdaAnalysis`. Every top-level field is optional.
pub fn nda_anatomy_schema() -> serde_json::Value {
    let text = serde_json::json!({ "type": "string" });
    let string_list = serde_json::json!({ "type": "array", "items": { "type": "string" } });
    serde_json::json!({
        "type": "object",
        "properties": {
            "party_disclosing":         text,
            "party_receiving":          text,
            "effective_date":           text,
            "definitions":              text,
            "confidential_information": text,
            "exclusions":               text,
            "obligations":              text,
            "term":                     text,
            "return_of_materials":      text,
            "remedies":                 text,
            "governing_law":            text,
            "miscellaneous":            text,
            "risk_assessment": {
                "type": "object",
                "properties": {
                    "priority": { "type": "string", "enum": ["critical", "high", "medium", "low"] },
                    "issues": string_list,
                    "recommendations": string_list,
                },
                "required": ["priority", "issues", "recommendations"],
                "additionalProperties": false,
            },
        },
        "additionalProperties": false,
    })
}

fn risk_block(analysis: &NdaAnalysis) -> String {
    match &analysis.risk_assessment {
        Some(risk) => format!(
            "\n- Priority: {}\n- Issues: {}\n- Recommendations: {}\n",
            risk.priority,
            risk.issues.join(", "),
            risk.recommendations.join(", "),
        ),
        None => "Standard risk profile".to_string(),
    }
}

/// System prompt for the document chat. Absent fields are filled with the
/// chat-specific fallbacks, which differ from the ones the UI shows.
pub fn chat_system_prompt(analysis: &NdaAnalysis) -> String {
    format!(
        "You are an expert legal AI assistant specializing in NDA analysis. You have analyzed a document with the following details:

Document Analysis:
- Disclosing Party: {disclosing}
- Receiving Party: {receiving}
- Term: {term}
- Effective Date: {effective}
- Risk Level: {risk_level}

Key Sections:
- Definitions: {definitions}
- Confidential Information: {confidential}
- Exclusions: {exclusions}
- Obligations: {obligations}
- Return of Materials: {return_of_materials}
- Remedies: {remedies}
- Governing Law: {governing_law}

Risk Assessment:
{risk_block}

Please provide detailed, accurate responses about this NDA. Focus on:
1. Legal implications and risks
2. Compliance requirements
3. Practical business impact
4. Specific clause analysis
5. Recommendations for negotiation or improvement

Be precise, professional, and cite specific sections when relevant.",
        disclosing = analysis.party_disclosing_or_default(),
        receiving = analysis.party_receiving_or_default(),
        term = analysis.term_or_default(),
        effective = analysis.effective_date_or_default(),
        risk_level = analysis.risk_level(),
        definitions = or_fallback(&analysis.definitions, "Standard definitions"),
        confidential = or_fallback(&analysis.confidential_information, "Standard clause"),
        exclusions = or_fallback(&analysis.exclusions, "Standard exclusions"),
        obligations = or_fallback(&analysis.obligations, "Standard obligations"),
        return_of_materials = or_fallback(&analysis.return_of_materials, "Standard requirements"),
        remedies = or_fallback(&analysis.remedies, "Standard remedies"),
        governing_law = or_fallback(&analysis.governing_law, NOT_SPECIFIED),
        risk_block = risk_block(analysis),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::analysis::RiskAssessment;
    use evh_oi_common::Priority;

    #[test]
    fn test_placeholder_document_names_file() {
        assert_eq!(
            placeholder_document("acme.pdf"),
            "Sample NDA document content for acme.pdf. This would be extracted from the actual PDF."
        );
    }

    #[test]
    fn test_analysis_prompt_embeds_document_and_schema_name() {
        let prompt = analysis_prompt("BODY TEXT");
        assert!(prompt.starts_with("Analyze this NDA document"));
        assert!(prompt.contains("the nda_anatomy schema"));
        assert!(prompt.contains("Document: BODY TEXT"));
        assert!(prompt.contains("10. Recommendations for improvement"));
    }

    #[test]
    fn test_chat_prompt_uses_chat_fallbacks() {
        let prompt = chat_system_prompt(&NdaAnalysis::default());
        assert!(prompt.contains("- Disclosing Party: Not specified"));
        assert!(prompt.contains("- Risk Level: medium"));
        assert!(prompt.contains("- Definitions: Standard definitions"));
        assert!(prompt.contains("- Confidential Information: Standard clause"));
        assert!(prompt.contains("- Return of Materials: Standard requirements"));
        assert!(prompt.contains("- Governing Law: Not specified"));
        assert!(prompt.contains("Risk Assessment:\nStandard risk profile"));
    }

    #[test]
    fn test_chat_prompt_lists_risk_assessment() {
        let analysis = NdaAnalysis {
            party_disclosing: Some("Acme Inc.".to_string()),
            risk_assessment: Some(RiskAssessment {
                priority: Priority::High,
                issues: vec!["No term limit".to_string(), "Broad scope".to_string()],
                recommendations: vec!["Add 3-year cap".to_string()],
            }),
            ..Default::default()
        };
        let prompt = chat_system_prompt(&analysis);
        assert!(prompt.contains("- Disclosing Party: Acme Inc."));
        assert!(prompt.contains("- Risk Level: high"));
        assert!(prompt.contains("- Issues: No term limit, Broad scope"));
        assert!(prompt.contains("- Recommendations: Add 3-year cap"));
        assert!(!prompt.contains("Standard risk profile"));
    }

    #[test]
    fn test_schema_lists_every_analysis_field() {
        let schema = nda_anatomy_schema();
        let props = schema["properties"].as_object().unwrap();
        assert_eq!(props.len(), 13);
        assert!(schema.get("required").is_none());
        assert_eq!(props["risk_assessment"]["properties"]["priority"]["enum"][0], "critical");
    }
}
