//! Canned replies for the Operational Intelligence assistant panel.
//!
//! The assistant does not call a model. It echoes the query into a fixed
//! analysis paragraph and attaches the confidence, sources and risk level
//! the panel renders as badges.

use serde::Serialize;

use crate::compliance::Priority;
use crate::error::{OiError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub content: String,
    pub confidence: u32,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<Priority>,
}

/// Opening message shown before the user has asked anything.
pub fn greeting() -> AssistantReply {
    AssistantReply {
        content: "Hello! I'm your Operational Intelligence™ assistant. I can help you analyze risk \
                  patterns, query vector data lakes, and provide insights from your legal entities. \
                  What would you like to explore?"
            .to_string(),
        confidence: 95,
        sources: vec!["Vector DB".to_string(), "Risk Engine".to_string()],
        risk_level: None,
    }
}

pub fn reply_to(query: &str) -> Result<AssistantReply> {
    let query = query.trim();
    if query.is_empty() {
        return Err(OiError::InvalidInput("message must not be empty".to_string()));
    }
    Ok(AssistantReply {
        content: format!(
            "Based on your query \"{query}\", I've analyzed the vector data lake and found several \
             relevant patterns. The risk assessment shows medium-level exposure across 3 entities, \
             with compliance gaps in liability-cap-saas-12mo-fees rules. Would you like me to dive \
             deeper into specific areas?"
        ),
        confidence: 87,
        sources: ["Vector DB", "Decision Rules", "Entity Risk Profiles"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        risk_level: Some(Priority::Medium),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_echoes_trimmed_query() {
        let reply = reply_to("  entity B exposure ").unwrap();
        assert!(reply.content.starts_with("Based on your query \"entity B exposure\""));
        assert_eq!(reply.confidence, 87);
        assert_eq!(reply.sources.len(), 3);
        assert_eq!(reply.risk_level, Some(Priority::Medium));
    }

    #[test]
    fn test_blank_query_is_rejected() {
        assert!(matches!(reply_to("   "), Err(OiError::InvalidInput(_))));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(reply_to("x").unwrap()).unwrap();
        assert_eq!(json["riskLevel"], "medium");
        assert!(serde_json::to_value(greeting()).unwrap().get("riskLevel").is_none());
    }
}
