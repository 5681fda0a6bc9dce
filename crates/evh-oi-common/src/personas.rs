//! Stakeholder personas built from DISC assessments.

use serde::{Deserialize, Serialize};

/// Seven personality axes, each scored 0–10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub risk_tolerance: u8,
    pub trust: u8,
    pub optimism: u8,
    pub pace: u8,
    pub expression: u8,
    pub collaboration: u8,
    pub dominance: u8,
}

impl PersonalityTraits {
    pub const AXES: [&'static str; 7] = [
        "Risk Tolerance",
        "Trust",
        "Optimism",
        "Pace",
        "Expression",
        "Collaboration",
        "Dominance",
    ];
    pub const MAX: u8 = 10;

    /// Scores in `AXES` order.
    pub fn values(&self) -> [u8; 7] {
        [
            self.risk_tolerance,
            self.trust,
            self.optimism,
            self.pace,
            self.expression,
            self.collaboration,
            self.dominance,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub initials: String,
    pub disc_type: String,
    pub traits: Vec<String>,
    pub description: String,
    pub personality: PersonalityTraits,
    pub energizers: Vec<String>,
    pub drainers: Vec<String>,
    pub strengths: Vec<String>,
    pub blind_spots: Vec<String>,
    /// Accent colour for the radar series.
    pub color: String,
}

/// Case-insensitive match on name, title or DISC type.
pub fn search_personas<'a>(personas: &'a [Persona], term: &str) -> Vec<&'a Persona> {
    let t = term.to_lowercase();
    personas
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&t)
                || p.title.to_lowercase().contains(&t)
                || p.disc_type.to_lowercase().contains(&t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_search_by_disc_type() {
        let catalog = Catalog::seeded();
        let hits = search_personas(&catalog.personas, "influencer");
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["paul-cowart", "ayana-hill"]);
    }

    #[test]
    fn test_search_by_title() {
        let catalog = Catalog::seeded();
        let hits = search_personas(&catalog.personas, "ceo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Benjamin Cowart");
    }

    #[test]
    fn test_trait_scores_within_bounds() {
        for persona in Catalog::seeded().personas {
            assert!(persona.personality.values().iter().all(|v| *v <= PersonalityTraits::MAX));
        }
    }
}
