//! Pipeline data model: keyword reports, structured entries, phase labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project-lifecycle phase assigned to a feedback-derived record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Discover,
    Define,
    Develop,
    Deliver,
}

impl Phase {
    /// Fixed phase order. Earlier phases win score ties, and `Discover` is
    /// the default label when nothing matches.
    pub const ORDER: [Phase; 4] = [Phase::Discover, Phase::Define, Phase::Develop, Phase::Deliver];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Discover => "Discover",
            Phase::Define => "Define",
            Phase::Develop => "Develop",
            Phase::Deliver => "Deliver",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked keyphrase for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: String,
    /// Relevance score from the ranking stage; not otherwise constrained.
    pub score: f64,
}

/// Ranked keyphrases and example sentences for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileKeywords {
    pub filename: String,
    pub filepath: String,
    pub keywords: Vec<KeywordScore>,
    pub example_sentences: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub files_processed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Rank stage output (`keybert_keywords.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordReport {
    pub summary: ReportSummary,
    pub results: Vec<FileKeywords>,
}

/// Citizen role text: the evidence sentence under both of its downstream
/// key names. The two fields always hold the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenRole {
    pub original_sentence: String,
    pub exact_sentence: String,
}

impl CitizenRole {
    pub fn new(sentence: impl Into<String>) -> Self {
        let sentence = sentence.into();
        Self {
            original_sentence: sentence.clone(),
            exact_sentence: sentence,
        }
    }

    /// The evidence sentence, preferring `exact_sentence` when deserialized
    /// data carries only one of the two keys.
    pub fn sentence(&self) -> &str {
        if self.exact_sentence.is_empty() {
            &self.original_sentence
        } else {
            &self.exact_sentence
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignerRole {
    pub design_suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerRole {
    pub planning_suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roles {
    pub citizen: CitizenRole,
    pub designer: DesignerRole,
    pub planner: PlannerRole,
}

/// The pipeline's central record, produced by the structure stage
/// (`structured_keywords.json`). Carries the transient `day` field, always
/// empty, which the phase stage drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredEntry {
    #[serde(default)]
    pub day: String,
    pub keyword: String,
    pub roles: Roles,
    pub source: String,
}

impl StructuredEntry {
    pub fn new(
        keyword: impl Into<String>,
        sentence: impl Into<String>,
        design_suggestion: impl Into<String>,
        planning_suggestion: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            day: String::new(),
            keyword: keyword.into(),
            roles: Roles {
                citizen: CitizenRole::new(sentence),
                designer: DesignerRole {
                    design_suggestion: design_suggestion.into(),
                },
                planner: PlannerRole {
                    planning_suggestion: planning_suggestion.into(),
                },
            },
            source: source.into(),
        }
    }
}

/// A structured entry after phase classification
/// (`structured_keywords_phased.json`): `day` removed, `phase` added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhasedEntry {
    pub keyword: String,
    pub roles: Roles,
    pub source: String,
    pub phase: Phase,
}

impl PhasedEntry {
    pub fn from_structured(entry: StructuredEntry, phase: Phase) -> Self {
        Self {
            keyword: entry.keyword,
            roles: entry.roles,
            source: entry.source,
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_role_holds_one_sentence_under_both_keys() {
        let role = CitizenRole::new("Die Umfrage zeigte großes Interesse.");
        assert_eq!(role.original_sentence, role.exact_sentence);
        assert_eq!(role.sentence(), "Die Umfrage zeigte großes Interesse.");
    }

    #[test]
    fn test_phase_serializes_as_label() {
        let json = serde_json::to_string(&Phase::Develop).unwrap();
        assert_eq!(json, "\"Develop\"");
        assert_eq!(Phase::Deliver.to_string(), "Deliver");
    }

    #[test]
    fn test_phased_entry_drops_day() {
        let entry = StructuredEntry::new("umfrage", "Ein Satz.", "d", "p", "a.txt");
        let phased = PhasedEntry::from_structured(entry, Phase::Discover);
        let json = serde_json::to_value(&phased).unwrap();
        assert!(json.get("day").is_none());
        assert_eq!(json["phase"], "Discover");
        assert_eq!(json["roles"]["citizen"]["exact_sentence"], "Ein Satz.");
    }
}
