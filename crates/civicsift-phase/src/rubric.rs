//! Phase rubrics: four fixed keyword categories compiled once into
//! whole-word, case-insensitive patterns, held in tie-break order.

use once_cell::sync::Lazy;
use regex::Regex;

use civicsift_core::Phase;

pub const DISCOVER_TERMS: &[&str] = &[
    "interview", "survey", "feedback", "research", "usability", "test", "workshop", "frage",
    "umfrage", "evaluation", "bericht", "quotes", "responses",
];

pub const DEFINE_TERMS: &[&str] = &[
    "priorit", "priority", "zusammenfassung", "analyse", "problem", "concern", "bedarf",
    "priorisier", "synthes", "define", "summary",
];

pub const DEVELOP_TERMS: &[&str] = &[
    "design", "prototype", "mockup", "widget", "interaction", "ux", "ui", "layout", "skizzen",
    "feature", "funktion", "karte", "filter", "visual", "gamification",
];

pub const DELIVER_TERMS: &[&str] = &[
    "deploy", "pilot", "rollout", "implement", "integration", "publish", "veroeffentlichung",
    "launch", "betrieb", "operate", "produktion", "plan", "planung", "ticketing",
];

/// Fixed boost when the citizen sentence carries a discovery signal.
pub const CITIZEN_DISCOVER_BOOST: f64 = 0.5;
/// Fixed boost for a non-empty designer suggestion.
pub const DESIGNER_DEVELOP_BOOST: f64 = 0.4;
/// Fixed boost for a non-empty planner suggestion.
pub const PLANNER_DELIVER_BOOST: f64 = 0.4;

/// One phase's compiled term set.
pub struct Rubric {
    pub phase: Phase,
    patterns: Vec<Regex>,
}

impl Rubric {
    fn new(phase: Phase, terms: &[&str]) -> Self {
        let patterns = terms
            .iter()
            .map(|term| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).unwrap())
            .collect();
        Self { phase, patterns }
    }

    /// Normalized hit ratio: matched terms over total terms. Term counts
    /// differ per rubric, so raw hit counts are not comparable without this.
    pub fn hit_ratio(&self, text: &str) -> f64 {
        if self.patterns.is_empty() {
            return 0.0;
        }
        let hits = self.patterns.iter().filter(|p| p.is_match(text)).count();
        hits as f64 / self.patterns.len() as f64
    }

    pub fn matches_any(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// All rubrics in `Phase::ORDER`, the same order that breaks score ties.
pub static RUBRICS: Lazy<Vec<Rubric>> = Lazy::new(|| {
    vec![
        Rubric::new(Phase::Discover, DISCOVER_TERMS),
        Rubric::new(Phase::Define, DEFINE_TERMS),
        Rubric::new(Phase::Develop, DEVELOP_TERMS),
        Rubric::new(Phase::Deliver, DELIVER_TERMS),
    ]
});
