//! Example-sentence extraction for ranked keyphrases.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Sentences from `text` that contain any of the given keywords
/// (case-insensitive). Very short fragments are skipped.
pub fn sentences_with_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    if text.is_empty() || keywords.is_empty() {
        return Vec::new();
    }

    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > 20)
        .filter(|s| {
            let sentence_lower = s.to_lowercase();
            lowered.iter().any(|k| sentence_lower.contains(k))
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_keyword_sentences() {
        let text = "Kurzer Satz. Die Umfrage zeigte großes Interesse an Sitzgelegenheiten. \
                    Ganz andere Themen kamen ebenfalls zur Sprache.";
        let sentences =
            sentences_with_keywords(text, &["umfrage".to_string()]);
        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].contains("Umfrage"));
    }

    #[test]
    fn test_skips_short_fragments() {
        let sentences = sentences_with_keywords("Umfrage gut.", &["umfrage".to_string()]);
        assert!(sentences.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(sentences_with_keywords("", &["x".to_string()]).is_empty());
        assert!(sentences_with_keywords("Some text here.", &[]).is_empty());
    }
}
