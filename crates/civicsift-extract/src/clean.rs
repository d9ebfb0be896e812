//! Text cleaning and stopword filtering for German/English feedback documents.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// German and English stopwords (basic set).
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    // German stopwords
    for w in &[
        "der", "die", "das", "und", "oder", "aber", "auch", "noch", "nicht", "ist", "sind",
        "war", "waren", "haben", "hat", "hatte", "hatten", "werden", "wird", "wurde", "wurden",
        "sein", "seine", "seiner", "ich", "du", "er", "sie", "es", "wir", "ihr", "mich", "dich",
        "sich", "uns", "euch", "ihm", "ihnen", "mir", "dir", "ein", "eine", "einer", "eines",
        "einem", "einen", "auf", "aus", "bei", "mit", "nach", "von", "zu", "an", "in", "für",
        "über", "unter", "durch", "gegen", "ohne", "um", "vor", "zwischen", "dass", "wenn",
        "weil", "da", "als", "wie", "wo", "was", "wer", "welche", "welcher", "welches",
        "dieser", "diese", "dieses", "jeder", "jede", "jedes", "alle", "alles", "viele",
        "wenige", "mehr", "weniger", "sehr", "ganz", "gar", "nur", "schon",
    ] {
        set.insert(*w);
    }
    // English stopwords
    for w in &[
        "the", "a", "an", "and", "or", "but", "on", "at", "to", "for", "of", "with", "by",
        "from", "up", "about", "into", "through", "during", "before", "after", "above",
        "below", "between", "among", "throughout", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "do", "does", "did", "will", "would", "could",
        "should", "may", "might", "must", "can", "shall", "ought", "need", "dare", "i",
        "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "mine", "yours", "ours", "theirs", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
        "this", "that", "these", "those", "what", "which", "who", "whom", "whose", "where",
        "when", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other",
        "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
        "very", "just", "now",
    ] {
        set.insert(*w);
    }
    // Domain stopwords: terms every feedback document mentions, useless as keyphrases
    for w in &[
        "display", "screen", "digital", "public", "system", "user", "users", "interface",
        "technology", "page", "document", "file", "pdf", "docx", "text", "content",
    ] {
        set.insert(*w);
    }
    set
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPECIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\wäöüÄÖÜß\s.,!?;:\-]").unwrap());

pub fn is_stopword(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Word tokens of already-cleaned text: letter runs, punctuation dropped.
pub fn tokenize(cleaned: &str) -> Vec<&str> {
    cleaned
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Clean and normalize text: collapse whitespace, drop special characters
/// (keeping umlauts and basic punctuation), lowercase.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = WHITESPACE_RE.replace_all(text, " ");
    let text = SPECIAL_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.to_lowercase().trim().to_string()
}

/// Extract the keyword bag from raw text: cleaned, stopword-filtered words
/// of 3–20 characters.
pub fn extract_keywords(text: &str) -> Vec<String> {
    extract_keywords_bounded(text, 3, 20)
}

pub fn extract_keywords_bounded(text: &str, min_length: usize, max_length: usize) -> Vec<String> {
    let cleaned = clean_text(text);
    if cleaned.is_empty() {
        return Vec::new();
    }

    tokenize(&cleaned)
        .into_iter()
        .filter(|w| {
            let len = w.chars().count();
            len >= min_length && len <= max_length && !is_stopword(w)
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_keeps_umlauts() {
        let cleaned = clean_text("Die  Bürger*innen   wünschen\tmehr Sitzgelegenheiten!");
        assert_eq!(cleaned, "die bürger innen wünschen mehr sitzgelegenheiten!");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_extract_keywords_filters_stopwords() {
        let keywords = extract_keywords("Die Umfrage und der Bericht zeigen Interesse");
        assert!(keywords.contains(&"umfrage".to_string()));
        assert!(keywords.contains(&"bericht".to_string()));
        assert!(!keywords.contains(&"die".to_string()));
        assert!(!keywords.contains(&"und".to_string()));
    }

    #[test]
    fn test_extract_keywords_length_bounds() {
        let keywords = extract_keywords_bounded("ab abc abcd", 3, 3);
        assert_eq!(keywords, vec!["abc"]);
    }
}
