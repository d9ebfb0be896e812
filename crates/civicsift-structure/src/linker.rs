//! Evidence linking: find the source sentence that best illustrates a
//! keyword phrase.
//!
//! Pure functions of their inputs; empty text and failed lookups return
//! `None` and the caller applies the example-sentence fallback.

/// Split text into sentence-like segments (no lookbehind — Rust regex
/// doesn't support it, so this is a manual scan).
///
/// A segment ends where a boundary character (`.`, `!`, `?`, or a newline)
/// is immediately followed by a whitespace run; the run is the separator
/// and the boundary character stays with the segment. Abbreviation periods
/// split too; callers rely on this exact segmentation.
fn split_segments(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let is_boundary = b == b'.' || b == b'!' || b == b'?' || b == b'\n';
        if is_boundary && i + 1 < bytes.len() && bytes[i + 1].is_ascii_whitespace() {
            segments.push(&text[start..=i]);
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    if start < bytes.len() {
        segments.push(&text[start..]);
    }
    segments
}

/// Return the best sentence illustrating `phrase` in `text`.
///
/// Pass 1 scans segments for the phrase verbatim (case-insensitive
/// substring); first match wins. Pass 2 re-scans, splitting each segment on
/// commas, and returns the first sub-clause containing any phrase token
/// longer than 2 characters. Both passes failing, or empty text, yields
/// `None`.
pub fn find_sentence_containing(text: &str, phrase: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let segments = split_segments(text);
    let phrase_lower = phrase.to_lowercase();

    // First try the exact phrase
    for segment in &segments {
        if segment.to_lowercase().contains(&phrase_lower) {
            return Some(segment.trim().to_string());
        }
    }

    // Fallback: split by commas and try individual phrase tokens
    let tokens: Vec<&str> = phrase_lower
        .split_whitespace()
        .filter(|tok| tok.chars().count() > 2)
        .collect();
    for segment in &segments {
        for part in segment.split(',') {
            let part_lower = part.to_lowercase();
            if tokens.iter().any(|tok| part_lower.contains(tok)) {
                return Some(part.trim().to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_phrase_wins_first() {
        let text = "Die Beleuchtung ist schlecht. Die Umfrage zeigte großes Interesse an \
                    mehr Sitzgelegenheiten. Die Umfrage lief zwei Wochen.";
        let sentence = find_sentence_containing(text, "Umfrage").unwrap();
        assert_eq!(
            sentence,
            "Die Umfrage zeigte großes Interesse an mehr Sitzgelegenheiten."
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let text = "wir sahen die UMFRAGE als hilfreich an.";
        assert!(find_sentence_containing(text, "Umfrage").is_some());
    }

    #[test]
    fn test_token_fallback_returns_sub_clause() {
        // "bessere beleuchtung" never occurs verbatim, but the token
        // "beleuchtung" sits in the second comma clause.
        let text = "Viele wünschten sich mehr Bänke, hellere Beleuchtung am Abend, und Schatten.";
        let sentence = find_sentence_containing(text, "bessere Beleuchtung").unwrap();
        assert_eq!(sentence, "hellere Beleuchtung am Abend");
    }

    #[test]
    fn test_newline_acts_as_boundary() {
        let text = "Erste Zeile ohne Punkt.\nUmfrage in der zweiten Zeile.";
        let sentence = find_sentence_containing(text, "umfrage").unwrap();
        assert_eq!(sentence, "Umfrage in der zweiten Zeile.");
    }

    #[test]
    fn test_abbreviation_periods_split_segments() {
        // "Dr." ends a segment; the phrase is still found in the remainder.
        let text = "Dr. Meier lobte die Umfrage sehr.";
        let sentence = find_sentence_containing(text, "umfrage").unwrap();
        assert_eq!(sentence, "Meier lobte die Umfrage sehr.");
    }

    #[test]
    fn test_empty_text_yields_none() {
        assert!(find_sentence_containing("", "umfrage").is_none());
    }

    #[test]
    fn test_no_match_yields_none() {
        assert!(find_sentence_containing("Ganz anderes Thema hier.", "umfrage").is_none());
    }

    #[test]
    fn test_short_tokens_never_match_pass_two() {
        // All phrase tokens are ≤2 chars, so the token fallback cannot fire.
        let text = "ab und zu kommt es vor, cd steht hier auch.";
        assert!(find_sentence_containing(text, "ab cd").is_none());
    }
}
