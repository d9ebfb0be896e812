//! Assemble structured keyword entries from the ranked keyword report.

use std::path::Path;

use tracing::{debug, info};

use civicsift_core::{KeywordReport, StructuredEntry};
use civicsift_extract::extract_text;

use crate::linker::find_sentence_containing;
use crate::suggest::SuggestionGenerator;

/// Build one structured entry per (file, keyword) pair, preserving the
/// report's ordering. Empty phrases are skipped; everything else always
/// yields an entry, with the documented fallbacks filling the gaps.
pub async fn build_entries(
    report: &KeywordReport,
    generator: &SuggestionGenerator,
) -> Vec<StructuredEntry> {
    let mut entries = Vec::new();

    for file_entry in &report.results {
        // Re-read the recorded source; a moved or unreadable file degrades
        // to empty text and the example-sentence fallback takes over.
        let text = read_source_text(&file_entry.filepath);
        if text.is_empty() {
            debug!(
                "No source text for {}, relying on example sentences",
                file_entry.filename
            );
        }

        for ranked in &file_entry.keywords {
            let phrase = ranked.keyword.trim();
            if phrase.is_empty() {
                continue;
            }

            let sentence = find_sentence_containing(&text, phrase)
                .or_else(|| first_nonempty(&file_entry.example_sentences))
                .unwrap_or_default();

            let suggestions = generator.generate(phrase, &sentence).await;

            let source = if !file_entry.filepath.is_empty() {
                file_entry.filepath.clone()
            } else if !file_entry.filename.is_empty() {
                file_entry.filename.clone()
            } else {
                "unknown".to_string()
            };

            entries.push(StructuredEntry::new(
                phrase,
                sentence,
                suggestions.design_suggestion,
                suggestions.planning_suggestion,
                source,
            ));
        }
    }

    info!("Built {} structured keyword entries", entries.len());
    entries
}

fn read_source_text(filepath: &str) -> String {
    if filepath.is_empty() {
        return String::new();
    }
    let path = Path::new(filepath);
    if !path.exists() {
        return String::new();
    }
    extract_text(path).ok().flatten().unwrap_or_default()
}

fn first_nonempty(sentences: &[String]) -> Option<String> {
    sentences
        .iter()
        .find(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use civicsift_core::{FileKeywords, KeywordScore, ReportSummary};

    fn report_for(filepath: &str, keywords: &[&str], examples: &[&str]) -> KeywordReport {
        KeywordReport {
            summary: ReportSummary {
                files_processed: 1,
                generated_at: None,
            },
            results: vec![FileKeywords {
                filename: "interview.txt".into(),
                filepath: filepath.into(),
                keywords: keywords
                    .iter()
                    .map(|k| KeywordScore {
                        keyword: k.to_string(),
                        score: 0.5,
                    })
                    .collect(),
                example_sentences: examples.iter().map(|s| s.to_string()).collect(),
            }],
        }
    }

    #[tokio::test]
    async fn test_links_sentence_from_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.txt");
        std::fs::write(
            &path,
            "Einleitung ohne Inhalt. Die Umfrage zeigte großes Interesse an Sitzgelegenheiten.",
        )
        .unwrap();

        let report = report_for(path.to_str().unwrap(), &["umfrage"], &[]);
        let entries = build_entries(&report, &SuggestionGenerator::Disabled).await;

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.day, "");
        assert_eq!(
            entry.roles.citizen.exact_sentence,
            "Die Umfrage zeigte großes Interesse an Sitzgelegenheiten."
        );
        assert_eq!(
            entry.roles.citizen.original_sentence,
            entry.roles.citizen.exact_sentence
        );
        assert!(entry.roles.designer.design_suggestion.contains("umfrage"));
        assert!(entry.roles.planner.planning_suggestion.contains("umfrage"));
        assert_eq!(entry.source, path.to_str().unwrap());
    }

    #[tokio::test]
    async fn test_missing_source_falls_back_to_example_sentence() {
        let report = report_for(
            "/nonexistent/interview.txt",
            &["beleuchtung"],
            &["", "  Die Beleuchtung wurde oft erwähnt.  "],
        );
        let entries = build_entries(&report, &SuggestionGenerator::Disabled).await;

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].roles.citizen.exact_sentence,
            "Die Beleuchtung wurde oft erwähnt."
        );
    }

    #[tokio::test]
    async fn test_no_fallback_leaves_sentence_empty() {
        let report = report_for("", &["thema"], &[]);
        let entries = build_entries(&report, &SuggestionGenerator::Disabled).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].roles.citizen.exact_sentence, "");
        // Suggestions stay non-empty regardless
        assert!(!entries[0].roles.designer.design_suggestion.is_empty());
    }

    #[tokio::test]
    async fn test_empty_phrases_are_skipped() {
        let report = report_for("", &["", "  ", "sitzbank"], &[]);
        let entries = build_entries(&report, &SuggestionGenerator::Disabled).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].keyword, "sitzbank");
    }
}
