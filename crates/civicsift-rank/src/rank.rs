//! The rank stage: walk extracted files, rank keyphrases per file, and
//! assemble the keyword report.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use civicsift_core::{Error, FileKeywords, KeywordReport, ReportSummary, Result};
use civicsift_extract::{clean_text, extract_text, sentences_with_keywords};

use crate::embedder::EmbedderBackend;
use crate::keyphrase::extract_keyphrases;

/// Extensions the rank stage reads.
const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt", "rtf"];

/// Filename fragments that mark a PDF as a research paper or journal,
/// which carries no citizen feedback.
const RESEARCH_KEYWORDS: &[&str] = &[
    "paper", "papers", "proceedings", "conference", "journal", "journal-", "etal", "doi",
    "study", "studies", "research", "maas_", "chi", "proceeding", "citizenneeds",
    "foundations", "display_value", "paper_chi",
];

/// Example sentences are gathered for this many of the top phrases.
const EXAMPLE_PHRASE_COUNT: usize = 8;

/// Example sentences kept per file.
const EXAMPLE_SENTENCE_COUNT: usize = 6;

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Only PDFs are flagged; transcripts and reports keep their filenames.
fn is_research_paper(path: &Path) -> bool {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return false;
    }
    let full = path.to_string_lossy().to_lowercase();
    RESEARCH_KEYWORDS.iter().any(|kw| full.contains(kw))
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if is_supported(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Compute SHA-256 content hash.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Rank keyphrases for every supported file under `extract_dir`.
///
/// Research-paper PDFs are skipped by filename heuristic, and duplicate
/// documents (identical extracted text) are processed once. Files that
/// yield no text are skipped; neither case is an error.
pub fn rank_directory(
    extract_dir: &Path,
    embedder: &dyn EmbedderBackend,
    top_n: usize,
) -> Result<KeywordReport> {
    if !extract_dir.exists() {
        return Err(Error::MissingArtifact(extract_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_files(extract_dir, &mut files)?;
    files.sort();

    let before = files.len();
    files.retain(|f| !is_research_paper(f));
    let skipped = before - files.len();
    if skipped > 0 {
        info!("Skipped {} files identified as research papers/journals", skipped);
    }
    info!("Found {} supported files under {}", files.len(), extract_dir.display());

    let mut seen_hashes: HashSet<String> = HashSet::new();
    let mut results = Vec::new();

    for path in &files {
        let text = match extract_text(path)? {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                debug!("No text extracted from {}, skipping", path.display());
                continue;
            }
        };

        let hash = content_hash(&text);
        if !seen_hashes.insert(hash) {
            debug!("Duplicate content, skipping: {}", path.display());
            continue;
        }

        let cleaned = clean_text(&text);
        let keywords = extract_keyphrases(&cleaned, embedder, top_n);

        let top_terms: Vec<String> = keywords
            .iter()
            .take(EXAMPLE_PHRASE_COUNT)
            .map(|k| k.keyword.clone())
            .collect();
        let mut example_sentences = sentences_with_keywords(&text, &top_terms);
        example_sentences.truncate(EXAMPLE_SENTENCE_COUNT);

        debug!(
            "Ranked {} keyphrases for {} ({} example sentences)",
            keywords.len(),
            path.display(),
            example_sentences.len()
        );

        results.push(FileKeywords {
            filename: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string(),
            filepath: path.to_string_lossy().to_string(),
            keywords,
            example_sentences,
        });
    }

    Ok(KeywordReport {
        summary: ReportSummary {
            files_processed: results.len(),
            generated_at: Some(chrono::Utc::now()),
        },
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::NoopEmbedder;

    #[test]
    fn test_research_paper_heuristic() {
        assert!(is_research_paper(Path::new("x/maas_etal_2020.pdf")));
        assert!(is_research_paper(Path::new("paper_chi.PDF")));
        // Same keyword in a transcript filename is fine
        assert!(!is_research_paper(Path::new("research_interview.txt")));
        assert!(!is_research_paper(Path::new("notes.pdf.bak")));
    }

    #[test]
    fn test_rank_directory_skips_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let body = "Die Umfrage zeigte großes Interesse an mehr Sitzgelegenheiten. \
                    Viele Bürger wünschen sich bessere Beleuchtung am Abend.";
        std::fs::write(dir.path().join("interview_a.txt"), body).unwrap();
        std::fs::write(dir.path().join("interview_b.txt"), body).unwrap();
        std::fs::write(dir.path().join("interview_c.txt"), "").unwrap();

        let embedder = NoopEmbedder::new(384);
        let report = rank_directory(dir.path(), &embedder, 10).unwrap();

        assert_eq!(report.summary.files_processed, 1);
        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(result.filename, "interview_a.txt");
        assert!(!result.keywords.is_empty());
        assert!(result
            .keywords
            .iter()
            .any(|k| k.keyword.contains("umfrage") || k.keyword.contains("sitzgelegenheiten")));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let embedder = NoopEmbedder::new(384);
        let err = rank_directory(&dir.path().join("extracted"), &embedder, 10).unwrap_err();
        assert!(matches!(err, Error::MissingArtifact(_)));
    }
}
