//! Filename-keyword filtering of archive entries.
//!
//! Interview transcripts, feedback reports and usability test reports are
//! the candidate set; research papers and project housekeeping files are
//! not. All checks are case-insensitive substring matches on the filename.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use civicsift_core::{Error, Result};

/// File extensions worth extracting at all.
const RELEVANT_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt", "rtf"];

/// Keywords that suggest interview files, feedback reports, and usability
/// test reports (English and German).
const TARGET_CONTENT_KEYWORDS: &[&str] = &[
    // Interview files
    "interview", "befragung", "gespräch", "leitfaden", "filled",
    // Feedback reports
    "feedback", "evaluation", "bewertung", "rückmeldung",
    // Usability test reports
    "usability", "test", "testing", "bericht", "testbericht", "ux-evaluation", "user",
    "survey", "questionnaire", "umfrage",
];

/// Keywords that suggest research papers, excluded from the candidate set.
const RESEARCH_PAPER_KEYWORDS: &[&str] = &[
    "paper", "chi2020", "foundations", "designing", "maas", "etal", "citizenneeds", "hubbel",
    "display_value", "interactive_displays", "pdf",
];

/// Other content to exclude.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "admin", "config", "setup", "install", "readme", "license", "changelog", "version",
    "backup", "doku", "fahrplan", "katalog", "widget",
];

/// A candidate file extracted from the archive.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
    pub original_path: String,
    pub is_interview_related: bool,
    pub size: u64,
}

/// An archive entry rejected by the filter.
#[derive(Debug, Clone)]
pub struct ExcludedFile {
    pub name: String,
    pub reason: &'static str,
}

/// Outcome of one archive filtering pass.
#[derive(Debug, Default)]
pub struct FilterReport {
    pub candidates: Vec<CandidateFile>,
    pub excluded: Vec<ExcludedFile>,
}

fn has_any(filename_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| filename_lower.contains(kw))
}

pub fn is_relevant_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| RELEVANT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Housekeeping/documentation files that are never interview content.
pub fn is_excluded(filename: &str) -> bool {
    has_any(&filename.to_lowercase(), EXCLUDE_KEYWORDS)
}

/// A filename is a candidate iff it carries a target-content keyword and
/// neither a research-paper keyword nor a general exclusion keyword.
pub fn is_candidate(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    has_any(&lower, TARGET_CONTENT_KEYWORDS)
        && !has_any(&lower, RESEARCH_PAPER_KEYWORDS)
        && !has_any(&lower, EXCLUDE_KEYWORDS)
}

/// Walk the archive, extract candidate files into `extract_dir`, and report
/// what was kept and what was rejected. Per-entry failures are logged and
/// skipped; only an unreadable archive is fatal.
pub fn extract_and_filter(zip_path: &Path, extract_dir: &Path) -> Result<FilterReport> {
    let file = std::fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::Archive(format!("{}: {}", zip_path.display(), e)))?;

    info!("Found {} entries in {}", archive.len(), zip_path.display());

    let mut report = FilterReport::default();

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(e) => e,
            Err(e) => {
                warn!("Unreadable archive entry #{}: {}", index, e);
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }

        let original_path = entry.name().to_string();
        let filename = Path::new(&original_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        // Skip directories-in-disguise and hidden files
        if filename.is_empty() || filename.starts_with('.') {
            continue;
        }
        if !is_relevant_extension(&filename) {
            continue;
        }

        if is_excluded(&filename) {
            debug!("Skipping {} (project housekeeping)", filename);
            report.excluded.push(ExcludedFile {
                name: filename,
                reason: "project housekeeping / documentation",
            });
            continue;
        }

        if !is_candidate(&filename) {
            debug!("Skipping {} (not interview-related)", filename);
            continue;
        }

        // Zip-slip guard: only extract entries that resolve inside extract_dir
        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping entry with unsafe path: {}", original_path);
            continue;
        };
        let out_path = extract_dir.join(relative);
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out_file = std::fs::File::create(&out_path)?;
        if let Err(e) = io::copy(&mut entry, &mut out_file) {
            warn!("Error extracting {}: {}", original_path, e);
            continue;
        }

        let size = std::fs::metadata(&out_path).map(|m| m.len()).unwrap_or(0);
        debug!("Extracted {} ({} bytes)", filename, size);
        report.candidates.push(CandidateFile {
            name: filename,
            path: out_path,
            original_path,
            is_interview_related: true,
            size,
        });
    }

    info!(
        "Extracted {} interview-related files, excluded {}",
        report.candidates.len(),
        report.excluded.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_relevant_extensions() {
        assert!(is_relevant_extension("Interview_01.TXT"));
        assert!(is_relevant_extension("bericht.docx"));
        assert!(!is_relevant_extension("foto.jpg"));
        assert!(!is_relevant_extension("no_extension"));
    }

    #[test]
    fn test_candidate_rules() {
        assert!(is_candidate("Usability_Testbericht_Mai.docx"));
        assert!(is_candidate("Interview_Leitfaden_filled.txt"));
        // Target keyword but also a research-paper keyword
        assert!(!is_candidate("interview_paper_chi2020.txt"));
        // Target keyword but housekeeping
        assert!(!is_candidate("testbericht_readme.txt"));
        // No target keyword at all
        assert!(!is_candidate("notizen.txt"));
    }

    fn build_archive(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, body) in [
            ("runde1/Interview_Fragen.txt", "Wie finden Sie die Anzeige?"),
            ("runde1/README.txt", "internal notes"),
            ("runde1/.hidden.txt", "secret"),
            ("runde1/foto.jpg", "jpegdata"),
            ("Usability_Testbericht.txt", "Der Test verlief gut."),
        ] {
            writer.start_file(name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_and_filter() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("feedback_files.zip");
        let extract_dir = dir.path().join("extracted");
        std::fs::create_dir_all(&extract_dir).unwrap();
        build_archive(&zip_path);

        let report = extract_and_filter(&zip_path, &extract_dir).unwrap();

        let names: Vec<&str> = report.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Interview_Fragen.txt", "Usability_Testbericht.txt"]);
        assert!(report.candidates.iter().all(|c| c.is_interview_related));
        assert!(report.candidates.iter().all(|c| c.path.exists() && c.size > 0));

        assert_eq!(report.excluded.len(), 1);
        assert_eq!(report.excluded[0].name, "README.txt");
    }

    #[test]
    fn test_missing_archive_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_and_filter(&dir.path().join("nope.zip"), dir.path());
        assert!(result.is_err());
    }
}
