//! File text extraction for the feedback document formats.
//!
//! Extraction never fails the pipeline: unsupported formats and unreadable
//! files degrade to `None`, which callers treat as empty text.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use civicsift_core::Result;

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Rtf,
    Docx,
    DocLegacy,
    Pdf,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "md" => Self::PlainText,
            "rtf" => Self::Rtf,
            "docx" => Self::Docx,
            "doc" => Self::DocLegacy,
            "pdf" => Self::Pdf,
            _ => Self::Unknown,
        }
    }
}

/// Extract text content from a file.
pub fn extract_text(path: &Path) -> Result<Option<String>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let file_type = FileType::from_extension(ext);

    match file_type {
        // RTF is read raw; its control words are stripped later by cleaning.
        FileType::PlainText | FileType::Rtf => Ok(Some(read_text_lossy(path)?)),
        FileType::Docx => extract_docx(path),
        FileType::DocLegacy => {
            tracing::warn!(
                "Legacy .doc extraction not supported, skipping: {}",
                path.display()
            );
            Ok(None)
        }
        FileType::Pdf => extract_pdf(path),
        FileType::Unknown => {
            // Try reading as text
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    // Basic check: if content has too many control bytes, skip it
                    if content
                        .chars()
                        .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
                        .count()
                        > content.len() / 10
                    {
                        Ok(None) // Likely binary
                    } else {
                        Ok(Some(content))
                    }
                }
                Err(_) => Ok(None), // Binary file
            }
        }
    }
}

/// Read a file as UTF-8, falling back to Latin-1 for older exports.
fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => Ok(e.into_bytes().iter().map(|&b| b as char).collect()),
    }
}

static XML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Extract text from a DOCX container: pull `word/document.xml` and strip
/// the markup, keeping paragraph breaks.
fn extract_docx(path: &Path) -> Result<Option<String>> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Cannot open DOCX {}: {}", path.display(), e);
            return Ok(None);
        }
    };
    let mut archive = match zip::ZipArchive::new(file) {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!("Invalid DOCX container {}: {}", path.display(), e);
            return Ok(None);
        }
    };
    let mut xml = String::new();
    {
        use std::io::Read;
        let mut entry = match archive.by_name("word/document.xml") {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("No document body in DOCX {}: {}", path.display(), e);
                return Ok(None);
            }
        };
        if let Err(e) = entry.read_to_string(&mut xml) {
            tracing::warn!("Cannot read DOCX body {}: {}", path.display(), e);
            return Ok(None);
        }
    }

    // Paragraph and tab boundaries become whitespace before tags are dropped.
    let xml = xml
        .replace("</w:p>", "\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", " ");
    let text = XML_TAG_RE.replace_all(&xml, "");
    let text = decode_entities(&text);

    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<Option<String>> {
    match pdf_extract::extract_text(path) {
        Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
        Ok(_) => Ok(None),
        Err(e) => {
            tracing::warn!("PDF extraction failed for {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> Result<Option<String>> {
    tracing::warn!(
        "PDF support disabled (enable the `pdf` feature), skipping: {}",
        path.display()
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("TXT"), FileType::PlainText);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension("doc"), FileType::DocLegacy);
        assert_eq!(FileType::from_extension("bin"), FileType::Unknown);
    }

    #[test]
    fn test_extract_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.txt");
        std::fs::write(&path, "Die Umfrage zeigte Interesse.").unwrap();
        let text = extract_text(&path).unwrap().unwrap();
        assert!(text.contains("Umfrage"));
    }

    #[test]
    fn test_extract_latin1_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bericht.txt");
        // "Rückmeldung" in Latin-1
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"R\xfcckmeldung zum Test").unwrap();
        drop(f);
        let text = extract_text(&path).unwrap().unwrap();
        assert!(text.contains("Rückmeldung"));
    }

    #[test]
    fn test_extract_docx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.docx");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer
            .write_all(
                b"<w:document><w:body><w:p><w:r><w:t>Erster Satz.</w:t></w:r></w:p>\
                  <w:p><w:r><w:t>Zweiter Satz &amp; mehr.</w:t></w:r></w:p></w:body></w:document>",
            )
            .unwrap();
        writer.finish().unwrap();

        let text = extract_text(&path).unwrap().unwrap();
        assert!(text.contains("Erster Satz."));
        assert!(text.contains("Zweiter Satz & mehr."));
        // Paragraphs stay on separate lines
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_legacy_doc_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alt.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0old word binary").unwrap();
        assert!(extract_text(&path).unwrap().is_none());
    }
}
