//! CivicSift Extract — per-format text extraction, cleaning, keyword bags.

pub mod clean;
pub mod sentences;
pub mod text;

pub use clean::{clean_text, extract_keywords, is_stopword, tokenize};
pub use sentences::sentences_with_keywords;
pub use text::{extract_text, FileType};
