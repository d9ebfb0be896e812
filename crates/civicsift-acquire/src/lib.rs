//! CivicSift Acquire — feedback archive download and candidate filtering.

pub mod download;
pub mod filter;

pub use download::download_archive;
pub use filter::{extract_and_filter, CandidateFile, ExcludedFile, FilterReport};
