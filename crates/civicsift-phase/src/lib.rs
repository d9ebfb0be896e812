//! CivicSift Phase — rubric scoring and phase assignment.

pub mod classify;
pub mod rubric;

pub use classify::classify;
pub use rubric::Rubric;

use std::path::Path;

use tracing::info;

use civicsift_core::{load_json, write_json, PhasedEntry, Result, StructuredEntry};

/// The phase stage: read structured entries, classify each, drop the
/// transient `day` field, add `phase`, and write the phased dataset in the
/// same order. Returns the number of entries written.
pub fn run_stage(structured_file: &Path, phased_file: &Path) -> Result<usize> {
    let entries: Vec<StructuredEntry> = load_json(structured_file)?;

    let phased: Vec<PhasedEntry> = entries
        .into_iter()
        .map(|entry| {
            let phase = classify(&entry);
            PhasedEntry::from_structured(entry, phase)
        })
        .collect();

    write_json(phased_file, &phased)?;
    info!("Wrote {} entries to {}", phased.len(), phased_file.display());
    Ok(phased.len())
}
