//! CivicSift Structure — evidence linking and entry assembly.
//!
//! Links each ranked keyphrase to its most representative source sentence,
//! synthesizes design/planning suggestions, and assembles the pipeline's
//! central structured keyword entries.

pub mod builder;
pub mod linker;
pub mod suggest;

pub use builder::build_entries;
pub use linker::find_sentence_containing;
pub use suggest::{RemoteGenerator, SuggestionGenerator, Suggestions};
