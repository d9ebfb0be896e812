//! CivicSift Core — shared error type, configuration, pipeline data model.

pub mod artifact;
pub mod config;
pub mod error;
pub mod types;

pub use artifact::{load_json, write_json};
pub use config::{DataPaths, PipelineConfig, SuggestionConfig};
pub use error::{Error, Result};
pub use types::{
    CitizenRole, DesignerRole, FileKeywords, KeywordReport, KeywordScore, Phase, PhasedEntry,
    PlannerRole, ReportSummary, Roles, StructuredEntry,
};
