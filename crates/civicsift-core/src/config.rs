//! Configuration and data directory management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default model id for the remote suggestion generator.
pub const DEFAULT_SUGGESTION_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Default number of ranked keyphrases per file.
pub const DEFAULT_TOP_N: usize = 20;

/// Paths to all CivicSift data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Downloaded archives (`data/downloads/`).
    pub downloads: PathBuf,
    /// Filtered candidate files extracted from the archive (`data/extracted/`).
    pub extracted: PathBuf,
    /// Embedding model files (`data/models/`).
    pub models: PathBuf,
    /// The feedback archive (`data/downloads/feedback_files.zip`).
    pub archive_file: PathBuf,
    /// Rank stage output (`data/keybert_keywords.json`).
    pub keywords_file: PathBuf,
    /// Structure stage output (`data/structured_keywords.json`).
    pub structured_file: PathBuf,
    /// Phase stage output (`data/structured_keywords_phased.json`).
    pub phased_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let downloads = root.join("downloads");
        let paths = Self {
            archive_file: downloads.join("feedback_files.zip"),
            extracted: root.join("extracted"),
            models: root.join("models"),
            keywords_file: root.join("keybert_keywords.json"),
            structured_file: root.join("structured_keywords.json"),
            phased_file: root.join("structured_keywords_phased.json"),
            downloads,
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.downloads)?;
        std::fs::create_dir_all(&self.extracted)?;
        std::fs::create_dir_all(&self.models)?;
        Ok(())
    }
}

/// Generative suggestion path configuration.
///
/// The path is enabled by the presence of an API token; without one the
/// pipeline emits deterministic placeholder suggestions.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    pub enabled: bool,
    pub model: String,
    pub api_token: Option<String>,
}

/// Top-level pipeline configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_paths: DataPaths,
    /// Shared-folder URL the archive is downloaded from.
    pub share_url: Option<String>,
    pub suggestions: SuggestionConfig,
    /// Ranked keyphrases kept per file.
    pub top_n: usize,
}

impl PipelineConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let data_paths = DataPaths::new(data_dir)?;

        let share_url = std::env::var("CIVICSIFT_SHARE_URL").ok();
        let api_token = std::env::var("CIVICSIFT_API_TOKEN").ok();
        let model = std::env::var("CIVICSIFT_MODEL")
            .unwrap_or_else(|_| DEFAULT_SUGGESTION_MODEL.to_string());
        let top_n = std::env::var("CIVICSIFT_TOP_N")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_TOP_N);

        Ok(Self {
            data_paths,
            share_url,
            suggestions: SuggestionConfig {
                enabled: api_token.is_some(),
                model,
                api_token,
            },
            top_n,
        })
    }
}
