//! CivicSift Rank — embedding backends and keyphrase ranking.
//!
//! Provides the `EmbedderBackend` trait for sentence embeddings. When the
//! `onnx` feature is enabled and model files are present, `OnnxEmbedder`
//! loads all-MiniLM-L6-v2 for 384-dim embeddings and keyphrases are ranked
//! by cosine relevance with MMR re-ranking. Without it, `NoopEmbedder` is
//! used and ranking falls back to term frequency.

pub mod embedder;
pub mod keyphrase;
pub mod onnx;
pub mod rank;

pub use embedder::{EmbedderBackend, NoopEmbedder};
pub use keyphrase::extract_keyphrases;
pub use rank::{content_hash, rank_directory};

#[cfg(feature = "onnx")]
pub use onnx::OnnxEmbedder;

use std::path::Path;
use std::sync::Arc;

/// Create the best available embedder for the given model directory.
///
/// Tries ONNX first (if the feature is enabled and model files are present),
/// falls back to `NoopEmbedder` and frequency-based ranking.
pub fn create_embedder(model_dir: &Path) -> Arc<dyn EmbedderBackend> {
    #[cfg(feature = "onnx")]
    {
        match OnnxEmbedder::load(model_dir) {
            Ok(embedder) => {
                tracing::info!("Using ONNX embedder (dim={})", embedder.dimension());
                return Arc::new(embedder);
            }
            Err(e) => {
                tracing::warn!(
                    "ONNX embedder unavailable: {}. Falling back to frequency ranking.",
                    e
                );
            }
        }
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = model_dir;
        tracing::info!("ONNX feature disabled. Using frequency-based keyphrase ranking.");
    }

    Arc::new(NoopEmbedder::new(384))
}
