//! CivicSift — citizen-feedback text-mining pipeline.
//!
//! Each subcommand runs one pipeline stage; `run` runs them all in order.
//! Stages communicate only through the JSON artifacts in the data
//! directory, so any stage can be re-run in isolation.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use civicsift_core::{load_json, write_json, KeywordReport, PipelineConfig};
use civicsift_structure::SuggestionGenerator;

fn resolve_data_dir() -> PathBuf {
    std::env::var("CIVICSIFT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn load_config() -> anyhow::Result<PipelineConfig> {
    Ok(PipelineConfig::from_env(resolve_data_dir())?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "acquire" => cmd_acquire().await?,
        "rank" => cmd_rank()?,
        "structure" => cmd_structure().await?,
        "phase" => cmd_phase()?,
        "run" => {
            cmd_acquire().await?;
            cmd_rank()?;
            cmd_structure().await?;
            cmd_phase()?;
        }
        "help" | "--help" | "-h" => print_help(),
        other => {
            eprintln!("Unknown command: {}. Use 'civicsift help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Stage 1: download the feedback archive (if needed) and extract the
/// interview-related candidate files.
async fn cmd_acquire() -> anyhow::Result<()> {
    let config = load_config()?;
    let paths = &config.data_paths;

    if !paths.archive_file.exists() {
        let share_url = config.share_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "no archive at {} and CIVICSIFT_SHARE_URL is not set",
                paths.archive_file.display()
            )
        })?;
        civicsift_acquire::download_archive(share_url, &paths.archive_file).await?;
    }

    let report = civicsift_acquire::extract_and_filter(&paths.archive_file, &paths.extracted)?;
    info!(
        "{} interview-related files ready under {} ({} excluded)",
        report.candidates.len(),
        paths.extracted.display(),
        report.excluded.len()
    );
    Ok(())
}

/// Stage 2: rank keyphrases per extracted file and write the keyword report.
fn cmd_rank() -> anyhow::Result<()> {
    let config = load_config()?;
    let paths = &config.data_paths;

    let embedder = civicsift_rank::create_embedder(&paths.models);
    let report =
        civicsift_rank::rank_directory(&paths.extracted, embedder.as_ref(), config.top_n)?;
    write_json(&paths.keywords_file, &report)?;
    info!(
        "Saved keyphrases for {} files to {}",
        report.summary.files_processed,
        paths.keywords_file.display()
    );
    Ok(())
}

/// Stage 3: link evidence sentences, synthesize suggestions, and write the
/// structured keyword entries.
async fn cmd_structure() -> anyhow::Result<()> {
    let config = load_config()?;
    let paths = &config.data_paths;

    let report: KeywordReport = load_json(&paths.keywords_file)?;
    let generator = SuggestionGenerator::from_config(&config.suggestions);
    let entries = civicsift_structure::build_entries(&report, &generator).await;
    write_json(&paths.structured_file, &entries)?;
    info!(
        "Wrote {} entries to {}",
        entries.len(),
        paths.structured_file.display()
    );
    Ok(())
}

/// Stage 4: classify each entry into a project phase.
fn cmd_phase() -> anyhow::Result<()> {
    let config = load_config()?;
    let paths = &config.data_paths;

    let count = civicsift_phase::run_stage(&paths.structured_file, &paths.phased_file)?;
    info!("Assigned phases to {} entries", count);
    Ok(())
}

fn print_help() {
    println!("CivicSift — citizen-feedback text-mining pipeline");
    println!();
    println!("Usage: civicsift <command>");
    println!();
    println!("Commands:");
    println!("  acquire     Download the feedback archive and extract candidate files");
    println!("  rank        Rank keyphrases per file (keybert_keywords.json)");
    println!("  structure   Build structured keyword entries (structured_keywords.json)");
    println!("  phase       Assign project phases (structured_keywords_phased.json)");
    println!("  run         Run all stages in order");
    println!("  help        Show this help message");
    println!();
    println!("Environment:");
    println!("  CIVICSIFT_DATA_DIR    Data directory (default: data)");
    println!("  CIVICSIFT_SHARE_URL   Shared folder the archive is downloaded from");
    println!("  CIVICSIFT_API_TOKEN   Enables generative suggestions when set");
    println!("  CIVICSIFT_MODEL       Model id for generative suggestions");
    println!("  CIVICSIFT_TOP_N       Keyphrases kept per file (default: 20)");
}
