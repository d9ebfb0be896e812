//! Bulk archive download from the shared feedback folder.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::info;

use civicsift_core::{Error, Result};

/// Download the shared folder's bulk archive to `archive_file`.
///
/// An already-downloaded archive is reused as-is. Any HTTP failure is an
/// error; no partial file is left behind.
pub async fn download_archive(share_url: &str, archive_file: &Path) -> Result<PathBuf> {
    if archive_file.exists() {
        info!("Archive already exists: {}", archive_file.display());
        return Ok(archive_file.to_path_buf());
    }

    let url = format!("{}/download", share_url.trim_end_matches('/'));
    info!("Downloading feedback archive from {}", url);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    let tmp_path = archive_file.with_extension("zip.part");
    let mut file = tokio::fs::File::create(&tmp_path).await?;
    let mut stream = response.bytes_stream();
    let mut total: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                drop(file);
                let _ = tokio::fs::remove_file(&tmp_path).await;
                return Err(Error::Download(format!("stream read failed: {}", e)));
            }
        };
        total += bytes.len() as u64;
        file.write_all(&bytes).await?;
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp_path, archive_file).await?;
    info!(
        "Downloaded {} ({:.1} MB)",
        archive_file.display(),
        total as f64 / 1024.0 / 1024.0
    );
    Ok(archive_file.to_path_buf())
}
