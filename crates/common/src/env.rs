//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists, creating it when missing.
pub async fn ensure_data_dir(data_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let data_dir = data_dir.as_ref();
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(anyhow::anyhow!("{} exists but is not a directory", data_dir.display()));
        }
        Err(_) => {
            warn!(data_dir = %data_dir.display(), "data directory not found; creating it");
        }
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    info!(data_dir = %data_dir.display(), "data directory ready");
    Ok(())
}
