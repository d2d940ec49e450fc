use crate::error::Result;
use crate::storage::utils::error::IntoStoreOpsError;
use async_recursion::async_recursion;
use std::path::Path;
use tokio::fs;

/// Trait for calculating the size of a folder.
pub trait UsageCalculator {
    /// Calculate the size of the folder at `path` in bytes.
    ///
    /// # Arguments
    /// * `path` - Directory to measure
    ///
    /// # Returns
    /// * `Result<u64>` - Accumulated size or detailed error information
    async fn folder_size(&self, path: &str) -> Result<u64>;
}

/// Folder size on the local filesystem.
///
/// The total starts from the size the platform reports for the directory
/// entry itself and adds each file, recursing into subdirectories. Directory
/// entry sizes are therefore counted at every level; this is not `du`.
pub struct LocalUsageCalculator;

impl LocalUsageCalculator {
    #[async_recursion]
    async fn accumulate(dir: &Path) -> Result<u64> {
        let mut total_size = fs::metadata(dir).await?.len();

        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let item_path = entry.path();
            // Follows symlinks; dangling links count as neither file nor directory.
            let Ok(meta) = fs::metadata(&item_path).await else {
                continue;
            };

            if meta.is_file() {
                total_size += meta.len();
            } else if meta.is_dir() {
                total_size += Self::accumulate(&item_path).await?;
            }
        }

        Ok(total_size)
    }
}

impl UsageCalculator for LocalUsageCalculator {
    async fn folder_size(&self, path: &str) -> Result<u64> {
        fs::metadata(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        Self::accumulate(Path::new(path)).await
    }
}
