use crate::error::{NotAFileSnafu, Result};
use crate::storage::constants::DEFAULT_BUFFER_SIZE;
use crate::storage::utils::error::IntoStoreOpsError;
use opendal::Operator;
use snafu::ensure;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

/// Trait for uploading local files to storage.
pub trait Uploader {
    /// Upload a single local file to remote storage.
    ///
    /// # Arguments
    /// * `local_path` - Source file on the local filesystem
    /// * `remote_path` - Destination key in storage
    ///
    /// # Returns
    /// * `Result<u64>` - Number of bytes written, or detailed error information
    async fn upload(&self, local_path: &str, remote_path: &str) -> Result<u64>;
}

/// Implementation of Uploader for OpenDAL Operator.
pub struct OpenDalUploader {
    operator: Operator,
}

impl OpenDalUploader {
    /// Create a new uploader with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Copy the file into a remote writer one buffer at a time.
    async fn upload_file_streaming(&self, local_path: &Path, remote_path: &str) -> Result<u64> {
        let file = fs::File::open(local_path).await?;
        let mut reader = BufReader::new(file);
        let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
        let mut total_bytes = 0u64;
        let mut writer = self.operator.writer(remote_path).await?;

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            writer.write(buffer[..bytes_read].to_vec()).await?;
            total_bytes += bytes_read as u64;
        }
        writer.close().await?;

        log::debug!(
            "uploaded {} -> {remote_path} ({total_bytes} bytes)",
            local_path.display()
        );
        Ok(total_bytes)
    }
}

impl Uploader for OpenDalUploader {
    async fn upload(&self, local_path: &str, remote_path: &str) -> Result<u64> {
        let meta = fs::metadata(local_path)
            .await
            .map_err(|e| e.into_error_at(local_path))?;
        ensure!(meta.is_file(), NotAFileSnafu { path: local_path });

        self.upload_file_streaming(Path::new(local_path), remote_path)
            .await
    }
}
