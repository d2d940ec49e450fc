// Create-and-store: write a document locally, optionally ship it to object storage
use crate::error::{Result, StagingCleanupSnafu};
use crate::storage::operations::upload::{OpenDalUploader, Uploader};
use crate::storage::status::OpStatus;
use crate::storage::utils::path::first_missing_ancestor;
use crate::wrap_err;
use opendal::Operator;
use snafu::ResultExt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file written to local disk together with the directories created for it.
///
/// Until `persist` or `remove` is called, dropping the guard removes what was
/// written, so an abandoned upload does not leave staging files behind.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    created_root: Option<PathBuf>,
    armed: bool,
}

impl StagedFile {
    /// Create missing parent directories of `path` and write `data` to it.
    pub async fn write(path: &Path, data: &[u8]) -> Result<Self> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        let created_root = parent.and_then(first_missing_ancestor);

        let written = match parent {
            Some(parent) => match fs::create_dir_all(parent).await {
                Ok(()) => fs::write(path, data).await,
                Err(e) => Err(e),
            },
            None => fs::write(path, data).await,
        };

        // A failed write leaves whatever was at `path` untouched.
        if let Err(e) = written {
            if let Some(root) = &created_root {
                if let Err(cleanup) = fs::remove_dir_all(root).await {
                    log::warn!("failed to remove staging path {}: {cleanup}", root.display());
                }
            }
            return Err(e.into());
        }

        Ok(Self {
            path: path.to_path_buf(),
            created_root,
            armed: true,
        })
    }

    /// Keep the file; the guard no longer owns it.
    pub fn persist(mut self) -> PathBuf {
        self.armed = false;
        self.path.clone()
    }

    /// Remove the file and every directory this guard created.
    pub async fn remove(mut self) -> io::Result<()> {
        self.armed = false;
        match &self.created_root {
            Some(root) => fs::remove_dir_all(root).await,
            None => fs::remove_file(&self.path).await,
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let result = match &self.created_root {
            Some(root) => std::fs::remove_dir_all(root),
            None => std::fs::remove_file(&self.path),
        };
        if let Err(e) = result {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("failed to remove staging path {}: {e}", self.path.display());
            }
        }
    }
}

/// Write `data` to a local file, creating parent directories.
pub async fn store_local(path: &str, data: &[u8]) -> Result<OpStatus> {
    StagedFile::write(Path::new(path), data).await?.persist();
    Ok(OpStatus::Stored { remote_path: None })
}

/// Stages documents on local disk and uploads them through OpenDAL.
pub struct OpenDalStorer {
    operator: Operator,
}

impl OpenDalStorer {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Stage `data` at `local_path`, upload it to `remote_path`, then remove
    /// the staging file whether or not the upload succeeded.
    pub async fn store(&self, local_path: &str, data: &[u8], remote_path: &str) -> Result<OpStatus> {
        let staged = StagedFile::write(Path::new(local_path), data).await?;

        let uploader = OpenDalUploader::new(self.operator.clone());
        let uploaded = wrap_err!(
            uploader.upload(local_path, remote_path).await,
            UploadFailed {
                local_path: local_path.to_string(),
                remote_path: remote_path.to_string()
            }
        );

        let cleanup = staged.remove().await;
        if let (Err(_), Err(e)) = (&uploaded, &cleanup) {
            log::warn!("failed to remove staging path {local_path} after failed upload: {e}");
        }

        uploaded?;
        cleanup.context(StagingCleanupSnafu { path: local_path })?;

        Ok(OpStatus::Stored {
            remote_path: Some(remote_path.to_string()),
        })
    }
}
