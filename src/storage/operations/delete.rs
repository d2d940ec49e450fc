// Delete operation trait and implementations
use crate::error::{EmptyPrefixSnafu, IsADirectorySnafu, Result};
use crate::storage::status::OpStatus;
use crate::storage::utils::error::IntoStoreOpsError;
use crate::storage::utils::path::{key_has_prefix, listing_root};
use futures::stream::TryStreamExt;
use opendal::{EntryMode, Operator};
use snafu::ensure;
use tokio::fs;

/// Trait for deleting exactly one path from storage.
pub trait Deleter {
    /// Delete the file, directory or object at `path`.
    ///
    /// # Arguments
    /// * `path` - Path to delete, passed verbatim to the backend
    ///
    /// # Returns
    /// * `Result<OpStatus>` - What was deleted, or detailed error information
    async fn delete(&self, path: &str) -> Result<OpStatus>;
}

/// Deletes files and directory trees on the local filesystem.
pub struct LocalDeleter;

impl Deleter for LocalDeleter {
    async fn delete(&self, path: &str) -> Result<OpStatus> {
        // Symlinks are removed as links, never followed into their target.
        let is_file = fs::symlink_metadata(path)
            .await
            .map(|meta| !meta.is_dir())
            .unwrap_or(false);
        if is_file {
            fs::remove_file(path).await?;
            return Ok(OpStatus::FileDeleted);
        }

        // Anything that is not a file is treated as a directory.
        fs::remove_dir_all(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        Ok(OpStatus::FolderDeleted)
    }
}

/// Implementation of Deleter for OpenDAL Operator.
pub struct OpenDalDeleter {
    operator: Operator,
}

impl OpenDalDeleter {
    /// Create a new deleter with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Delete every object whose key starts with `prefix`.
    ///
    /// Unlike `delete`, this may remove many keys. An empty prefix is rejected.
    /// The returned count is the number of files removed.
    pub async fn delete_prefix(&self, prefix: &str) -> Result<OpStatus> {
        ensure!(!prefix.trim_start_matches('/').is_empty(), EmptyPrefixSnafu);

        let mut lister = self
            .operator
            .lister_with(listing_root(prefix))
            .recursive(true)
            .await?;

        // Directory markers are deleted too but only files are counted.
        let mut keys = Vec::new();
        let mut count = 0;
        while let Some(entry) = lister.try_next().await? {
            if key_has_prefix(entry.path(), prefix) {
                if entry.metadata().mode() == EntryMode::FILE {
                    count += 1;
                }
                keys.push(entry.path().to_string());
            }
        }

        if !keys.is_empty() {
            self.operator.delete_iter(keys).await?;
        }
        log::debug!("delete_prefix prefix={prefix} deleted={count}");

        Ok(OpStatus::PrefixDeleted { count })
    }
}

impl Deleter for OpenDalDeleter {
    async fn delete(&self, path: &str) -> Result<OpStatus> {
        let meta = self
            .operator
            .stat(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        ensure!(!meta.mode().is_dir(), IsADirectorySnafu { path });

        self.operator.delete(path).await?;
        Ok(OpStatus::ObjectDeleted)
    }
}
