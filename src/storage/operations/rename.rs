// Rename operation trait and implementations
use crate::error::{NotAFileSnafu, Result};
use crate::storage::status::OpStatus;
use crate::storage::utils::error::IntoStoreOpsError;
use crate::wrap_err;
use opendal::Operator;
use snafu::ensure;
use tokio::fs;

/// Trait for renaming a single document.
pub trait Renamer {
    /// Rename `src_path` to `dst_path` on the same backend.
    ///
    /// # Arguments
    /// * `src_path` - Existing file path or object key
    /// * `dst_path` - New path or key; parent directories are not created
    ///
    /// # Returns
    /// * `Result<OpStatus>` - `OpStatus::Renamed` or detailed error information
    async fn rename(&self, src_path: &str, dst_path: &str) -> Result<OpStatus>;
}

/// Renames files on the local filesystem.
pub struct LocalRenamer;

impl Renamer for LocalRenamer {
    async fn rename(&self, src_path: &str, dst_path: &str) -> Result<OpStatus> {
        let meta = fs::metadata(src_path)
            .await
            .map_err(|e| e.into_error_at(src_path))?;
        ensure!(meta.is_file(), NotAFileSnafu { path: src_path });

        fs::rename(src_path, dst_path).await?;
        Ok(OpStatus::Renamed)
    }
}

/// Emulates rename on object storage with copy followed by delete.
///
/// The two steps are not atomic. If the delete fails after a successful copy,
/// both keys exist and `Error::PartialRename` is returned.
pub struct OpenDalRenamer {
    operator: Operator,
}

impl OpenDalRenamer {
    /// Create a new renamer with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Renamer for OpenDalRenamer {
    async fn rename(&self, src_path: &str, dst_path: &str) -> Result<OpStatus> {
        wrap_err!(
            self.operator
                .copy(src_path, dst_path)
                .await
                .map_err(|e| e.into_error_at(src_path)),
            RenameFailed {
                src_path: src_path.to_string(),
                dst_path: dst_path.to_string()
            }
        )?;

        finish_rename(src_path, dst_path, self.operator.delete(src_path).await)
    }
}

/// Outcome of a rename whose copy already succeeded, given the source delete result.
fn finish_rename(
    src_path: &str,
    dst_path: &str,
    deleted: opendal::Result<()>,
) -> Result<OpStatus> {
    wrap_err!(
        deleted,
        PartialRename {
            src_path: src_path.to_string(),
            dst_path: dst_path.to_string()
        }
    )?;
    Ok(OpStatus::Renamed)
}
