use crate::error::{MissingAttributeSnafu, NotFoundSnafu, Result};
use crate::storage::operations::usage::{LocalUsageCalculator, UsageCalculator};
use crate::storage::utils::error::IntoStoreOpsError;
use chrono::{DateTime, SecondsFormat, Utc};
use opendal::Operator;
use snafu::{OptionExt, ensure};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

/// Attributes returned by `get_attributes`.
///
/// - `last_modified`: modification time of the path itself
/// - `size`: content length for files and objects, folder size for directories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSet {
    pub last_modified: SystemTime,
    pub size: u64,
}

impl AttributeSet {
    /// `last_modified` as an RFC 3339 UTC string.
    pub fn last_modified_rfc3339(&self) -> String {
        DateTime::<Utc>::from(self.last_modified).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// `last_modified` as fractional seconds since the Unix epoch.
    pub fn last_modified_epoch(&self) -> f64 {
        match self.last_modified.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs_f64(),
            Err(e) => -e.duration().as_secs_f64(),
        }
    }
}

/// Trait for fetching document attributes from storage.
pub trait Stater {
    /// Fetch attributes for a single path.
    ///
    /// # Arguments
    /// * `path` - File, directory or object key to inspect
    ///
    /// # Returns
    /// * `Result<AttributeSet>` - Collected attributes for the provided path
    async fn stat(&self, path: &str) -> Result<AttributeSet>;
}

/// Attributes from the local filesystem.
pub struct LocalStater;

impl Stater for LocalStater {
    async fn stat(&self, path: &str) -> Result<AttributeSet> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        let last_modified = meta.modified()?;

        let size = if meta.is_file() {
            meta.len()
        } else {
            LocalUsageCalculator.folder_size(path).await?
        };

        Ok(AttributeSet {
            last_modified,
            size,
        })
    }
}

/// Implementation of `Stater` for OpenDAL `Operator`.
#[derive(Clone)]
pub struct OpenDalStater {
    operator: Operator,
}

impl OpenDalStater {
    /// Create a new `OpenDalStater` with the given operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Stater for OpenDalStater {
    /// One metadata request per call; object stores have no folders, so a
    /// prefix that only looks like a directory is reported as not found.
    async fn stat(&self, path: &str) -> Result<AttributeSet> {
        let meta = self
            .operator
            .stat(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        ensure!(!meta.mode().is_dir(), NotFoundSnafu { path });

        let last_modified =
            meta.last_modified()
                .map(SystemTime::from)
                .context(MissingAttributeSnafu {
                    path,
                    attribute: "last_modified",
                })?;

        Ok(AttributeSet {
            last_modified,
            size: meta.content_length(),
        })
    }
}
