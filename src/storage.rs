use crate::error::{Error, MissingBucketSnafu, Result};
use opendal::Operator;
use snafu::OptionExt;
use std::str::FromStr;

pub mod constants;
pub mod operations;
mod status;
mod utils;

use self::constants::DEFAULT_REGION;
use self::operations::bucket::S3BucketProvisioner;
use self::operations::delete::{LocalDeleter, OpenDalDeleter};
use self::operations::read::{LocalFileReader, OpenDalFileReader};
use self::operations::rename::{LocalRenamer, OpenDalRenamer};
use self::operations::stat::{LocalStater, OpenDalStater};
use self::operations::store::{OpenDalStorer, store_local};
use self::operations::upload::OpenDalUploader;
use self::operations::usage::LocalUsageCalculator;
use self::operations::{Deleter, FileReader, Renamer, Stater, Uploader, UsageCalculator};
use self::utils::path::basename;
use crate::wrap_err;

pub use self::operations::read::DocData;
pub use self::operations::stat::AttributeSet;
pub use self::status::OpStatus;

/// Where an operation is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Local,
    ObjectStore,
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" | "fs" => Ok(Self::Local),
            "s3" | "minio" | "object-store" => Ok(Self::ObjectStore),
            _ => Err(Error::UnsupportedLocation {
                location: s.to_string(),
            }),
        }
    }
}

/// Object-store connection settings shared by every call.
///
/// Buckets are chosen per call; the region here is the fallback when a call
/// does not name one.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
}

impl StorageConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint: None,
            access_key_id: None,
            access_key_secret: None,
        }
    }

    pub fn s3(
        access_key_id: String,
        secret_access_key: String,
        region: Option<String>,
    ) -> Self {
        Self {
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint: None,
            access_key_id: Some(access_key_id),
            access_key_secret: Some(secret_access_key),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Bucket, key and region for calls that write to object storage.
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreTarget {
    pub bucket: Option<String>,
    pub remote_path: Option<String>,
    pub region: Option<String>,
}

impl ObjectStoreTarget {
    pub fn bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            ..Self::default()
        }
    }

    pub fn with_remote_path(mut self, remote_path: impl Into<String>) -> Self {
        self.remote_path = Some(remote_path.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Destination key; an unset or empty `remote_path` means the local basename.
    pub fn remote_path_for(&self, local_path: &str) -> String {
        match self.remote_path.as_deref() {
            Some(remote_path) if !remote_path.is_empty() => remote_path.to_string(),
            _ => basename(local_path),
        }
    }
}

fn require_bucket(bucket: Option<&str>) -> Result<&str> {
    bucket.filter(|b| !b.is_empty()).context(MissingBucketSnafu)
}

/// Uniform document operations over local disk and object storage.
///
/// Holds configuration only; every call builds its own backend handle.
#[derive(Debug, Clone, Default)]
pub struct StorageOps {
    config: StorageConfig,
}

impl StorageOps {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Operator bound to one bucket. Fails with `MissingBucket` before any
    /// backend state is created.
    fn object_store(&self, bucket: Option<&str>, region: Option<&str>) -> Result<Operator> {
        let bucket = require_bucket(bucket)?;
        let region = region.unwrap_or(self.config.region.as_str());
        self.build_operator(bucket, region)
    }

    fn build_operator(&self, bucket: &str, region: &str) -> Result<Operator> {
        #[cfg(feature = "s3")]
        {
            let mut builder = opendal::services::S3::default()
                .bucket(bucket)
                .region(region);
            if let Some(access_key_id) = &self.config.access_key_id {
                builder = builder.access_key_id(access_key_id);
            }
            if let Some(secret_access_key) = &self.config.access_key_secret {
                builder = builder.secret_access_key(secret_access_key);
            }
            if let Some(endpoint) = &self.config.endpoint {
                builder = builder.endpoint(endpoint);
            }
            Ok(Operator::new(builder)?.finish())
        }

        #[cfg(not(feature = "s3"))]
        {
            let _ = (bucket, region);
            Err(Error::UnsupportedLocation {
                location: "object-store (feature disabled)".to_string(),
            })
        }
    }

    pub async fn rename(
        &self,
        location: Location,
        src_path: &str,
        dst_path: &str,
        bucket: Option<&str>,
    ) -> Result<OpStatus> {
        log::debug!(
            "rename location={:?} src_path={} dst_path={} bucket={:?}",
            location,
            src_path,
            dst_path,
            bucket
        );
        match location {
            Location::Local => LocalRenamer.rename(src_path, dst_path).await,
            Location::ObjectStore => {
                let renamer = OpenDalRenamer::new(self.object_store(bucket, None)?);
                renamer.rename(src_path, dst_path).await
            }
        }
    }

    /// Delete an exact path locally, or every key under a prefix on object storage.
    ///
    /// Prefer `delete_exact` or `delete_prefix`, which say which one you get.
    pub async fn delete(
        &self,
        location: Location,
        src_path: &str,
        bucket: Option<&str>,
    ) -> Result<OpStatus> {
        match location {
            Location::Local => self.delete_exact(location, src_path, bucket).await,
            Location::ObjectStore => self.delete_prefix(bucket, src_path).await,
        }
    }

    /// Delete one file, directory tree or object.
    pub async fn delete_exact(
        &self,
        location: Location,
        src_path: &str,
        bucket: Option<&str>,
    ) -> Result<OpStatus> {
        log::debug!(
            "delete_exact location={:?} src_path={} bucket={:?}",
            location,
            src_path,
            bucket
        );
        match location {
            Location::Local => LocalDeleter.delete(src_path).await,
            Location::ObjectStore => {
                let deleter = OpenDalDeleter::new(self.object_store(bucket, None)?);
                deleter.delete(src_path).await
            }
        }
    }

    /// Delete every object whose key starts with `prefix`.
    pub async fn delete_prefix(&self, bucket: Option<&str>, prefix: &str) -> Result<OpStatus> {
        log::debug!("delete_prefix prefix={} bucket={:?}", prefix, bucket);
        let deleter = OpenDalDeleter::new(self.object_store(bucket, None)?);
        deleter.delete_prefix(prefix).await
    }

    pub async fn get_attributes(
        &self,
        location: Location,
        src_path: &str,
        bucket: Option<&str>,
    ) -> Result<AttributeSet> {
        log::debug!(
            "get_attributes location={:?} src_path={} bucket={:?}",
            location,
            src_path,
            bucket
        );
        match location {
            Location::Local => LocalStater.stat(src_path).await,
            Location::ObjectStore => {
                let stater = OpenDalStater::new(self.object_store(bucket, None)?);
                stater.stat(src_path).await
            }
        }
    }

    pub async fn get_doc_data(
        &self,
        location: Location,
        src_path: &str,
        bucket: Option<&str>,
    ) -> Result<DocData> {
        log::debug!(
            "get_doc_data location={:?} src_path={} bucket={:?}",
            location,
            src_path,
            bucket
        );
        match location {
            Location::Local => LocalFileReader.read(src_path).await,
            Location::ObjectStore => {
                let reader = OpenDalFileReader::new(self.object_store(bucket, None)?);
                reader.read(src_path).await
            }
        }
    }

    /// Size of a local folder, counting each directory entry's own size.
    pub async fn folder_size(&self, path: &str) -> Result<u64> {
        log::debug!("folder_size path={}", path);
        LocalUsageCalculator.folder_size(path).await
    }

    /// Write `data` to `src_path` and, for object storage, upload it and drop
    /// the local copy.
    pub async fn create_and_store(
        &self,
        location: Location,
        src_path: &str,
        data: impl AsRef<[u8]>,
        target: &ObjectStoreTarget,
    ) -> Result<OpStatus> {
        log::debug!(
            "create_and_store location={:?} src_path={} target={:?}",
            location,
            src_path,
            target
        );
        match location {
            Location::Local => store_local(src_path, data.as_ref()).await,
            Location::ObjectStore => {
                let operator =
                    self.object_store(target.bucket.as_deref(), target.region.as_deref())?;
                let remote_path = target.remote_path_for(src_path);
                OpenDalStorer::new(operator)
                    .store(src_path, data.as_ref(), &remote_path)
                    .await
            }
        }
    }

    /// Create a bucket in the configured region unless it already exists.
    pub async fn create_bucket(&self, bucket: &str) -> Result<OpStatus> {
        log::debug!(
            "create_bucket bucket={} region={}",
            bucket,
            self.config.region
        );
        require_bucket(Some(bucket))?;
        S3BucketProvisioner::new(&self.config)
            .await
            .create_bucket(bucket)
            .await
    }

    /// Upload one local file as a single object.
    pub async fn upload_file(&self, path: &str, target: &ObjectStoreTarget) -> Result<OpStatus> {
        log::debug!("upload_file path={} target={:?}", path, target);
        let operator = self.object_store(target.bucket.as_deref(), target.region.as_deref())?;
        let remote_path = target.remote_path_for(path);

        let uploader = OpenDalUploader::new(operator);
        wrap_err!(
            uploader.upload(path, &remote_path).await,
            UploadFailed {
                local_path: path.to_string(),
                remote_path: remote_path.clone()
            }
        )?;

        Ok(OpStatus::Uploaded { remote_path })
    }
}
