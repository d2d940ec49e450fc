// Bucket provisioning through the AWS SDK; OpenDAL has no bucket-level API
use crate::error::{BucketProvisioningSnafu, MissingBucketSnafu, Result};
use crate::storage::StorageConfig;
use crate::storage::constants::US_EAST_1;
use crate::storage::status::OpStatus;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use snafu::{ResultExt, ensure};

/// Creates buckets in the region carried by the storage configuration.
pub struct S3BucketProvisioner {
    client: Client,
    region: String,
}

impl S3BucketProvisioner {
    pub async fn new(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.access_key_secret)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "storeops",
            ));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            // S3-compatible providers such as MinIO need path-style addressing.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            region: config.region.clone(),
        }
    }

    /// Create `bucket` unless the account already lists it.
    pub async fn create_bucket(&self, bucket: &str) -> Result<OpStatus> {
        ensure!(!bucket.is_empty(), MissingBucketSnafu);

        let listed = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)
            .context(BucketProvisioningSnafu { bucket })?;
        if listed.buckets().iter().any(|b| b.name() == Some(bucket)) {
            log::debug!("bucket {bucket} already exists");
            return Ok(OpStatus::BucketExists);
        }

        let mut request = self.client.create_bucket().bucket(bucket);
        if self.region != US_EAST_1 {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }
        request
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)
            .context(BucketProvisioningSnafu { bucket })?;

        log::info!("created bucket {bucket} in {}", self.region);
        Ok(OpStatus::BucketCreated)
    }
}
