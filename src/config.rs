use crate::error::{Error, Result};
use crate::storage::StorageConfig;
use crate::storage::constants::DEFAULT_REGION;
use std::env;

// Helper function to reduce repetitive environment variable loading logic.
fn get_env_var(primary_key: &str, secondary_key: &str) -> Option<String> {
    env::var(primary_key)
        .or_else(|_| env::var(secondary_key))
        .ok()
        .filter(|value| !value.is_empty())
}

/// Load object-store configuration from environment variables.
///
/// Credentials are optional as a pair: with neither set, the backends fall
/// back to their own credential chains.
pub fn load_storage_config() -> Result<StorageConfig> {
    let region = env::var("STORAGE_REGION")
        .or_else(|_| env::var("AWS_REGION"))
        .or_else(|_| env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| DEFAULT_REGION.to_string());

    let access_key_id = get_env_var("STORAGE_ACCESS_KEY_ID", "AWS_ACCESS_KEY_ID");
    let access_key_secret = get_env_var("STORAGE_ACCESS_KEY_SECRET", "AWS_SECRET_ACCESS_KEY");

    let mut config = match (access_key_id, access_key_secret) {
        (Some(id), Some(secret)) => StorageConfig::s3(id, secret, Some(region)),
        (None, None) => StorageConfig::new(region),
        (Some(_), None) => {
            return Err(Error::MissingEnvVar {
                key: "STORAGE_ACCESS_KEY_SECRET or AWS_SECRET_ACCESS_KEY".to_string(),
            });
        }
        (None, Some(_)) => {
            return Err(Error::MissingEnvVar {
                key: "STORAGE_ACCESS_KEY_ID or AWS_ACCESS_KEY_ID".to_string(),
            });
        }
    };
    config.endpoint = env::var("STORAGE_ENDPOINT").ok();

    Ok(config)
}
