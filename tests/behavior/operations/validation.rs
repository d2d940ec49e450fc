use crate::*;
use storeops::error::{Error, Result};
use storeops::storage::{Location, ObjectStoreTarget, StorageConfig, StorageOps};

pub fn tests(ops: &StorageOps, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        ops,
        test_rename_without_bucket,
        test_delete_without_bucket,
        test_delete_exact_without_bucket,
        test_delete_prefix_without_bucket,
        test_attributes_without_bucket,
        test_doc_data_without_bucket,
        test_upload_without_bucket,
        test_create_and_store_without_bucket_writes_nothing,
        test_create_bucket_with_empty_name,
        test_empty_bucket_name_is_missing,
        test_empty_prefix_is_rejected,
        test_failed_upload_removes_staging_file
    ));
}

fn assert_missing_bucket<T: std::fmt::Debug>(result: Result<T>) {
    assert!(
        matches!(result, Err(Error::MissingBucket)),
        "expected MissingBucket, got {result:?}"
    );
}

async fn test_rename_without_bucket(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.rename(Location::ObjectStore, "a", "b", None).await);
    Ok(())
}

async fn test_delete_without_bucket(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.delete(Location::ObjectStore, "logs/", None).await);
    Ok(())
}

async fn test_delete_exact_without_bucket(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.delete_exact(Location::ObjectStore, "a", None).await);
    Ok(())
}

async fn test_delete_prefix_without_bucket(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.delete_prefix(None, "logs/").await);
    Ok(())
}

async fn test_attributes_without_bucket(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.get_attributes(Location::ObjectStore, "a", None).await);
    Ok(())
}

async fn test_doc_data_without_bucket(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.get_doc_data(Location::ObjectStore, "a", None).await);
    Ok(())
}

async fn test_upload_without_bucket(ops: StorageOps) -> Result<()> {
    let (path, _) = TEST_FIXTURE.new_local_file();
    assert_missing_bucket(
        ops.upload_file(&path_str(&path), &ObjectStoreTarget::default())
            .await,
    );
    Ok(())
}

async fn test_create_and_store_without_bucket_writes_nothing(ops: StorageOps) -> Result<()> {
    let root = TEST_FIXTURE.new_local_path();
    let path = root.join("doc.txt");

    let result = ops
        .create_and_store(
            Location::ObjectStore,
            &path_str(&path),
            "data",
            &ObjectStoreTarget::default(),
        )
        .await;

    assert_missing_bucket(result);
    assert!(!root.exists(), "no staging write may happen without a bucket");
    Ok(())
}

async fn test_create_bucket_with_empty_name(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(ops.create_bucket("").await);
    Ok(())
}

async fn test_empty_bucket_name_is_missing(ops: StorageOps) -> Result<()> {
    assert_missing_bucket(
        ops.get_doc_data(Location::ObjectStore, "a", Some(""))
            .await,
    );
    Ok(())
}

async fn test_empty_prefix_is_rejected(ops: StorageOps) -> Result<()> {
    let result = ops.delete_prefix(Some(TEST_BUCKET.as_str()), "").await;
    assert!(matches!(result, Err(Error::EmptyPrefix)));

    let result = ops.delete(Location::ObjectStore, "/", Some(TEST_BUCKET.as_str())).await;
    assert!(matches!(result, Err(Error::EmptyPrefix)));
    Ok(())
}

async fn test_failed_upload_removes_staging_file(_ops: StorageOps) -> Result<()> {
    let mut config = StorageConfig::s3(
        "minioadmin".to_string(),
        "minioadmin".to_string(),
        Some("us-east-1".to_string()),
    );
    config.endpoint = Some("http://127.0.0.1:1".to_string());
    let ops = StorageOps::new(config);

    let root = TEST_FIXTURE.new_local_path();
    let path = root.join("staging").join("doc.txt");
    let target = ObjectStoreTarget::bucket("unreachable").with_remote_path("docs/doc.txt");

    let result = ops
        .create_and_store(Location::ObjectStore, &path_str(&path), "data", &target)
        .await;

    assert!(
        matches!(result, Err(Error::UploadFailed { .. })),
        "expected UploadFailed, got {result:?}"
    );
    assert!(!root.exists(), "staging directories must be removed");
    Ok(())
}
