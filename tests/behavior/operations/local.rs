use crate::*;
use storeops::error::{Error, Result};
use storeops::storage::{DocData, Location, ObjectStoreTarget, OpStatus, StorageOps};

pub fn tests(ops: &StorageOps, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        ops,
        test_rename_local_file,
        test_rename_missing_source_changes_nothing,
        test_rename_directory_is_rejected,
        test_delete_local_file,
        test_delete_local_folder,
        test_delete_local_missing_path,
        test_attributes_local_file,
        test_attributes_local_folder,
        test_folder_size_single_file,
        test_folder_size_nested_folders,
        test_get_doc_data_local,
        test_get_doc_data_directory,
        test_get_doc_data_missing,
        test_create_and_store_local_creates_parents,
        test_create_and_store_local_overwrites,
        test_create_and_store_local_failed_write_keeps_existing_path,
        test_delete_local_symlink_to_folder
    ));
}

async fn test_rename_local_file(ops: StorageOps) -> Result<()> {
    let (src, content) = TEST_FIXTURE.new_local_file();
    let dst = src.with_file_name("renamed.bin");

    let status = ops
        .rename(Location::Local, &path_str(&src), &path_str(&dst), None)
        .await?;

    assert_eq!(status, OpStatus::Renamed);
    assert_eq!(status.to_string(), "file successfully renamed");
    assert!(!src.exists(), "source should be gone after rename");
    assert_eq!(std::fs::read(&dst)?, content);
    Ok(())
}

async fn test_rename_missing_source_changes_nothing(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    let src = dir.join("missing.txt");
    let dst = dir.join("target.txt");

    let result = ops
        .rename(Location::Local, &path_str(&src), &path_str(&dst), None)
        .await;

    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert!(!dst.exists(), "nothing should be created");
    assert_eq!(std::fs::read_dir(&dir)?.count(), 0);
    Ok(())
}

async fn test_rename_directory_is_rejected(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    let dst = dir.with_file_name("moved-dir");

    let result = ops
        .rename(Location::Local, &path_str(&dir), &path_str(&dst), None)
        .await;

    assert!(matches!(result, Err(Error::NotAFile { .. })));
    assert!(dir.is_dir());
    assert!(!dst.exists());
    Ok(())
}

async fn test_delete_local_file(ops: StorageOps) -> Result<()> {
    let (path, _) = TEST_FIXTURE.new_local_file();

    let status = ops.delete(Location::Local, &path_str(&path), None).await?;

    assert_eq!(status.to_string(), "file successfully deleted");
    assert!(!path.exists());
    assert!(path.parent().unwrap().is_dir(), "parent must be kept");
    Ok(())
}

async fn test_delete_local_folder(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    std::fs::create_dir_all(dir.join("nested"))?;
    std::fs::write(dir.join("nested").join("a.txt"), "a")?;
    std::fs::write(dir.join("b.txt"), "b")?;

    let status = ops
        .delete_exact(Location::Local, &path_str(&dir), None)
        .await?;

    assert_eq!(status, OpStatus::FolderDeleted);
    assert_eq!(status.to_string(), "folder successfully deleted");
    assert!(!dir.exists());
    Ok(())
}

async fn test_delete_local_missing_path(ops: StorageOps) -> Result<()> {
    let path = TEST_FIXTURE.new_local_path();

    let result = ops.delete(Location::Local, &path_str(&path), None).await;

    assert!(result.is_err(), "deleting a missing path should fail");
    assert!(result.unwrap_err().is_not_found());
    Ok(())
}

async fn test_attributes_local_file(ops: StorageOps) -> Result<()> {
    let (path, content) = TEST_FIXTURE.new_local_file();
    let meta = std::fs::metadata(&path)?;

    let attrs = ops
        .get_attributes(Location::Local, &path_str(&path), None)
        .await?;

    assert_eq!(attrs.last_modified, meta.modified()?);
    assert_eq!(attrs.size, content.len() as u64);
    Ok(())
}

async fn test_attributes_local_folder(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    std::fs::write(dir.join("test_file.txt"), "test")?;
    let meta = std::fs::metadata(&dir)?;

    let attrs = ops
        .get_attributes(Location::Local, &path_str(&dir), None)
        .await?;

    assert_eq!(attrs.last_modified, meta.modified()?);
    assert_eq!(attrs.size, ops.folder_size(&path_str(&dir)).await?);
    Ok(())
}

async fn test_folder_size_single_file(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    std::fs::write(dir.join("test_file.txt"), "test")?;
    let dir_entry_size = std::fs::metadata(&dir)?.len();

    let size = ops.folder_size(&path_str(&dir)).await?;

    assert_eq!(size, dir_entry_size + 4);
    Ok(())
}

async fn test_folder_size_nested_folders(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    let sub = dir.join("sub");
    std::fs::create_dir_all(&sub)?;
    std::fs::write(dir.join("top.txt"), vec![b'a'; 1000])?;
    std::fs::write(sub.join("inner.txt"), vec![b'b'; 24])?;

    let expected = std::fs::metadata(&dir)?.len() + std::fs::metadata(&sub)?.len() + 1000 + 24;

    assert_eq!(ops.folder_size(&path_str(&dir)).await?, expected);
    Ok(())
}

async fn test_get_doc_data_local(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    let path = dir.join("test_file.txt");
    std::fs::write(&path, "test")?;

    let data = ops
        .get_doc_data(Location::Local, &path_str(&path), None)
        .await?;

    assert_eq!(data, DocData::Text("test".to_string()));
    Ok(())
}

async fn test_get_doc_data_directory(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();

    let result = ops
        .get_doc_data(Location::Local, &path_str(&dir), None)
        .await;

    assert!(matches!(result, Err(Error::IsADirectory { .. })));
    Ok(())
}

async fn test_get_doc_data_missing(ops: StorageOps) -> Result<()> {
    let path = TEST_FIXTURE.new_local_path();

    let result = ops
        .get_doc_data(Location::Local, &path_str(&path), None)
        .await;

    assert!(matches!(result, Err(Error::NotFound { .. })));
    Ok(())
}

async fn test_create_and_store_local_creates_parents(ops: StorageOps) -> Result<()> {
    let path = TEST_FIXTURE
        .new_local_path()
        .join("a")
        .join("b")
        .join("doc.txt");

    let status = ops
        .create_and_store(
            Location::Local,
            &path_str(&path),
            "stored content",
            &ObjectStoreTarget::default(),
        )
        .await?;

    assert_eq!(status, OpStatus::Stored { remote_path: None });
    assert_eq!(std::fs::read_to_string(&path)?, "stored content");
    Ok(())
}

async fn test_create_and_store_local_overwrites(ops: StorageOps) -> Result<()> {
    let (path, _) = TEST_FIXTURE.new_local_file();
    let path = path_str(&path);

    ops.create_and_store(Location::Local, &path, "second", &ObjectStoreTarget::default())
        .await?;

    assert_eq!(
        ops.get_doc_data(Location::Local, &path, None).await?,
        DocData::Text("second".to_string())
    );
    Ok(())
}

async fn test_create_and_store_local_failed_write_keeps_existing_path(
    ops: StorageOps,
) -> Result<()> {
    // Writes through a link to /dev/full fail with "no space left on device".
    let full = std::path::Path::new("/dev/full");
    if !full.exists() {
        return Ok(());
    }
    let dir = TEST_FIXTURE.new_local_dir();
    let path = dir.join("existing");
    std::os::unix::fs::symlink(full, &path)?;

    let result = ops
        .create_and_store(
            Location::Local,
            &path_str(&path),
            "data",
            &ObjectStoreTarget::default(),
        )
        .await;

    assert!(matches!(result, Err(Error::Io { .. })), "got {result:?}");
    assert!(
        std::fs::symlink_metadata(&path).is_ok(),
        "existing path must survive a failed write"
    );
    Ok(())
}

async fn test_delete_local_symlink_to_folder(ops: StorageOps) -> Result<()> {
    let dir = TEST_FIXTURE.new_local_dir();
    let target = dir.join("target");
    std::fs::create_dir_all(&target)?;
    std::fs::write(target.join("a.txt"), "a")?;
    let link = dir.join("link");
    std::os::unix::fs::symlink(&target, &link)?;

    let status = ops.delete(Location::Local, &path_str(&link), None).await?;

    assert_eq!(status, OpStatus::FileDeleted);
    assert!(std::fs::symlink_metadata(&link).is_err());
    assert!(target.join("a.txt").exists(), "link target must be kept");
    Ok(())
}
