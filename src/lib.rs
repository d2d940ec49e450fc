//! Document operations over local disk and S3-compatible object storage.
//!
//! [`storage::StorageOps`] dispatches rename, delete, attribute, read and
//! create-and-store calls on a [`storage::Location`].

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
