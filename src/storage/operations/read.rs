use crate::error::{IsADirectorySnafu, Result};
use crate::storage::utils::error::IntoStoreOpsError;
use opendal::Operator;
use snafu::ensure;
use tokio::fs;

/// Document content returned by `get_doc_data`.
///
/// Local documents are read as UTF-8 text, objects as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocData {
    Text(String),
    Binary(Vec<u8>),
}

impl DocData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DocData::Text(text) => text.as_bytes(),
            DocData::Binary(bytes) => bytes.as_slice(),
        }
    }
}

pub trait FileReader {
    async fn read(&self, path: &str) -> Result<DocData>;
}

/// Reads whole local files as text.
pub struct LocalFileReader;

impl FileReader for LocalFileReader {
    async fn read(&self, path: &str) -> Result<DocData> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        ensure!(!meta.is_dir(), IsADirectorySnafu { path });

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        Ok(DocData::Text(content))
    }
}

/// OpenDAL implementation of file reading; buffers the whole object.
pub struct OpenDalFileReader {
    operator: Operator,
}

impl OpenDalFileReader {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl FileReader for OpenDalFileReader {
    async fn read(&self, path: &str) -> Result<DocData> {
        let content = self
            .operator
            .read(path)
            .await
            .map_err(|e| e.into_error_at(path))?;
        Ok(DocData::Binary(content.to_vec()))
    }
}
