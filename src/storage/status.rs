use std::fmt;

/// Outcome of a storage operation that changes state.
///
/// `Display` renders the one-line status messages printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpStatus {
    Renamed,
    FileDeleted,
    FolderDeleted,
    ObjectDeleted,
    PrefixDeleted { count: usize },
    /// `remote_path` is set when the file ended up in object storage.
    Stored { remote_path: Option<String> },
    Uploaded { remote_path: String },
    BucketCreated,
    BucketExists,
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpStatus::Renamed => write!(f, "file successfully renamed"),
            OpStatus::FileDeleted => write!(f, "file successfully deleted"),
            OpStatus::FolderDeleted => write!(f, "folder successfully deleted"),
            OpStatus::ObjectDeleted => write!(f, "object successfully deleted"),
            OpStatus::PrefixDeleted { count } => write!(f, "{count} object(s) successfully deleted"),
            OpStatus::Stored { remote_path: None } => write!(f, "file successfully stored"),
            OpStatus::Stored {
                remote_path: Some(key),
            } => write!(f, "file successfully stored at {key}"),
            OpStatus::Uploaded { remote_path } => write!(f, "file successfully uploaded to {remote_path}"),
            OpStatus::BucketCreated => write!(f, "bucket successfully created"),
            OpStatus::BucketExists => write!(f, "bucket already exists"),
        }
    }
}
