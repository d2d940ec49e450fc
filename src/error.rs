use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Unsupported storage location: {location}"))]
    UnsupportedLocation { location: String },

    #[snafu(display("Bucket name is required for object storage operations"))]
    MissingBucket,

    #[snafu(display("Path does not exist: {path}"))]
    NotFound { path: String },

    #[snafu(display("Not a regular file: {path}"))]
    NotAFile { path: String },

    #[snafu(display("Is a directory: {path}"))]
    IsADirectory { path: String },

    #[snafu(display("Refusing to delete with an empty prefix"))]
    EmptyPrefix,

    #[snafu(display("Prefix delete only applies to object storage, got location '{location}'"))]
    PrefixOnLocal { location: String },

    #[snafu(display("Backend did not report {attribute} for '{path}'"))]
    MissingAttribute {
        path: String,
        attribute: &'static str,
    },

    #[snafu(display("Failed to rename '{src_path}' to '{dst_path}': {source}"))]
    RenameFailed {
        src_path: String,
        dst_path: String,
        source: Box<Error>,
    },

    #[snafu(display(
        "Copied '{src_path}' to '{dst_path}' but failed to delete the source, both keys exist: {source}"
    ))]
    PartialRename {
        src_path: String,
        dst_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to upload '{local_path}' to '{remote_path}': {source}"))]
    UploadFailed {
        local_path: String,
        remote_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Uploaded but failed to remove staging path '{path}': {source}"))]
    StagingCleanup {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to provision bucket '{bucket}': {source}"))]
    BucketProvisioning {
        bucket: String,
        source: aws_sdk_s3::Error,
    },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl Error {
    /// Whether this error, or the step error it wraps, is a not-found condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::RenameFailed { source, .. }
            | Error::PartialRename { source, .. }
            | Error::UploadFailed { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}
