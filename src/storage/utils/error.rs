// Error conversion helpers and wrapping macro for Snafu-based errors
use crate::error::Error;

/// Convert different error types into our unified Error type.
pub trait IntoStoreOpsError {
    fn into_error(self) -> Error;

    /// Like `into_error`, but a backend not-found becomes `Error::NotFound` for `path`.
    fn into_error_at(self, path: &str) -> Error
    where
        Self: Sized,
    {
        self.into_error()
    }
}

impl IntoStoreOpsError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl IntoStoreOpsError for opendal::Error {
    fn into_error(self) -> Error {
        self.into()
    }

    fn into_error_at(self, path: &str) -> Error {
        if self.kind() == opendal::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_string(),
            }
        } else {
            self.into()
        }
    }
}

impl IntoStoreOpsError for std::io::Error {
    fn into_error(self) -> Error {
        self.into()
    }

    fn into_error_at(self, path: &str) -> Error {
        if self.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_string(),
            }
        } else {
            self.into()
        }
    }
}

/// Macro to wrap a Result-producing expression into a Snafu variant with `source: Box<Error>`.
/// Example:
/// wrap_err!(op.copy(src, dst).await, RenameFailed { src_path: s, dst_path: d })?
#[macro_export]
macro_rules! wrap_err {
    ($expr:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {{
        $expr.map_err(|e| {
            let src: $crate::error::Error = $crate::storage::utils::error::IntoStoreOpsError::into_error(e);
            $crate::error::Error::$variant { $($field: $value),*, source: Box::new(src) }
        })
    }};
}
