use std::path::PathBuf;

/// Errors surfaced by the task store and the streak tracker.
///
/// Everything except [`Error::Validation`] means the backing storage is
/// unreachable or corrupt; see [`Error::is_storage`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode streak record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    pub fn is_storage(&self) -> bool {
        !matches!(self, Error::Validation(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Caller-supplied task fields that violate the length or emptiness limits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task name must not be empty")]
    EmptyName,

    #[error("task name is {len} characters long; the limit is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("description is {len} characters long; the limit is {max}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("invalid due date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
