use crate::save::RestoreOutcome;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum SessionDirError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Malformed MIME table {path} at line {line}: {reason}")]
    MimeTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("Worker pool error: {0}")]
    Pool(String),
    /// The overwrite failed. `source` is always the failed write; `restore`
    /// reports what happened to the rollback attempt.
    #[error("Failed to write {path}: {source} ({restore})")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        restore: RestoreOutcome,
    },
}
impl SessionDirError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionDirError::Io {
            path: path.into(),
            source,
        }
    }
    /// Kind of the underlying I/O error, if this error came from the filesystem.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            SessionDirError::Io { source, .. } | SessionDirError::Save { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
