//! Overwrite with in-memory backup and rollback.
//!
//! The current bytes are read before writing. If the write fails the backup
//! is written back through the same [`FileWriter`]. There is no locking:
//! two concurrent saves to one file race.

use crate::error::SessionDirError;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

/// The write primitive used by saves.
pub trait FileWriter: Send + Sync {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes straight to the filesystem with [`std::fs::write`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileWriter;

impl FileWriter for StdFileWriter {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// What happened to the rollback after a failed overwrite.
#[derive(Debug)]
pub enum RestoreOutcome {
    /// The previous contents were written back.
    Restored,
    /// Writing the previous contents back failed too.
    Failed(io::Error),
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, RestoreOutcome::Restored)
    }
}

impl fmt::Display for RestoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreOutcome::Restored => write!(f, "previous contents restored"),
            RestoreOutcome::Failed(e) => write!(f, "restore failed: {}", e),
        }
    }
}

pub(crate) fn save_with_backup(
    writer: &dyn FileWriter,
    path: &Path,
    contents: &[u8],
) -> Result<(), SessionDirError> {
    // A missing file is the create path; its backup is empty.
    let backup = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(SessionDirError::io(path, e)),
    };
    let source = match writer.write(path, contents) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    let restore = match writer.write(path, &backup) {
        Ok(()) => RestoreOutcome::Restored,
        Err(e) => {
            #[cfg(feature = "logging")]
            tracing::warn!("Could not restore {} after failed write: {}", path.display(), e);
            RestoreOutcome::Failed(e)
        }
    };
    Err(SessionDirError::Save {
        path: path.to_path_buf(),
        source,
        restore,
    })
}
