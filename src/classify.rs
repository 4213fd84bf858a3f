//! Per-filename text/binary/ignored decision.

use crate::charset;
use crate::error::SessionDirError;
use crate::mime::MimeTable;
use crate::types::FileInfo;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
#[cfg(feature = "logging")]
use tracing;

// Hidden files and editor temp files such as `octave-workspace`.
static IGNORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.|octave-\w+").expect("ignore pattern is valid"));

/// Whether `filename` is left out of listings entirely.
pub fn is_ignored(filename: &str) -> bool {
    IGNORE_PATTERN.is_match(filename)
}

/// Classifies `filename` under `root`. `Ok(None)` means ignored.
///
/// Text files above `text_size_limit` are reported without content. Only
/// regular files are ever read; anything else with a text MIME type is
/// treated like a binary entry.
pub(crate) fn classify(
    root: &Path,
    filename: &str,
    text_size_limit: u64,
    mime_types: &MimeTable,
) -> Result<Option<FileInfo>, SessionDirError> {
    if is_ignored(filename) {
        return Ok(None);
    }
    if mime_types.is_text(filename) {
        let path = root.join(filename);
        let metadata = fs::metadata(&path).map_err(|e| SessionDirError::io(&path, e))?;
        if metadata.is_file() {
            if metadata.len() > text_size_limit {
                #[cfg(feature = "logging")]
                tracing::debug!(
                    "Text file too large ({} > {}), skipping content: {}",
                    metadata.len(),
                    text_size_limit,
                    filename
                );
                return Ok(Some(FileInfo::text(filename, None)));
            }
            let raw = fs::read(&path).map_err(|e| SessionDirError::io(&path, e))?;
            let normalized = charset::normalize(&raw);
            return Ok(Some(FileInfo::text(filename, Some(STANDARD.encode(normalized)))));
        }
    }
    Ok(Some(FileInfo::binary(filename)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_files_are_ignored() {
        assert!(is_ignored(".hidden"));
        assert!(is_ignored(".notes.txt"));
        assert!(!is_ignored("notes.txt"));
        assert!(!is_ignored("a.b"));
    }

    #[test]
    fn test_octave_temp_files_are_ignored() {
        assert!(is_ignored("octave-workspace"));
        assert!(is_ignored("octave-core"));
        assert!(!is_ignored("octave-"));
        assert!(!is_ignored("octave.txt"));
    }
}
