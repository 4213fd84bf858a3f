use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a single filename in the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// The filename, relative to the working directory.
    pub filename: String,
    /// Whether the file was recognized as text by its MIME type.
    pub is_text: bool,
    /// Base64 of the normalized file bytes.
    ///
    /// Only present for text files at or under the size limit. A text file
    /// without content was recognized but deliberately not loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileInfo {
    pub(crate) fn text(filename: impl Into<String>, content: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            is_text: true,
            content,
        }
    }

    pub(crate) fn binary(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            is_text: false,
            content: None,
        }
    }

    /// Splits off the filename, leaving the per-entry value stored in a [`Listing`].
    pub fn into_entry(self) -> (String, FileEntry) {
        (
            self.filename,
            FileEntry {
                is_text: self.is_text,
                content: self.content,
            },
        )
    }
}

/// A listing value: a [`FileInfo`] without its filename, which is the map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub is_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Filename to classification for every non-ignored entry of a directory.
pub type Listing = BTreeMap<String, FileEntry>;

/// Raw file contents prepared for a text-oriented channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryFile {
    /// Base64 of the unmodified file bytes.
    pub content: String,
    pub mime_type: String,
}
