//! Filename to MIME type lookup.
//!
//! Builtin types come from `mime_guess`. A supplemental table, usually an
//! Apache `mime.types` style file, can be layered on top once at startup; its
//! entries win over the builtins.

use crate::error::SessionDirError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// MIME type for anything the table does not know.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    /// A table with only the builtin types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every extension in `extensions` to `mime`, replacing earlier entries.
    pub fn define<I, S>(mut self, mime: &str, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let key = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
            if !key.is_empty() {
                self.overrides.insert(key, mime.to_string());
            }
        }
        self
    }

    /// Reads a supplemental table from disk and layers it on top of `self`.
    pub fn load(self, path: impl AsRef<Path>) -> Result<Self, SessionDirError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SessionDirError::io(path, e))?;
        self.parse(&text).map_err(|(line, reason)| SessionDirError::MimeTable {
            path: path.to_path_buf(),
            line,
            reason,
        })
    }

    /// Parses `<type> <ext> <ext>...` lines. `#` starts a comment.
    ///
    /// On failure returns the 1-based line number and the reason.
    pub fn parse(mut self, text: &str) -> Result<Self, (usize, String)> {
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(mime) = fields.next() else {
                continue;
            };
            if !mime.contains('/') {
                return Err((idx + 1, format!("'{}' is not a MIME type", mime)));
            }
            let exts: Vec<&str> = fields.collect();
            if exts.is_empty() {
                return Err((idx + 1, format!("no extensions listed for {}", mime)));
            }
            self = self.define(mime, exts);
        }
        Ok(self)
    }

    /// MIME type for `filename`. Never fails; unknown names get [`DEFAULT_MIME_TYPE`].
    pub fn lookup(&self, filename: &str) -> String {
        let key = extension_key(filename);
        if let Some(mime) = self.overrides.get(&key) {
            return mime.clone();
        }
        mime_guess::from_ext(&key)
            .first_raw()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string()
    }

    /// Whether `filename` belongs to the `text/*` family.
    pub fn is_text(&self, filename: &str) -> bool {
        self.lookup(filename).starts_with("text/")
    }

    /// Number of supplemental entries.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

// Text after the last separator or dot. A name without a dot is its own key.
fn extension_key(filename: &str) -> String {
    filename
        .rsplit(['/', '\\', '.'])
        .next()
        .unwrap_or(filename)
        .to_ascii_lowercase()
}
