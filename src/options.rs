use crate::mime::MimeTable;
use std::path::PathBuf;

/// Text files larger than this are listed without content.
pub const DEFAULT_TEXT_SIZE_LIMIT: u64 = 1024 * 1024;
/// Upper bound on files classified at the same time during a listing.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct WorkingDirOptions {
    pub root: PathBuf,
    pub text_size_limit: u64,
    pub max_concurrency: usize,
    pub mime_types: MimeTable,
}
impl Default for WorkingDirOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            text_size_limit: DEFAULT_TEXT_SIZE_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            mime_types: MimeTable::new(),
        }
    }
}
#[derive(Debug, Default)]
pub struct WorkingDirBuilder {
    options: WorkingDirOptions,
}
impl WorkingDirBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: WorkingDirOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn text_size_limit(mut self, limit: u64) -> Self {
        self.options.text_size_limit = limit;
        self
    }
    pub fn max_concurrency(mut self, workers: usize) -> Self {
        self.options.max_concurrency = workers.max(1);
        self
    }
    pub fn mime_types(mut self, table: MimeTable) -> Self {
        self.options.mime_types = table;
        self
    }
    pub fn build(self) -> WorkingDirOptions {
        self.options
    }
}
