//! # Sessiondir
//!
//! `sessiondir` is the working-directory layer of an editing session backend. It lists a
//! directory, decides per entry whether it is text, binary, or ignored, loads small text
//! files as UTF-8 with `\n` line endings, and overwrites files with an in-memory backup that
//! is written back if the overwrite fails.
//!
//! Every operation goes to the filesystem; a [`WorkingDirectory`] holds configuration only.
//!
//! # Features
//!
//! - `parallel`: Classifies directory entries on a bounded Rayon pool.
//! - `logging`: Enables debug and warning logs via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use sessiondir::{MimeTable, WorkingDirBuilder, WorkingDirectory};
//!
//! let mime_types = MimeTable::new().define("text/x-octave", ["m"]);
//! let options = WorkingDirBuilder::new("/srv/session")
//!     .text_size_limit(512 * 1024)
//!     .max_concurrency(4)
//!     .mime_types(mime_types)
//!     .build();
//! let dir = WorkingDirectory::new(options).expect("Failed to start worker pool");
//!
//! for (name, entry) in dir.list_all().expect("Failed to list directory") {
//!     println!("{} (text: {})", name, entry.is_text);
//! }
//! dir.save_file("script.m", b"disp(1)\n").expect("Failed to save");
//! ```

pub mod charset;
mod classify;
mod engine;
mod error;
pub mod mime;
mod options;
pub mod output;
mod save;
mod types;

pub use classify::is_ignored;
pub use engine::WorkingDirectory;
pub use error::SessionDirError;
pub use mime::MimeTable;
pub use options::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_TEXT_SIZE_LIMIT, WorkingDirBuilder, WorkingDirOptions,
};
pub use save::{FileWriter, RestoreOutcome, StdFileWriter};
pub use types::{BinaryFile, FileEntry, FileInfo, Listing};
