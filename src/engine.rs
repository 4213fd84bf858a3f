use crate::classify::classify;
use crate::error::SessionDirError;
use crate::options::WorkingDirOptions;
use crate::save::{FileWriter, StdFileWriter, save_with_backup};
use crate::types::{BinaryFile, FileInfo, Listing};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
#[cfg(feature = "logging")]
use tracing;

/// A directory that a session reads from and writes to.
///
/// Cheap to clone and immutable. Every call goes back to the filesystem;
/// no file state is cached between calls. The classification pool is built
/// once and shared by clones.
#[derive(Clone)]
pub struct WorkingDirectory {
    options: WorkingDirOptions,
    writer: Arc<dyn FileWriter>,
    #[cfg(feature = "parallel")]
    pool: Arc<rayon::ThreadPool>,
}

impl std::fmt::Debug for WorkingDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingDirectory")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl WorkingDirectory {
    pub fn new(options: WorkingDirOptions) -> Result<Self, SessionDirError> {
        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.max_concurrency.max(1))
            .build()
            .map_err(|e| SessionDirError::Pool(e.to_string()))?;
        Ok(Self {
            options,
            writer: Arc::new(StdFileWriter),
            #[cfg(feature = "parallel")]
            pool: Arc::new(pool),
        })
    }

    /// Replaces the write primitive used by [`WorkingDirectory::save_file`].
    pub fn with_writer(mut self, writer: impl FileWriter + 'static) -> Self {
        self.writer = Arc::new(writer);
        self
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    pub fn options(&self) -> &WorkingDirOptions {
        &self.options
    }

    /// Lists and classifies every entry directly under the root.
    ///
    /// Ignored names are absent from the result. The first failing entry
    /// fails the whole listing.
    pub fn list_all(&self) -> Result<Listing, SessionDirError> {
        #[cfg(feature = "logging")]
        tracing::debug!("Listing {}", self.options.root.display());
        let names = self.entry_names()?;
        #[cfg(not(feature = "parallel"))]
        let infos = self.classify_all(&names)?;
        #[cfg(feature = "parallel")]
        let infos = self.classify_all_parallel(&names)?;
        let listing: Listing = infos
            .into_iter()
            .flatten()
            .map(FileInfo::into_entry)
            .collect();
        #[cfg(feature = "logging")]
        tracing::debug!(
            "Listed {} of {} entries in {}",
            listing.len(),
            names.len(),
            self.options.root.display()
        );
        Ok(listing)
    }

    /// Classifies one filename. `Ok(None)` means the name is ignored.
    pub fn get_file_info(&self, filename: &str) -> Result<Option<FileInfo>, SessionDirError> {
        check_relative(filename)?;
        classify(
            &self.options.root,
            filename,
            self.options.text_size_limit,
            &self.options.mime_types,
        )
    }

    /// Overwrites (or creates) `filename`, rolling back on a failed write.
    pub fn save_file(&self, filename: &str, contents: &[u8]) -> Result<(), SessionDirError> {
        let path = self.resolve(filename)?;
        save_with_backup(self.writer.as_ref(), &path, contents)
    }

    pub fn rename_file(&self, old: &str, new: &str) -> Result<(), SessionDirError> {
        let from = self.resolve(old)?;
        let to = self.resolve(new)?;
        fs::rename(&from, &to).map_err(|e| SessionDirError::io(from, e))
    }

    pub fn delete_file(&self, filename: &str) -> Result<(), SessionDirError> {
        let path = self.resolve(filename)?;
        fs::remove_file(&path).map_err(|e| SessionDirError::io(path, e))
    }

    /// Raw bytes as base64, with the MIME type of the name.
    pub fn read_binary(&self, filename: &str) -> Result<BinaryFile, SessionDirError> {
        let path = self.resolve(filename)?;
        let bytes = fs::read(&path).map_err(|e| SessionDirError::io(&path, e))?;
        Ok(BinaryFile {
            content: STANDARD.encode(bytes),
            mime_type: self.options.mime_types.lookup(filename),
        })
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf, SessionDirError> {
        check_relative(filename)?;
        Ok(self.options.root.join(filename))
    }

    fn entry_names(&self) -> Result<Vec<String>, SessionDirError> {
        let root = &self.options.root;
        let metadata = fs::metadata(root).map_err(|e| SessionDirError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(SessionDirError::io(
                root,
                io::Error::from(io::ErrorKind::NotADirectory),
            ));
        }
        let walker = WalkBuilder::new(root)
            .max_depth(Some(1))
            .hidden(false)
            .parents(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .build();
        let mut names = Vec::new();
        for result in walker {
            let entry = result.map_err(|e| SessionDirError::Walk(e.to_string()))?;
            if entry.depth() == 0 {
                continue;
            }
            let name = entry.file_name().to_str().ok_or_else(|| {
                SessionDirError::InvalidPath(format!(
                    "non UTF-8 entry in {}: {}",
                    root.display(),
                    entry.path().display()
                ))
            })?;
            names.push(name.to_string());
        }
        Ok(names)
    }

    #[cfg(not(feature = "parallel"))]
    fn classify_all(&self, names: &[String]) -> Result<Vec<Option<FileInfo>>, SessionDirError> {
        let mut infos = Vec::with_capacity(names.len());
        for name in names {
            infos.push(classify(
                &self.options.root,
                name,
                self.options.text_size_limit,
                &self.options.mime_types,
            )?);
        }
        Ok(infos)
    }

    #[cfg(feature = "parallel")]
    fn classify_all_parallel(
        &self,
        names: &[String],
    ) -> Result<Vec<Option<FileInfo>>, SessionDirError> {
        self.pool.install(|| {
            names
                .par_iter()
                .map(|name| {
                    classify(
                        &self.options.root,
                        name,
                        self.options.text_size_limit,
                        &self.options.mime_types,
                    )
                })
                .collect()
        })
    }
}

fn check_relative(filename: &str) -> Result<(), SessionDirError> {
    let path = Path::new(filename);
    if filename.is_empty() || path.is_absolute() || path.has_root() {
        return Err(SessionDirError::InvalidPath(format!(
            "expected a name relative to the working directory: {:?}",
            filename
        )));
    }
    Ok(())
}
