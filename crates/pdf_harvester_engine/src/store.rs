use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pdf_harvester_core::DocumentName;
use tempfile::Builder;
use thiserror::Error;

/// Default flat directory documents are stored in.
pub const DEFAULT_OUTPUT_DIR: &str = "input_dataset";

const TEMP_PREFIX: &str = ".harvest-";
const TEMP_SUFFIX: &str = ".part";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Directory of documents keyed by name.
///
/// `write` never skips an existing name; deciding to skip is up to the caller.
/// Readers never observe a partially written document under its final name.
pub trait OutputStore: Send + Sync {
    fn exists(&self, name: &DocumentName) -> bool;
    fn write(&self, name: &DocumentName, bytes: &[u8]) -> Result<PathBuf, PersistError>;
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(dir)
            .map_err(|e| PersistError::OutputDir(format!("{}: {e}", dir.display()))),
        Err(err) => Err(PersistError::OutputDir(format!("{}: {err}", dir.display()))),
    }
}

/// Stores `<name>.pdf` files in one flat directory.
///
/// Each write goes to a hidden temp file in the same directory, is synced,
/// then renamed over the final name.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &DocumentName) -> PathBuf {
        self.dir.join(name.file_name())
    }
}

impl OutputStore for DirectoryStore {
    fn exists(&self, name: &DocumentName) -> bool {
        self.path_for(name).is_file()
    }

    fn write(&self, name: &DocumentName, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.path_for(name);
        let mut tmp = Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Rename replaces any existing file in one step; the temp file is
        // removed on drop if this fails.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
