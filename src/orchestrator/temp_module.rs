//! Temporary copy of the module that the generator documents in place of the original.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::args::MODULE_SUFFIX;
use crate::error::PrepError;

/// File name prefix of temporary modules
pub const TEMP_PREFIX: &str = "tmp_pdoc_prep_";

/// A uniquely named copy of the module, removed when dropped.
///
/// The generator imports the module, so the interpreter may also leave
/// `__pycache__/<stem>.*.pyc` behind; those are swept on drop as well.
#[derive(Debug)]
pub struct TempModule {
    file: NamedTempFile,
}

impl TempModule {
    /// Create an empty temporary module inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns a file system error if the file cannot be created.
    pub fn create_in(dir: &Path) -> Result<Self, PrepError> {
        let file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(MODULE_SUFFIX)
            .tempfile_in(dir)
            .map_err(|source| PrepError::FileSystem {
                path: dir.to_path_buf(),
                source,
            })?;
        log::debug!("Created temporary module {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn as_file_mut(&mut self) -> &mut File {
        self.file.as_file_mut()
    }

    /// Module identifier (file stem) of the temporary file.
    pub fn identifier(&self) -> &str {
        self.path().file_stem().and_then(|s| s.to_str()).unwrap_or(TEMP_PREFIX)
    }

    fn bytecode_leftovers(&self) -> Vec<PathBuf> {
        let Some(cache_dir) = self.path().parent().map(|dir| dir.join("__pycache__")) else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(&cache_dir) else {
            return Vec::new();
        };
        let prefix = format!("{}.", self.identifier());
        entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".pyc"))
            })
            .collect()
    }
}

impl Drop for TempModule {
    fn drop(&mut self) {
        for leftover in self.bytecode_leftovers() {
            if let Err(e) = fs::remove_file(&leftover) {
                log::debug!("Could not remove {}: {e}", leftover.display());
            }
        }
        log::debug!("Removing temporary module {}", self.path().display());
        // The NamedTempFile field deletes the module itself right after this.
    }
}
