//! Post-processing of the generated HTML artifact.

use std::fs;
use std::path::{Path, PathBuf};

use super::args::ArgumentError;
use crate::error::PrepError;

/// Suffix the generator gives a module's HTML page
pub const ARTIFACT_SUFFIX: &str = ".m.html";

/// Module identifier of a module path: its file stem.
///
/// # Errors
///
/// [`ArgumentError::InvalidModuleName`] for paths without a UTF-8 file stem.
pub fn module_identifier(module: &Path) -> Result<&str, ArgumentError> {
    module
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ArgumentError::InvalidModuleName {
            path: module.to_path_buf(),
        })
}

/// File name of the page generated for `module`, e.g. `test_doc.py` -> `test_doc.m.html`.
///
/// # Errors
///
/// See [`module_identifier`].
pub fn artifact_name(module: &Path) -> Result<String, ArgumentError> {
    Ok(format!("{}{ARTIFACT_SUFFIX}", module_identifier(module)?))
}

/// Move the page generated for the temporary module to the name expected for the original.
///
/// # Errors
///
/// Returns a file system error naming the expected artifact if it is missing or cannot be moved.
pub fn relocate_output(original_module: &Path, temp_module: &Path, output_dir: &Path) -> Result<PathBuf, PrepError> {
    let produced = output_dir.join(artifact_name(temp_module)?);
    let target = output_dir.join(artifact_name(original_module)?);

    fs::rename(&produced, &target).map_err(|source| PrepError::FileSystem {
        path: produced.clone(),
        source,
    })?;
    log::debug!("Moved {} to {}", produced.display(), target.display());
    Ok(target)
}

/// Replace every occurrence of the temporary module's identifier with the original's.
///
/// This is a plain substring replacement, so an unrelated token that happens to contain the
/// temporary identifier would be rewritten too. Returns the number of replacements.
///
/// # Errors
///
/// Returns a file system error if the artifact cannot be read or written.
pub fn patch_identifiers(original_module: &Path, output_path: &Path, temp_module: &Path) -> Result<usize, PrepError> {
    let original_id = module_identifier(original_module)?;
    let temp_id = module_identifier(temp_module)?;

    let fs_error = |source| PrepError::FileSystem {
        path: output_path.to_path_buf(),
        source,
    };
    let content = fs::read_to_string(output_path).map_err(fs_error)?;
    let count = content.matches(temp_id).count();
    fs::write(output_path, content.replace(temp_id, original_id)).map_err(fs_error)?;

    log::debug!("Replaced {count} occurrence(s) of '{temp_id}' with '{original_id}'");
    Ok(count)
}
