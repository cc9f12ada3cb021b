//! Surgery on the argument list forwarded to the documentation generator.
//!
//! The generator expects the module path as its last argument, or second to last when an
//! identifier inside the module is requested (`pdoc --html foo.py Foo.bar`). Positions are
//! therefore tracked relative to the end of the list so that flags inserted at the front never
//! invalidate them.

use std::path::{Path, PathBuf};

use crate::error::PrepError;

/// Suffix that identifies the module path among the forwarded arguments
pub const MODULE_SUFFIX: &str = ".py";

/// Generator flag naming the HTML output directory
pub const OUTPUT_DIR_FLAG: &str = "--html-dir";

/// Generator flag selecting HTML generation
pub const GENERATION_MODE_FLAG: &str = "--html";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("No module path ending in '.py' found as last or second-to-last argument")]
    ModuleNotFound,

    #[error("Option '{flag}' requires a value")]
    MissingOptionValue { flag: &'static str },

    #[error("Module path '{path}' has no usable file name")]
    InvalidModuleName { path: PathBuf },
}

/// Where the module path sits, counted from the end of the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulePosition {
    Last,
    /// Followed by a single identifier token
    BeforeIdentifier,
}

impl ModulePosition {
    /// Absolute index for a list of `len` arguments.
    pub fn index(self, len: usize) -> Option<usize> {
        match self {
            Self::Last => len.checked_sub(1),
            Self::BeforeIdentifier => len.checked_sub(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    pub path: PathBuf,
    pub position: ModulePosition,
}

fn is_module_path(arg: &str) -> bool {
    arg.len() > MODULE_SUFFIX.len() && arg.ends_with(MODULE_SUFFIX)
}

/// Find the module path among the forwarded arguments.
///
/// # Errors
///
/// [`ArgumentError::ModuleNotFound`] when neither the last nor (with an identifier following
/// it) the second-to-last argument is a module path.
pub fn locate_module(args: &[String]) -> Result<ModuleLocation, ArgumentError> {
    let (path, position) = match args {
        [.., last] if is_module_path(last) => (last, ModulePosition::Last),
        [.., module, identifier] if is_module_path(module) && !identifier.starts_with('-') => {
            (module, ModulePosition::BeforeIdentifier)
        }
        _ => return Err(ArgumentError::ModuleNotFound),
    };
    Ok(ModuleLocation {
        path: PathBuf::from(path),
        position,
    })
}

/// Make sure the output directory flag is present and absolute, returning its value.
///
/// When the flag is missing, `--html-dir <default_dir>` is inserted at the front. Both
/// `--html-dir DIR` and `--html-dir=DIR` are recognized.
///
/// # Errors
///
/// [`ArgumentError::MissingOptionValue`] when the flag has no value, or a file system error
/// when the current directory is needed to absolutize a relative value and cannot be read.
pub fn ensure_output_directory(args: &mut Vec<String>, default_dir: &Path) -> Result<PathBuf, PrepError> {
    let inline_prefix = format!("{OUTPUT_DIR_FLAG}=");

    for i in 0..args.len() {
        if args[i] == OUTPUT_DIR_FLAG {
            let Some(value) = args.get(i + 1) else {
                return Err(missing_output_dir());
            };
            let dir = absolutize(Path::new(value))?;
            args[i + 1] = dir.display().to_string();
            return Ok(dir);
        }
        if let Some(value) = args[i].strip_prefix(&inline_prefix) {
            if value.is_empty() {
                return Err(missing_output_dir());
            }
            let dir = absolutize(Path::new(value))?;
            args[i] = format!("{inline_prefix}{}", dir.display());
            return Ok(dir);
        }
    }

    args.insert(0, default_dir.display().to_string());
    args.insert(0, OUTPUT_DIR_FLAG.to_string());
    Ok(default_dir.to_path_buf())
}

fn missing_output_dir() -> PrepError {
    ArgumentError::MissingOptionValue { flag: OUTPUT_DIR_FLAG }.into()
}

/// Replace the module path at `position` with `temp_path`.
///
/// # Errors
///
/// [`ArgumentError::ModuleNotFound`] when the list is too short for `position`.
pub fn splice_temp_module(
    args: &mut [String],
    position: ModulePosition,
    temp_path: &Path,
) -> Result<(), ArgumentError> {
    let index = position.index(args.len()).ok_or(ArgumentError::ModuleNotFound)?;
    args[index] = temp_path.display().to_string();
    Ok(())
}

/// Add the HTML generation flag at the front unless already present.
pub fn ensure_generation_mode(args: &mut Vec<String>) {
    if !args.iter().any(|arg| arg == GENERATION_MODE_FLAG) {
        args.insert(0, GENERATION_MODE_FLAG.to_string());
    }
}

pub(crate) fn absolutize(path: &Path) -> Result<PathBuf, PrepError> {
    std::path::absolute(path).map_err(|source| PrepError::FileSystem {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locate_module_last() {
        let location = locate_module(&args(&["--html", "foo.py"])).unwrap();
        assert_eq!(location.path, PathBuf::from("foo.py"));
        assert_eq!(location.position, ModulePosition::Last);
    }

    #[test]
    fn test_locate_module_before_identifier() {
        let location = locate_module(&args(&["--html", "foo.py", "myFunc"])).unwrap();
        assert_eq!(location.path, PathBuf::from("foo.py"));
        assert_eq!(location.position, ModulePosition::BeforeIdentifier);
    }

    #[test]
    fn test_locate_module_failures() {
        assert_eq!(locate_module(&[]), Err(ArgumentError::ModuleNotFound));
        assert_eq!(locate_module(&args(&["myFunc"])), Err(ArgumentError::ModuleNotFound));
        assert_eq!(locate_module(&args(&["--html", "foo.txt"])), Err(ArgumentError::ModuleNotFound));
        assert_eq!(
            locate_module(&args(&["foo.py", "a", "b"])),
            Err(ArgumentError::ModuleNotFound)
        );
        assert_eq!(locate_module(&args(&[".py"])), Err(ArgumentError::ModuleNotFound));
        assert_eq!(
            locate_module(&args(&["foo.py", "--overwrite"])),
            Err(ArgumentError::ModuleNotFound)
        );
    }

    #[test]
    fn test_position_index() {
        assert_eq!(ModulePosition::Last.index(3), Some(2));
        assert_eq!(ModulePosition::BeforeIdentifier.index(3), Some(1));
        assert_eq!(ModulePosition::Last.index(0), None);
        assert_eq!(ModulePosition::BeforeIdentifier.index(1), None);
    }

    #[test]
    fn test_ensure_output_directory_inserts_default() {
        let mut list = args(&["--html", "foo.py"]);
        let dir = ensure_output_directory(&mut list, Path::new("/tmp/mods")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/mods"));
        assert_eq!(list, args(&["--html-dir", "/tmp/mods", "--html", "foo.py"]));

        // The module keeps its position relative to the end
        let location = locate_module(&list).unwrap();
        assert_eq!(location.position, ModulePosition::Last);
        assert_eq!(list[ModulePosition::Last.index(list.len()).unwrap()], "foo.py");
    }

    #[test]
    fn test_ensure_output_directory_absolutizes_existing_value() {
        let mut list = args(&["--html-dir", "docs", "foo.py"]);
        let dir = ensure_output_directory(&mut list, Path::new("/unused")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("docs"));
        assert_eq!(list.len(), 3);
        assert_eq!(list[1], dir.display().to_string());
    }

    #[test]
    fn test_ensure_output_directory_inline_form() {
        let mut list = args(&["--html-dir=/srv/docs", "foo.py"]);
        let dir = ensure_output_directory(&mut list, Path::new("/unused")).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/docs"));
        assert_eq!(list, args(&["--html-dir=/srv/docs", "foo.py"]));
    }

    #[test]
    fn test_ensure_output_directory_missing_value() {
        for list in [args(&["foo.py", "--html-dir"]), args(&["--html-dir=", "foo.py"])] {
            let mut list = list;
            let err = ensure_output_directory(&mut list, Path::new("/tmp")).unwrap_err();
            assert!(matches!(
                err,
                PrepError::Validation(ArgumentError::MissingOptionValue { flag: OUTPUT_DIR_FLAG })
            ));
        }
    }

    #[test]
    fn test_splice_temp_module_keeps_identifier() {
        let mut list = args(&["--html", "foo.py", "Foo.bar"]);
        splice_temp_module(&mut list, ModulePosition::BeforeIdentifier, Path::new("/m/tmp_pdoc_prep_ab12.py")).unwrap();
        assert_eq!(list, args(&["--html", "/m/tmp_pdoc_prep_ab12.py", "Foo.bar"]));

        let mut list = args(&["foo.py"]);
        splice_temp_module(&mut list, ModulePosition::Last, Path::new("t.py")).unwrap();
        assert_eq!(list, args(&["t.py"]));

        let mut empty: Vec<String> = Vec::new();
        assert_eq!(
            splice_temp_module(&mut empty, ModulePosition::Last, Path::new("t.py")),
            Err(ArgumentError::ModuleNotFound)
        );
    }

    #[test]
    fn test_ensure_generation_mode() {
        let mut list = args(&["foo.py"]);
        ensure_generation_mode(&mut list);
        assert_eq!(list, args(&["--html", "foo.py"]));
        ensure_generation_mode(&mut list);
        assert_eq!(list, args(&["--html", "foo.py"]));
    }
}
