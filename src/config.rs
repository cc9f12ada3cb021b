//!
//! This module defines the configuration file format and its discovery.
//! Settings live in `.pdoc-prep.toml`, `pdoc-prep.toml`, or the `[tool.pdoc-prep]` table of
//! `pyproject.toml`:
//!
//! ```toml
//! [tool.pdoc-prep]
//! delimiter = ":"
//! force-type-spec = true
//! generator = ["python3", "-m", "pdoc"]
//! ```

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::annotation::Delimiter;
use crate::orchestrator::GeneratorCommand;

/// Config file names, in order of precedence within one directory
pub const CONFIG_FILES: &[&str] = &[".pdoc-prep.toml", "pdoc-prep.toml", "pyproject.toml"];

const PYPROJECT: &str = "pyproject.toml";
const MAX_DEPTH: usize = 100;

/// Settings read from a config file. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub delimiter: Option<Delimiter>,
    pub force_type_spec: Option<bool>,
    /// Generator command and its leading arguments
    pub generator: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Pyproject {
    tool: Option<PyprojectTool>,
}

#[derive(Debug, Deserialize)]
struct PyprojectTool {
    #[serde(rename = "pdoc-prep")]
    pdoc_prep: Option<Config>,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

impl Config {
    /// Parse a standalone config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseError`] for invalid TOML or unknown keys.
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{path}: {e}")))
    }

    /// Extract the `[tool.pdoc-prep]` table of a `pyproject.toml`, if present.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseError`] for invalid TOML or unknown keys in the table.
    pub fn from_pyproject_str(content: &str, path: &str) -> Result<Option<Self>, ConfigError> {
        let pyproject: Pyproject =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{path}: {e}")))?;
        Ok(pyproject.tool.and_then(|tool| tool.pdoc_prep))
    }

    /// Load a config file; a `pyproject.toml` without our table yields the default config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path_str.clone(),
        })?;
        if is_pyproject(path) {
            Ok(Self::from_pyproject_str(&content, &path_str)?.unwrap_or_default())
        } else {
            Self::from_toml_str(&content, &path_str)
        }
    }

    /// Search `start_dir` and its ancestors for a config file, stopping at a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let mut current_dir = start_dir.to_path_buf();

        for _ in 0..MAX_DEPTH {
            log::debug!("[pdoc-prep-config] Searching for config in: {}", current_dir.display());

            for name in CONFIG_FILES {
                let candidate = current_dir.join(name);
                if !candidate.is_file() {
                    continue;
                }
                if *name == PYPROJECT {
                    let path_str = candidate.display().to_string();
                    let content = fs::read_to_string(&candidate).map_err(|source| ConfigError::IoError {
                        source,
                        path: path_str.clone(),
                    })?;
                    match Self::from_pyproject_str(&content, &path_str)? {
                        Some(config) => {
                            log::debug!("[pdoc-prep-config] Found config file: {path_str}");
                            return Ok(Some((candidate, config)));
                        }
                        None => {
                            log::debug!("[pdoc-prep-config] Found pyproject.toml but no [tool.pdoc-prep] section");
                            continue;
                        }
                    }
                }
                log::debug!("[pdoc-prep-config] Found config file: {}", candidate.display());
                let config = Self::load(&candidate)?;
                return Ok(Some((candidate, config)));
            }

            if current_dir.join(".git").exists() {
                log::debug!("[pdoc-prep-config] Stopping at .git directory");
                break;
            }
            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => break,
            }
        }
        Ok(None)
    }

    /// The configured generator command, if any.
    pub fn generator_command(&self) -> Option<GeneratorCommand> {
        self.generator.clone().and_then(GeneratorCommand::from_words)
    }
}

fn is_pyproject(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == PYPROJECT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            "delimiter = \":\"\nforce-type-spec = true\ngenerator = [\"python3\", \"-m\", \"pdoc\"]\n",
            "test.toml",
        )
        .unwrap();
        assert_eq!(config.delimiter, Some(Delimiter::Colon));
        assert_eq!(config.force_type_spec, Some(true));
        assert_eq!(
            config.generator_command(),
            Some(GeneratorCommand {
                program: "python3".to_string(),
                args: vec!["-m".to_string(), "pdoc".to_string()],
            })
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::from_toml_str("delimiter = \"#\"\n", "bad.toml"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            Config::from_toml_str("colour = true\n", "bad.toml"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_pyproject_section() {
        let content = "[project]\nname = \"demo\"\n\n[tool.pdoc-prep]\ndelimiter = \"@\"\n";
        let config = Config::from_pyproject_str(content, "pyproject.toml").unwrap();
        assert_eq!(
            config,
            Some(Config {
                delimiter: Some(Delimiter::At),
                ..Config::default()
            })
        );

        let without = Config::from_pyproject_str("[tool.black]\nline-length = 100\n", "pyproject.toml").unwrap();
        assert_eq!(without, None);
    }

    #[test]
    fn test_discover_walks_upward() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::write(root.path().join(".pdoc-prep.toml"), "force-type-spec = true\n").unwrap();
        let nested = root.path().join("pkg").join("sub");
        fs::create_dir_all(&nested).unwrap();

        let (path, config) = Config::discover(&nested).unwrap().expect("config should be found");
        assert_eq!(path, root.path().join(".pdoc-prep.toml"));
        assert_eq!(config.force_type_spec, Some(true));
    }

    #[test]
    fn test_discover_skips_pyproject_without_section() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::write(root.path().join("pyproject.toml"), "[project]\nname = \"demo\"\n").unwrap();

        assert!(Config::discover(root.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_stops_at_git_root() {
        let outer = tempdir().unwrap();
        fs::write(outer.path().join("pdoc-prep.toml"), "delimiter = \":\"\n").unwrap();
        let repo = outer.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(Config::discover(&repo).unwrap().is_none());
    }
}
