use std::io;
use std::path::PathBuf;

use crate::annotation::AnnotationError;
use crate::exit_codes::{GENERATOR_FAILED, TOOL_ERROR};
use crate::orchestrator::ArgumentError;

/// Errors that end a run
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// Malformed or missing command line input
    #[error(transparent)]
    Validation(#[from] ArgumentError),

    /// Annotation tags that cannot be rewritten
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error("Documentation generator '{program}' not found")]
    GeneratorNotFound { program: String },

    /// The generator ran but did not succeed
    #[error("Documentation generator '{program}' failed ({}){}", describe_exit(.code), describe_stderr(.stderr))]
    GeneratorFailure {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to access {path}: {source}")]
    FileSystem { path: PathBuf, source: io::Error },
}

impl PrepError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::GeneratorFailure { .. } => GENERATOR_FAILED,
            _ => TOOL_ERROR,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}
