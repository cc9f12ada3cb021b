//! Invocation of the external documentation generator.
//!
//! The generator runs to completion with no timeout; its output is captured so that a failure
//! can be reported together with what the generator printed.

use std::io;
use std::process::{Command, Stdio};

use crate::error::PrepError;

/// Generator used when nothing else is configured
pub const DEFAULT_GENERATOR: &str = "pdoc";

/// Environment variable overriding the generator command
pub const GENERATOR_ENV_VAR: &str = "PDOC_PREP_GENERATOR";

/// Command line used to start the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    /// Executable name or path
    pub program: String,
    /// Arguments placed before the forwarded ones (e.g. `-m pdoc`)
    pub args: Vec<String>,
}

impl GeneratorCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a word list whose first element is the executable.
    pub fn from_words(words: Vec<String>) -> Option<Self> {
        let mut words = words.into_iter();
        let program = words.next().filter(|p| !p.is_empty())?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    /// Parse a whitespace-separated command such as `python3 -m pdoc`.
    pub fn parse(command: &str) -> Option<Self> {
        Self::from_words(command.split_whitespace().map(str::to_string).collect())
    }
}

impl Default for GeneratorCommand {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATOR)
    }
}

/// Captured result of a successful generator run.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone)]
pub struct GeneratorExecutor {
    command: GeneratorCommand,
}

impl GeneratorExecutor {
    pub fn new(command: GeneratorCommand) -> Self {
        Self { command }
    }

    /// Run the generator with `args` appended to the configured command.
    ///
    /// # Errors
    ///
    /// [`PrepError::GeneratorNotFound`] if the executable cannot be found, and
    /// [`PrepError::GeneratorFailure`] if it cannot be started or exits unsuccessfully.
    pub fn invoke(&self, args: &[String]) -> Result<GeneratorOutput, PrepError> {
        let program = &self.command.program;
        log::debug!("Running {program} {} {}", self.command.args.join(" "), args.join(" "));

        let output = Command::new(program)
            .args(&self.command.args)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PrepError::GeneratorNotFound {
                    program: program.clone(),
                },
                _ => PrepError::GeneratorFailure {
                    program: program.clone(),
                    code: None,
                    stderr: format!("Failed to spawn: {e}"),
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(PrepError::GeneratorFailure {
                program: program.clone(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(GeneratorOutput { stdout, stderr })
    }
}
