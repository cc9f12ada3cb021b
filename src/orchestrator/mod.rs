//! End-to-end run: rewrite the module into a temporary file, document that file with the
//! generator, then make the result look as if the original module had been documented.
//!
//! # Stages
//!
//! ```text
//! Start -> ModuleLocated -> OutputDirResolved -> TempFileCreated -> Rewritten
//!       -> GeneratorInvoked -> Relocated -> Patched -> CleanedUp
//! ```
//!
//! An error at any stage ends the run. The temporary module is owned by a [`TempModule`]
//! guard, so it is removed on every exit path.

pub mod args;
pub mod generator;
pub mod output;
pub mod temp_module;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub use args::{
    ArgumentError, GENERATION_MODE_FLAG, MODULE_SUFFIX, ModuleLocation, ModulePosition, OUTPUT_DIR_FLAG,
    ensure_generation_mode, ensure_output_directory, locate_module, splice_temp_module,
};
pub use generator::{DEFAULT_GENERATOR, GENERATOR_ENV_VAR, GeneratorCommand, GeneratorExecutor, GeneratorOutput};
pub use output::{ARTIFACT_SUFFIX, artifact_name, module_identifier, patch_identifiers, relocate_output};
pub use temp_module::{TEMP_PREFIX, TempModule};

use crate::annotation::{AnnotationRewriter, RewriteOptions, RewriteStats};
use crate::error::PrepError;

/// Progress of a single run, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    ModuleLocated,
    OutputDirResolved,
    TempFileCreated,
    Rewritten,
    GeneratorInvoked,
    Relocated,
    Patched,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::ModuleLocated => "module located",
            Self::OutputDirResolved => "output directory resolved",
            Self::TempFileCreated => "temporary module created",
            Self::Rewritten => "module rewritten",
            Self::GeneratorInvoked => "generator invoked",
            Self::Relocated => "output relocated",
            Self::Patched => "identifiers patched",
        };
        f.write_str(name)
    }
}

/// Everything a run needs, resolved up front by the caller.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub rewrite: RewriteOptions,
    pub generator: GeneratorCommand,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub module: PathBuf,
    pub output_path: PathBuf,
    pub rewrite: RewriteStats,
    pub replacements: usize,
}

#[derive(Debug)]
pub struct Orchestrator {
    rewriter: AnnotationRewriter,
    executor: GeneratorExecutor,
}

impl Orchestrator {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            rewriter: AnnotationRewriter::new(settings.rewrite),
            executor: GeneratorExecutor::new(settings.generator),
        }
    }

    /// Document the module named in `generator_args`.
    ///
    /// # Errors
    ///
    /// Any [`PrepError`]; the temporary module never outlives this call.
    pub fn run(&self, generator_args: Vec<String>) -> Result<RunReport, PrepError> {
        let mut stage = RunStage::Start;
        let result = self.run_stages(generator_args, &mut stage);
        match &result {
            Ok(report) => log::debug!("Run finished: {}", report.output_path.display()),
            Err(e) => log::debug!("Run halted after stage '{stage}': {e}"),
        }
        result
    }

    fn run_stages(&self, mut args: Vec<String>, stage: &mut RunStage) -> Result<RunReport, PrepError> {
        let location = locate_module(&args)?;
        let module = location.path;
        *stage = RunStage::ModuleLocated;
        log::debug!("Module {} ({:?})", module.display(), location.position);

        let module_dir = containing_dir(&module)?;
        let output_dir = ensure_output_directory(&mut args, &module_dir)?;
        *stage = RunStage::OutputDirResolved;

        let source = File::open(&module).map_err(|source| PrepError::FileSystem {
            path: module.clone(),
            source,
        })?;
        let mut temp = TempModule::create_in(&module_dir)?;
        *stage = RunStage::TempFileCreated;

        let rewrite = self.rewrite_into(source, &mut temp)?;
        *stage = RunStage::Rewritten;
        log::debug!("Rewrote {} tag(s) across {} line(s)", rewrite.tags, rewrite.lines);

        splice_temp_module(&mut args, location.position, temp.path())?;
        let generated = self.invoke_generator(&mut args)?;
        *stage = RunStage::GeneratorInvoked;
        if !generated.stdout.trim().is_empty() {
            log::debug!("Generator stdout:\n{}", generated.stdout);
        }
        if !generated.stderr.trim().is_empty() {
            log::info!("Generator stderr:\n{}", generated.stderr);
        }

        let output_path = relocate_output(&module, temp.path(), &output_dir)?;
        *stage = RunStage::Relocated;

        let replacements = patch_identifiers(&module, &output_path, temp.path())?;
        *stage = RunStage::Patched;

        Ok(RunReport {
            module,
            output_path,
            rewrite,
            replacements,
        })
    }

    fn rewrite_into(&self, source: File, temp: &mut TempModule) -> Result<RewriteStats, PrepError> {
        let path = temp.path().to_path_buf();
        let mut writer = BufWriter::new(temp.as_file_mut());
        let stats = self.rewriter.rewrite(BufReader::new(source), &mut writer)?;
        writer
            .flush()
            .map_err(|source| PrepError::FileSystem { path, source })?;
        Ok(stats)
    }

    /// Run the generator, adding the generation mode flag if missing.
    ///
    /// # Errors
    ///
    /// See [`GeneratorExecutor::invoke`].
    pub fn invoke_generator(&self, args: &mut Vec<String>) -> Result<GeneratorOutput, PrepError> {
        ensure_generation_mode(args);
        self.executor.invoke(args)
    }
}

fn containing_dir(module: &Path) -> Result<PathBuf, PrepError> {
    let absolute = args::absolutize(module)?;
    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ArgumentError::InvalidModuleName { path: module.to_path_buf() }.into())
}
