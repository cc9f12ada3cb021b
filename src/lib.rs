//! Docstring preprocessing for the `pdoc` documentation generator.
//!
//! Lightweight annotation tags (`@param`, `:rtype:` and friends) are rewritten into HTML
//! markup in a temporary copy of a module, `pdoc` documents that copy, and the generated page
//! is then renamed and patched so it refers to the original module.

pub mod annotation;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod orchestrator;

pub use annotation::{AnnotationError, AnnotationRewriter, Delimiter, RewriteOptions, RewriteStats};
pub use config::{Config, ConfigError};
pub use error::PrepError;
pub use orchestrator::{GeneratorCommand, Orchestrator, RunReport, RunSettings};

use std::io::{BufRead, Write};

/// Rewrite annotation tags from `input` to `output` with the given options.
///
/// # Errors
///
/// See [`AnnotationRewriter::rewrite`].
pub fn rewrite<R: BufRead, W: Write>(
    input: R,
    output: W,
    options: RewriteOptions,
) -> Result<RewriteStats, AnnotationError> {
    AnnotationRewriter::new(options).rewrite(input, output)
}
