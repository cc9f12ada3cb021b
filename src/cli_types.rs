use clap::Parser;
use pdoc_prep::Delimiter;

/// Rewrite docstring annotation tags into HTML, then document the module with pdoc.
///
/// Options not listed below are forwarded to the generator. The module path must be the last
/// forwarded argument, or the second to last when followed by an identifier.
#[derive(Parser, Debug)]
#[command(name = "pdoc-prep", author, version, about)]
pub struct Cli {
    /// Character that introduces annotation tags: '@' (Epydoc) or ':' (Sphinx) [default: @]
    #[arg(long)]
    pub delimiter: Option<Delimiter>,

    /// Fail when a parameter or return tag has no accompanying type tag
    #[arg(long, visible_alias = "require-type-spec")]
    pub force_type_spec: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Ignore all configuration files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Only rewrite the module (or stdin) to stdout; do not run the generator
    #[arg(long, help = "Print the rewritten module to stdout without running the generator")]
    pub rewrite_only: bool,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Arguments for the documentation generator, ending with the module path
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GENERATOR_ARGS")]
    pub generator_args: Vec<String>,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
