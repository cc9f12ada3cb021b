//! Handler for `--rewrite-only`: print the rewritten module instead of documenting it.

use colored::*;
use std::fs::File;
use std::io::{self, BufReader, Write};

use pdoc_prep::exit_codes::exit;
use pdoc_prep::orchestrator::locate_module;
use pdoc_prep::{PrepError, RewriteOptions, RewriteStats};

/// Rewrite the located module, or stdin when no arguments were given, to stdout.
pub fn handle_rewrite(generator_args: &[String], options: RewriteOptions) {
    let stdout = io::stdout();
    let result = if generator_args.is_empty() {
        pdoc_prep::rewrite(io::stdin().lock(), stdout.lock(), options).map_err(PrepError::from)
    } else {
        rewrite_module(generator_args, options, stdout.lock())
    };

    match result {
        Ok(stats) => {
            log::debug!("Rewrote {} tag(s) across {} line(s)", stats.tags, stats.lines);
            exit::success();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::with_code(e.exit_code());
        }
    }
}

fn rewrite_module<W: Write>(
    generator_args: &[String],
    options: RewriteOptions,
    out: W,
) -> Result<RewriteStats, PrepError> {
    let location = locate_module(generator_args)?;
    let file = File::open(&location.path).map_err(|source| PrepError::FileSystem {
        path: location.path.clone(),
        source,
    })?;
    Ok(pdoc_prep::rewrite(BufReader::new(file), out, options)?)
}
