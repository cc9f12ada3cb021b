//! Handler for the default mode: rewrite, generate, relocate and patch.

use colored::*;

use pdoc_prep::exit_codes::exit;
use pdoc_prep::{Orchestrator, RunSettings};

/// Handle a full documentation run.
pub fn handle_run(generator_args: Vec<String>, settings: RunSettings, quiet: bool) {
    let orchestrator = Orchestrator::new(settings);

    // The orchestrator has removed its temporary module by the time it returns,
    // so exiting from here is safe on both paths.
    match orchestrator.run(generator_args) {
        Ok(report) => {
            if !quiet {
                println!(
                    "{} {} {}",
                    "Documented".green().bold(),
                    report.module.display(),
                    format!("-> {}", report.output_path.display()).dimmed()
                );
            }
            exit::success();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::with_code(e.exit_code());
        }
    }
}
