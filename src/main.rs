use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::Path;

use pdoc_prep::exit_codes::exit;
use pdoc_prep::orchestrator::GENERATOR_ENV_VAR;
use pdoc_prep::{Config, GeneratorCommand, RewriteOptions, RunSettings};

mod cli_types;
mod commands;

use cli_types::Cli;

fn load_config(cli: &Cli) -> Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }
    if let Some(path) = cli.config.as_deref() {
        return Config::load(Path::new(path)).with_context(|| format!("Could not load config file '{path}'"));
    }
    let cwd = std::env::current_dir().context("Could not determine the current directory")?;
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            log::debug!("Using config file {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Merge CLI flags, the generator override from the environment, and the config file.
/// Precedence: CLI > environment > config > defaults.
fn resolve_settings(cli: &Cli, config: &Config, env_generator: Option<&str>) -> RunSettings {
    let env_command = env_generator.and_then(|value| {
        let command = GeneratorCommand::parse(value);
        if command.is_none() {
            log::warn!("Ignoring empty {GENERATOR_ENV_VAR}");
        }
        command
    });

    RunSettings {
        rewrite: RewriteOptions {
            delimiter: cli.delimiter.or(config.delimiter).unwrap_or_default(),
            force_type_spec: cli.force_type_spec || config.force_type_spec.unwrap_or(false),
        },
        generator: env_command.or_else(|| config.generator_command()).unwrap_or_default(),
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            exit::tool_error();
        }
    };

    let env_generator = std::env::var(GENERATOR_ENV_VAR).ok();
    let settings = resolve_settings(&cli, &config, env_generator.as_deref());
    log::debug!(
        "Delimiter '{}', force type spec: {}, generator: {:?}",
        settings.rewrite.delimiter,
        settings.rewrite.force_type_spec,
        settings.generator
    );

    if cli.rewrite_only {
        commands::rewrite::handle_rewrite(&cli.generator_args, settings.rewrite);
    } else {
        commands::run::handle_run(cli.generator_args, settings, cli.quiet);
    }
}
