use clap::Parser;
use std::path::PathBuf;

mod cli;
mod commands;
mod domain;
mod services;

use cli::{Cli, Commands, ServiceCommands, WhitelistCommands};
use domain::models::{InstallMethod, ServiceView};
use services::config::{default_config_path, load_config, Settings};
use services::launcher::JailOptions;
use services::output::{print_error, print_one, print_out};
use services::runner::{CommandRunner, DryRunner, SystemRunner};
use services::storage::audit;

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_config_path);
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    let settings = Settings::resolve(cli, config);

    let runner: Box<dyn CommandRunner> = if settings.dry_run {
        Box::new(DryRunner::new())
    } else {
        Box::new(SystemRunner::new(settings.json))
    };

    if commands::handle_setup_commands(cli, &settings, runner.as_ref())? {
        return Ok(0);
    }
    if commands::handle_whitelist_commands(cli, &settings)? {
        return Ok(0);
    }
    commands::handle_runtime_commands(cli, &settings, runner.as_ref())
}

fn main() {
    let cli = Cli::parse();
    services::logging::init(cli.verbose);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            print_error(cli.json, &e);
            std::process::exit(1);
        }
    }
}
