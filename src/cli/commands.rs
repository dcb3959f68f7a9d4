use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{load_script, ScriptRunner};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{KeyRange, Swarm};
use crate::tree_traits::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run { script }) => _run(cli, script),
        Some(Commands::Dump { script }) => _dump(cli, script),
        Some(Commands::Tree { script }) => _tree(cli, script),
        Some(Commands::List { script }) => _list(cli, script),
        Some(Commands::Check { script }) => _check(cli, script),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `swarm --help`".to_string(),
        )),
    }
}

/// Effective settings with command line overrides, plus their validated key range.
fn load_settings(cli: &Cli) -> CliResult<(Settings, KeyRange)> {
    let settings = Settings::load(cli.config.as_deref())?.with_overrides(cli.min_key, cli.max_key);
    let range = settings.key_range()?;
    Ok((settings, range))
}

/// Build an empty swarm from the effective settings and run `script` on it.
fn run_script(cli: &Cli, script: &Path) -> CliResult<(Swarm, Vec<String>)> {
    let (_, range) = load_settings(cli)?;
    let swarm = Swarm::with_range(range);
    let commands = load_script(script)?;
    debug!(commands = commands.len(), range = %swarm.range(), "running script");
    let mut runner = ScriptRunner::new(swarm);
    let lines = runner.run(&commands);
    Ok((runner.into_swarm(), lines))
}

#[instrument(skip(cli))]
fn _run(cli: &Cli, script: &Path) -> CliResult<()> {
    let (_, lines) = run_script(cli, script)?;
    for line in lines {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _dump(cli: &Cli, script: &Path) -> CliResult<()> {
    let (swarm, _) = run_script(cli, script)?;
    output::info(&swarm.dump());
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, script: &Path) -> CliResult<()> {
    let (swarm, _) = run_script(cli, script)?;
    print!("{}", swarm.to_tree_string());
    Ok(())
}

#[instrument(skip(cli))]
fn _list(cli: &Cli, script: &Path) -> CliResult<()> {
    let (swarm, _) = run_script(cli, script)?;
    output::header(&format!("{} robots in {}", swarm.len(), swarm.range()));
    if !swarm.is_empty() {
        output::info(&swarm.list().iter().join("\n"));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _check(cli: &Cli, script: &Path) -> CliResult<()> {
    let (swarm, _) = run_script(cli, script)?;
    match swarm.verify() {
        Ok(()) => {
            output::success(&format!(
                "{} robots, height {}, ordered and balanced",
                swarm.len(),
                swarm.height()
            ));
            Ok(())
        }
        Err(e) => {
            output::failure(&e);
            Err(CliError::Check(e))
        }
    }
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let (settings, _) = load_settings(cli)?;
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Template => print!("{}", Settings::template()),
    }
    Ok(())
}
