//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::RobotId;

/// Robot fleet registry on a self-balancing AVL tree, driven by scripts
#[derive(Parser, Debug)]
#[command(name = "swarm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Lowest accepted robot id (overrides config)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub min_key: Option<RobotId>,

    /// Highest accepted robot id (overrides config)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub max_key: Option<RobotId>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a script and print the output of every command
    Run {
        /// Script file, one command per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Run a script silently, then print the parenthesized dump
    Dump {
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Run a script silently, then draw the resulting tree
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Run a script silently, then list robots in id order
    List {
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Run a script silently, then verify ordering and balance
    Check {
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
}
