//! CLI for the assetlink media linker.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_completions, run_link, run_managers, run_resolve};

/// Top-level CLI for the assetlink media linker.
#[derive(Debug, Parser)]
#[command(name = "assetlink")]
#[command(about = "Resolve timeline clip URLs through asset managers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Manager selection shared by commands that talk to a manager.
#[derive(Debug, Clone, Args)]
pub struct ManagerOpts {
    /// Manager identifier; falls back to the default manager config when omitted.
    #[arg(long, value_name = "ID")]
    pub manager: Option<String>,

    /// Manager setting as KEY=VALUE (VALUE parsed as JSON, else taken as a string). Repeatable.
    #[arg(long = "setting", value_name = "KEY=VALUE", value_parser = commands::parse_setting)]
    pub settings: Vec<(String, serde_json::Value)>,

    /// JSON file with linker args ({"identifier": .., "settings": {..}}); flags override it.
    #[arg(long, value_name = "FILE")]
    pub args: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Link a timeline JSON file and write the result.
    Link {
        /// Timeline JSON file.
        timeline: PathBuf,

        #[command(flatten)]
        manager: ManagerOpts,

        /// Write the linked timeline here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Resolve one entity reference to its location.
    Resolve {
        /// Entity reference to resolve.
        reference: String,

        #[command(flatten)]
        manager: ManagerOpts,
    },

    /// List available managers.
    Managers,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        tracing::debug!("command: {:?}", cli.command);

        match cli.command {
            CliCommand::Link {
                timeline,
                manager,
                output,
            } => run_link(&timeline, &manager, output.as_deref())?,
            CliCommand::Resolve { reference, manager } => run_resolve(&reference, &manager)?,
            CliCommand::Managers => run_managers()?,
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}
