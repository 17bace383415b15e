//! CLI argument definitions using clap.
//!
//! Two modes, as subcommands:
//!
//! - `file`: migrate a single .ts or .vue file
//! - `dir`: recursively migrate every eligible file in a directory
//!
//! Both accept `--sfc` to restructure migrated .vue documents into
//! single-file components afterwards.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::File(cmd)) => cmd.common.verbose,
            Some(Command::Dir(cmd)) => cmd.common.verbose,
            None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Module the generated defineComponent import points at (overrides
    /// config file)
    #[arg(long, env = "VUEMIGRATE_IMPORT_SOURCE")]
    pub import_source: Option<String>,

    /// Restructure migrated .vue documents into single-file components
    #[arg(long)]
    pub sfc: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct FileCommand {
    /// Path of the .ts or .vue file to migrate
    pub path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DirCommand {
    /// Directory scanned recursively for migratable files
    pub path: PathBuf,

    /// Skip not-yet-started files after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Glob patterns to exclude (can be given multiple times)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Migrate a single Vue class component file
    File(FileCommand),
    /// Recursively migrate every eligible file in a directory
    Dir(DirCommand),
}
