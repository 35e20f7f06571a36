// xcclean/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use xcclean_common::error::Result;
use xcclean_common::Config;

// Module declarations
pub mod clean;
pub mod completions;
pub mod interactive;
pub mod scan;
pub mod status;

use crate::cli::clean::CleanArgs;
use crate::cli::completions::Completions;
use crate::cli::scan::Scan;
use crate::cli::status::Status;

/// The version banner. The Homebrew formula's test block greps for
/// "xcclean version", so clap's auto version output is not used.
pub fn version_line() -> String {
    format!("xcclean version {}", env!("CARGO_PKG_VERSION"))
}

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Xcode Storage Cleaner CLI - Clean DerivedData, Archives, Device Support, and more",
    long_about = None,
    name = "xcclean",
    bin_name = "xcclean",
    disable_version_flag = true,
    after_help = "Run without a subcommand for interactive mode."
)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print version information
    #[arg(short = 'V', long, global = true)]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan for cleanable Xcode storage
    Scan(Scan),
    /// Show the Mac storage overview
    Status(Status),
    /// Remove cleanable Xcode storage
    Clean(CleanArgs),
    /// Generate shell completion scripts
    Completions(Completions),
}

impl CliArgs {
    pub async fn run(&self, config: &Config) -> Result<()> {
        match &self.command {
            Some(Command::Scan(command)) => command.run(config).await,
            Some(Command::Status(command)) => command.run(config).await,
            Some(Command::Clean(command)) => command.run(config).await,
            Some(Command::Completions(command)) => command.run(),
            // Bare `xcclean` drops into interactive mode.
            None => interactive::run(config).await,
        }
    }
}
