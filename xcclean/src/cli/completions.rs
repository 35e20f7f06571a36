// xcclean/src/cli/completions.rs
use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use xcclean_common::error::Result;

#[derive(Args, Debug)]
pub struct Completions {
    /// The shell to generate a completion script for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl Completions {
    pub fn run(&self) -> Result<()> {
        let mut cmd = crate::cli::CliArgs::command();
        generate(self.shell, &mut cmd, "xcclean", &mut io::stdout());
        Ok(())
    }
}
