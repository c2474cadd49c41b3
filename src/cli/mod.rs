use clap::Parser;
use error_stack::Result;
use thiserror::Error;

mod server;

/// Command line options for Ignite Call.
#[derive(Debug, Parser)]
#[command(about = "Ignite Call scheduling backend", version, author, long_about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Error)]
#[error("Command failed")]
pub struct CommandError;

impl Cli {
    pub fn run(self) -> Result<(), CommandError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Server(self::server::ServerCommand),
}
