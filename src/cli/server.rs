use clap::Parser;
use error_stack::{Result, ResultExt};
use ignitecall::config::Server as Config;
use std::net::IpAddr;
use std::num::NonZeroUsize;

use super::CommandError;

/// Expose the Ignite Call HTTP API
#[derive(Debug, Parser)]
pub struct ServerCommand {
    #[clap(long)]
    pub address: Option<IpAddr>,
    #[clap(long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub workers: Option<NonZeroUsize>,
}

pub fn run(args: ServerCommand) -> Result<(), CommandError> {
    let mut config = Config::load().change_context(CommandError)?;
    args.override_config(&mut config);

    ignitecall::logging::init(&config.logging).change_context(CommandError)?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.workers {
        runtime.worker_threads(workers.get());
    }

    runtime
        .enable_all()
        .build()
        .change_context(CommandError)
        .attach_printable("could not build tokio runtime")?
        .block_on(ignitecall::server::run(config))
        .change_context(CommandError)
}

impl ServerCommand {
    fn override_config(&self, config: &mut Config) {
        // override server configurations if set by the cli
        if let Some(address) = self.address {
            config.ip = address;
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
    }
}
