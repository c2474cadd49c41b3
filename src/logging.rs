use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber. `RUST_LOG` wins over
/// `logging.targets` when both are set.
pub fn init(config: &Logging) -> Result<(), TracingInitError> {
    let targets = std::env::var("RUST_LOG").unwrap_or_else(|_| config.targets.clone());
    let layer = match config.style {
        LoggingStyle::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        LoggingStyle::Full => tracing_subscriber::fmt::layer().boxed(),
        LoggingStyle::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
    };

    let registry = tracing_subscriber::Registry::default()
        .with(layer.with_filter(make_env_filter(&targets)))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    Ok(())
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
