//! Logging setup: console stream plus an append-only log file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the process-wide subscriber with two sinks: a fmt layer on stdout
/// and an ANSI-free fmt layer appending to `log_file`. Both carry timestamp,
/// level, target and message.
///
/// Built explicitly by `main` and installed exactly once; no other module
/// touches logging configuration.
pub fn init(level: Level, log_file: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passiv_rebalance={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .init();

    Ok(())
}
