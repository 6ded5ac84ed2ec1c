//! compression-info
//!
//! Loads every backend this build knows about and prints what would be
//! advertised to a peer.
use std::io::Write;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wirepack_core::compression::registry;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let registry = registry::init_all();
    let caps = registry.capability_map(true);

    let mut out = std::io::stdout().lock();
    write!(out, "{}", caps).context("writing capability listing")?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
