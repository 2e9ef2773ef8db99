//! pocsag-bridge binary
//!
//! Minimal entrypoint: read the environment, wire the live source and
//! sink into the bridge, and run the consumption loop until killed.

use anyhow::Context;
use pocsag_bridge::{Bridge, BridgeConfig, NtfySource, PocsagTransmitter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    pocsag_bridge::logging::init(&log_level);

    let config = BridgeConfig::from_env().context("loading configuration")?;
    let source = NtfySource::new(&config).context("building SSE client")?;
    let sink = PocsagTransmitter::new();

    Bridge::new(config, source, sink).run().await;
    Ok(())
}
