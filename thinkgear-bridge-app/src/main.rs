//! ThinkGear session bridge
//!
//! ```bash
//! thinkgear-bridge --port /dev/rfcomm0 --backend ws://localhost:3001 \
//!     --student-id <uuid> --session-id <uuid>
//!
//! # Show serial ports the headset may be paired on
//! thinkgear-bridge --list-ports
//! ```

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use thinkgear_tokio_bridge::{EegBridge, SerialDeviceLink};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if cli.list_ports {
        for port in SerialDeviceLink::list_ports() {
            println!("{port}");
        }
        return Ok(());
    }

    let config = cli.bridge_config()?;
    let mut bridge = EegBridge::new(config);

    let stop = bridge.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Bridge stopped by user");
            stop.stop();
        }

        // Teardown talks to the device and the server; let a second Ctrl-C skip it.
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Forced exit before cleanup finished");
            std::process::exit(130);
        }
    });

    tracing::info!(
        "ThinkGear bridge v{} ({} -> {})",
        env!("CARGO_PKG_VERSION"),
        bridge.config().device.port,
        bridge.config().session_url
    );

    bridge.run().await.context("bridge failed to start")?;

    Ok(())
}
