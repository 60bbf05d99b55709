// Coinbase Matches VWAP - Entry Point
// Wires config, the websocket session, and the pipeline together.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{error, info, warn};

use coinbase_vwap::core::{setup_logging, Config};
use coinbase_vwap::layer1::{matches_subscription, SocketClient};
use coinbase_vwap::layer2::pipeline;
use coinbase_vwap::layer3::{Aggregator, ConsoleSink};

/// Streams Coinbase match events and prints a sliding-window VWAP per
/// configured trading pair.
#[derive(Debug, Parser)]
#[command(name = "coinbase-vwap", version)]
struct Cli {
    /// Websocket service address, overrides SOCKET_ADDRESS from the config
    #[arg(long)]
    addr: Option<String>,

    /// Path to the JSON configuration file
    #[arg(long, default_value = "conf.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(None);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&cli.config)?;
    config.validate()?;

    let address = cli.addr.unwrap_or_else(|| config.socket_address.clone());

    let mut aggregator = Aggregator::new(&config);
    let mut sink = ConsoleSink::new(config.clear_console);

    let mut client = SocketClient::connect(&address).await?;
    client
        .subscribe(&matches_subscription(&config.trade_pairs))
        .await?;

    // Capacity 1: the reader stalls whenever the consumer is busy.
    let (frame_tx, frame_rx) = mpsc::channel(1);
    let read_handle = client.start_read_loop(frame_tx)?;

    let consume = pipeline::run(frame_rx, &mut aggregator, &mut sink);
    tokio::pin!(consume);

    tokio::select! {
        result = &mut consume => {
            result?;
            info!(state = %client.state(), "Session ended");
        }
        _ = signal::ctrl_c() => {
            info!("Interrupt received, closing session");
            if let Err(e) = client.close().await {
                warn!(error = %e, "Close failed");
            }
            // Best-effort: give the read loop a second to observe the
            // close handshake, then exit regardless.
            if timeout(Duration::from_secs(1), read_handle).await.is_err() {
                warn!("Timed out waiting for read loop shutdown");
            }
        }
    }

    Ok(())
}
