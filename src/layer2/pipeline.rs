// Pipeline - Single-consumer decode, route, render loop
// Sole mutator of aggregator state; upstream only writes to the channel.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::layer2::parser::{parse_match, ParseError};
use crate::layer3::aggregator::Aggregator;
use crate::layer3::output::OutputSink;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Consume raw frames in arrival order until the channel closes or a
/// frame fails to decode.
///
/// Each accepted trade is routed to its pair's window and followed by
/// one render; skipped frames (non-trade kinds, unconfigured pairs)
/// produce no output. A decode failure is terminal: the loop returns
/// the error and drops the receiver, which stops the read loop and
/// signals shutdown. A poison message halts the whole session.
pub async fn run(
    mut frames: mpsc::Receiver<String>,
    aggregator: &mut Aggregator,
    sink: &mut dyn OutputSink,
) -> Result<(), PipelineError> {
    while let Some(frame) = frames.recv().await {
        let parsed = match parse_match(&frame) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                error!(error = %e, "Frame rejected, halting session");
                return Err(e.into());
            }
        };

        if aggregator.route(&parsed.product_id, parsed.price, parsed.size) {
            aggregator.render(sink);
        }
    }

    debug!("Frame channel closed, pipeline finished");
    Ok(())
}
