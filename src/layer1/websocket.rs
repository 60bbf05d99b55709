// WebSocket Ingestion Session
// Manages one persistent connection to the Coinbase matches feed:
// connect, subscribe with bounded retry, read loop, graceful close.

use futures::stream::{SplitSink, SplitStream};
use futures::{Sink, SinkExt, Stream, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use crate::core::SessionState;

/// Total subscription send attempts before giving up.
pub const SUBSCRIBE_ATTEMPTS: u32 = 5;
/// Pause between subscription attempts.
pub const SUBSCRIBE_RETRY_DELAY: Duration = Duration::from_secs(2);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("websocket connect failed: {0}")]
    Connect(#[source] WsError),
    #[error("subscription exhausted after {attempts} attempts: {source}")]
    SubscribeExhausted {
        attempts: u32,
        #[source]
        source: WsError,
    },
    #[error("websocket send failed: {0}")]
    Send(#[from] WsError),
    #[error("read loop already started")]
    AlreadyReading,
}

/// Builds the matches channel subscription message for the given pairs.
/// Each pair is double-quoted and comma-joined into the fixed template.
pub fn matches_subscription(pairs: &[String]) -> String {
    let wrapped: Vec<String> = pairs.iter().map(|p| format!("\"{}\"", p)).collect();
    format!(
        "\n\t{{\n\t   \"type\":\"subscribe\",\n\t   \"channels\":[\n\t\t  {{\n\t\t\t \"name\":\"matches\",\n\t\t\t \"product_ids\":[{}]\n\t\t  }}\n\t   ]\n\t}}\n",
        wrapped.join(",")
    )
}

/// One websocket session supplying raw trade frames.
///
/// The write half stays with the client for subscribe/close; the read
/// half moves into the spawned read loop. The session only ever writes
/// to the hand-off channel, never to aggregator state.
pub struct SocketClient {
    write: SplitSink<WsStream, Message>,
    read: Option<SplitStream<WsStream>>,
    state: Arc<RwLock<SessionState>>,
}

impl SocketClient {
    /// Establish the connection. Failure here is terminal, no retry.
    pub async fn connect(address: &str) -> Result<Self, SocketError> {
        let url = format!("wss://{}", address);
        let state = Arc::new(RwLock::new(SessionState::Connecting));

        info!(url = %url, "Connecting to websocket");

        match connect_async(url.as_str()).await {
            Ok((stream, _response)) => {
                let (write, read) = stream.split();
                *state.write() = SessionState::Subscribing;
                Ok(Self {
                    write,
                    read: Some(read),
                    state,
                })
            }
            Err(e) => {
                error!(error = %e, url = %url, "Websocket connect failed");
                Err(SocketError::Connect(e))
            }
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Send the subscription request, retrying up to SUBSCRIBE_ATTEMPTS
    /// times with SUBSCRIBE_RETRY_DELAY between attempts. On exhaustion
    /// the session is Failed and never enters Streaming.
    pub async fn subscribe(&mut self, message: &str) -> Result<(), SocketError> {
        match subscribe_with_retry(&mut self.write, message).await {
            Ok(()) => {
                *self.state.write() = SessionState::Streaming;
                Ok(())
            }
            Err(e) => {
                *self.state.write() = SessionState::Failed;
                Err(e)
            }
        }
    }

    /// Spawn the read loop. Every inbound text frame is pushed unmodified
    /// onto `frames`; the channel is bounded, so a slow consumer stalls
    /// the producer. The returned handle completes when the loop exits
    /// and doubles as the session shutdown signal.
    pub fn start_read_loop(
        &mut self,
        frames: mpsc::Sender<String>,
    ) -> Result<JoinHandle<()>, SocketError> {
        let read = self.read.take().ok_or(SocketError::AlreadyReading)?;
        let state = self.state.clone();
        Ok(tokio::spawn(read_frames(read, frames, state)))
    }

    /// Send a normal-closure frame. Does not wait for the read loop to
    /// observe the closure; the caller waits on the read-loop handle.
    pub async fn close(&mut self) -> Result<(), SocketError> {
        info!("Sending close frame");
        *self.state.write() = SessionState::Closing;
        self.write
            .send(Message::Close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "".into(),
            })))
            .await?;
        Ok(())
    }
}

/// Bounded iterative retry around the subscription send. The attempt
/// counter is the loop invariant: exactly SUBSCRIBE_ATTEMPTS sends are
/// made before exhaustion is reported.
async fn subscribe_with_retry<S>(sink: &mut S, message: &str) -> Result<(), SocketError>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match sink.send(Message::Text(message.to_string())).await {
            Ok(()) => {
                debug!(attempt, "Subscription request sent");
                return Ok(());
            }
            Err(e) if attempt >= SUBSCRIBE_ATTEMPTS => {
                error!(attempt, error = %e, "Subscription exhausted");
                return Err(SocketError::SubscribeExhausted {
                    attempts: attempt,
                    source: e,
                });
            }
            Err(e) => {
                warn!(attempt, error = %e, "Failed to send subscription request, retrying");
                tokio::time::sleep(SUBSCRIBE_RETRY_DELAY).await;
            }
        }
    }
}

/// The read loop body. Runs until a read error, a close frame, the end
/// of the stream, or the consumer dropping the channel.
async fn read_frames<S>(
    mut stream: S,
    frames: mpsc::Sender<String>,
    state: Arc<RwLock<SessionState>>,
) where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    while let Some(item) = stream.next().await {
        match item {
            Ok(Message::Text(text)) => {
                if frames.send(text).await.is_err() {
                    // Consumer gone (fail-stop downstream); stop reading.
                    debug!("Frame consumer dropped, stopping read loop");
                    *state.write() = SessionState::Closed;
                    return;
                }
            }
            Ok(Message::Close(frame)) => {
                info!(frame = ?frame, "Close frame received");
                *state.write() = SessionState::Closed;
                return;
            }
            // Pings are answered by tungstenite itself; binary frames are
            // not part of the matches protocol.
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Websocket read failed");
                *state.write() = SessionState::Failed;
                return;
            }
        }
    }

    *state.write() = SessionState::Closed;
}
