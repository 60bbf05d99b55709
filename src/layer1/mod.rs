// Layer 1 - Websocket Ingestion Session

pub mod websocket;

// Re-export commonly used items for convenience
pub use websocket::{matches_subscription, SocketClient, SocketError};
pub use websocket::{SUBSCRIBE_ATTEMPTS, SUBSCRIBE_RETRY_DELAY};
