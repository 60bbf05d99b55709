// Core Module - Foundational types, config, logging

pub mod types;
pub mod config;
pub mod logger;

// Re-export commonly used items for convenience
pub use types::SessionState;
pub use config::{Config, ConfigError};
pub use logger::setup_logging;
