// Layer 3 - Windowed VWAP Aggregation

pub mod aggregator;
pub mod output;
pub mod vwap;

// Re-export commonly used items for convenience
pub use aggregator::Aggregator;
pub use output::{ConsoleSink, OutputSink};
pub use vwap::VwapWindow;
