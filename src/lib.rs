// Coinbase Matches VWAP Engine
// Streams trade executions from the Coinbase "matches" channel and maintains
// a sliding-window VWAP per configured trading pair.
//
// Layer structure:
// - core:   types, configuration, logging
// - layer1: websocket ingestion session
// - layer2: frame decoding and the single-consumer pipeline
// - layer3: windowed VWAP aggregation and output rendering

pub mod core;
pub mod layer1;
pub mod layer2;
pub mod layer3;
