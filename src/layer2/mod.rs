// Layer 2 - Frame Decoding & Pipeline

pub mod parser;
pub mod pipeline;

// Re-export commonly used items for convenience
pub use parser::{parse_match, MatchFrame, ParseError, ParsedMatch};
pub use pipeline::{run, PipelineError};
