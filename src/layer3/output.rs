// Output Sink - Rendering collaborator for aggregator snapshots
// Terminal control stays here, outside the aggregation logic.

/// Destination for rendered snapshots. The aggregator calls through
/// this interface and never touches the terminal itself.
pub trait OutputSink {
    fn publish(&mut self, snapshot: &str);
}

/// Prints snapshots to stdout, optionally clearing the terminal first.
pub struct ConsoleSink {
    clear_console: bool,
}

impl ConsoleSink {
    pub fn new(clear_console: bool) -> Self {
        Self { clear_console }
    }
}

impl OutputSink for ConsoleSink {
    fn publish(&mut self, snapshot: &str) {
        if self.clear_console {
            // ANSI clear-screen plus cursor home.
            print!("\x1B[2J\x1B[1;1H");
        }
        println!("{}", snapshot);
    }
}
