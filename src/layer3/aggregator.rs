// Multi-Pair Aggregator - Routes trades to per-pair VWAP windows
// Owns one VwapWindow per configured trading pair.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::core::Config;
use crate::layer3::output::OutputSink;
use crate::layer3::vwap::VwapWindow;

/// Owns the VWAP windows for all configured trading pairs and renders
/// the consolidated snapshot. Mutated only by the pipeline consumer;
/// there are no concurrent writers.
pub struct Aggregator {
    windows: HashMap<String, VwapWindow>,
    trading_pairs: Vec<String>,
}

impl Aggregator {
    /// One window per configured pair, all starting empty. Pair order is
    /// preserved for deterministic rendering.
    pub fn new(config: &Config) -> Self {
        let windows = config
            .trade_pairs
            .iter()
            .map(|pair| (pair.clone(), VwapWindow::new(config.window, pair.clone())))
            .collect();

        Self {
            windows,
            trading_pairs: config.trade_pairs.clone(),
        }
    }

    pub fn pair_count(&self) -> usize {
        self.windows.len()
    }

    /// Route a trade to its pair's window. Unknown pairs are silently
    /// dropped; they are out of scope, not errors. Returns whether the
    /// trade was accepted.
    pub fn route(&mut self, pair: &str, price: f64, volume: f64) -> bool {
        match self.windows.get_mut(pair) {
            Some(window) => {
                window.add(price, volume);
                true
            }
            None => {
                debug!(pair, "Trade for unconfigured pair dropped");
                false
            }
        }
    }

    /// Push the current snapshot through the injected sink.
    pub fn render(&self, sink: &mut dyn OutputSink) {
        sink.publish(&self.to_string());
    }
}

impl fmt::Display for Aggregator {
    /// One line per pair, in configured order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .trading_pairs
            .iter()
            .filter_map(|pair| self.windows.get(pair))
            .map(|window| window.to_string())
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(pairs: &[&str]) -> Config {
        Config {
            trade_pairs: pairs.iter().map(|p| p.to_string()).collect(),
            socket_address: "test".to_string(),
            window: 200,
            clear_console: false,
        }
    }

    #[test]
    fn test_new_creates_window_per_pair() {
        let aggregator = Aggregator::new(&test_config(&["BTC-USD", "ETH-USD", "ETH-BTC"]));
        assert_eq!(aggregator.pair_count(), 3);
    }

    #[test]
    fn test_new_no_pairs() {
        let aggregator = Aggregator::new(&test_config(&[]));
        assert_eq!(aggregator.pair_count(), 0);
        assert_eq!(aggregator.to_string(), "");
    }

    #[test]
    fn test_route_known_and_unknown_pairs() {
        let mut aggregator = Aggregator::new(&test_config(&["BTC-USD"]));
        assert!(aggregator.route("BTC-USD", 1.0, 2.0));
        assert!(!aggregator.route("DOGE-USD", 1.0, 2.0));
    }

    #[test]
    fn test_snapshot_in_configured_order() {
        let expected = "Trading Pair: BTC-USD, VWAP: 1.000000\n\
                        Trading Pair: ETH-USD, VWAP: 2.000000\n\
                        Trading Pair: ETH-BTC, VWAP: 2.000000";
        let mut aggregator = Aggregator::new(&test_config(&["BTC-USD", "ETH-USD", "ETH-BTC"]));

        aggregator.route("BTC-USD", 1.0, 2.0);
        aggregator.route("ETH-BTC", 2.0, 3.0);
        aggregator.route("ETH-USD", 2.0, 3.0);

        assert_eq!(aggregator.to_string(), expected);
    }

    #[test]
    fn test_render_through_sink() {
        struct MemorySink(Vec<String>);
        impl OutputSink for MemorySink {
            fn publish(&mut self, snapshot: &str) {
                self.0.push(snapshot.to_string());
            }
        }

        let aggregator = Aggregator::new(&test_config(&["BTC-USD"]));
        let mut sink = MemorySink(Vec::new());
        aggregator.render(&mut sink);

        assert_eq!(sink.0, vec!["Trading Pair: BTC-USD, VWAP: NaN".to_string()]);
    }
}
