// VWAP Window - Sliding-window Volume-Weighted Average Price
// Tracks the last `window` trades of one trading pair.

use std::collections::VecDeque;
use std::fmt;

/// Sliding trade-count window for a single trading pair.
///
/// Prices and volumes are parallel FIFO sequences bounded to `window`
/// entries; running extrema and cumulative totals cover exactly the
/// entries currently retained.
///
/// The typical-price-volume product is replaced wholesale on every
/// insertion from the instantaneous typical price and the new total
/// volume, not accumulated per trade. Downstream output depends on
/// that exact formulation.
#[derive(Debug, Clone)]
pub struct VwapWindow {
    pair: String,
    prices: VecDeque<f64>,
    volumes: VecDeque<f64>,
    max_price: f64,
    min_price: f64,
    cumulated_volume: f64,
    cumulated_tpv: f64,
    window: usize,
}

impl VwapWindow {
    /// Create an empty window. `min_price` starts at the largest
    /// representable value so the first observed price becomes the
    /// minimum.
    pub fn new(window: usize, pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            prices: VecDeque::new(),
            volumes: VecDeque::new(),
            max_price: 0.0,
            min_price: f64::MAX,
            cumulated_volume: 0.0,
            cumulated_tpv: 0.0,
            window,
        }
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Evict the oldest entry. If it carried the running maximum or
    /// minimum, the extremum is recomputed over the remaining prices;
    /// that scan is O(window) in the worst case.
    fn evict_oldest(&mut self) {
        if let Some(volume) = self.volumes.pop_front() {
            self.cumulated_volume -= volume;
        }

        if let Some(&oldest) = self.prices.front() {
            if self.max_price == oldest {
                self.max_price = self.prices.iter().skip(1).copied().fold(0.0, f64::max);
            }
            if self.min_price == oldest {
                self.min_price = self
                    .prices
                    .iter()
                    .skip(1)
                    .copied()
                    .fold(f64::MAX, f64::min);
            }
        }

        self.prices.pop_front();
    }

    /// Typical price of the current window given the latest trade price.
    fn typical_price(&self, last_price: f64) -> f64 {
        (self.max_price + self.min_price + last_price) / 3.0
    }

    /// Add a trade to the window, evicting the oldest entry first when
    /// the window is full. Price and volume are assumed finite and
    /// non-negative; validation happens upstream in the parser.
    pub fn add(&mut self, new_price: f64, new_volume: f64) {
        if self.prices.len() == self.window {
            self.evict_oldest();
        }

        if new_price > self.max_price {
            self.max_price = new_price;
        }
        if new_price < self.min_price {
            self.min_price = new_price;
        }

        self.prices.push_back(new_price);
        self.volumes.push_back(new_volume);

        self.cumulated_volume += new_volume;
        self.cumulated_tpv = self.typical_price(new_price) * self.cumulated_volume;
    }

    /// VWAP of the current window. With no trades yet the cumulative
    /// volume is zero and the result is NaN; that is the observable
    /// "no data yet" signal, not an error.
    pub fn vwap(&self) -> f64 {
        self.cumulated_tpv / self.cumulated_volume
    }
}

impl fmt::Display for VwapWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trading Pair: {}, VWAP: {:.6}", self.pair, self.vwap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pre-seeded window used across tests: five trades already
    /// retained, with extrema and totals set to match.
    fn seeded_window(window: usize) -> VwapWindow {
        VwapWindow {
            pair: "BTC-USD".to_string(),
            prices: VecDeque::from(vec![3.2, 1.1, 2.22, 5.1, 2.13]),
            volumes: VecDeque::from(vec![1.0, 2.0, 3.0, 2.0, 3.0]),
            max_price: 5.1,
            min_price: 1.1,
            cumulated_volume: 10.0,
            cumulated_tpv: 33.733333,
            window,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_new_window_is_empty() {
        let window = VwapWindow::new(200, "BTC-USD");
        assert!(window.is_empty());
        assert_eq!(window.pair(), "BTC-USD");
        assert!(window.vwap().is_nan());
    }

    #[test]
    fn test_evict_oldest() {
        let mut window = seeded_window(100);

        window.evict_oldest();

        assert_close(window.cumulated_volume, 9.0);
        // Neither extremum belonged to the evicted entry.
        assert_close(window.max_price, 5.1);
        assert_close(window.min_price, 1.1);
        assert_eq!(window.prices.len(), 4);
        assert_eq!(window.volumes.len(), 4);
    }

    #[test]
    fn test_evict_oldest_recomputes_extrema() {
        let mut window = VwapWindow::new(5, "BTC-USD");
        for (price, volume) in [(9.0, 1.0), (0.5, 1.0), (3.0, 1.0)] {
            window.add(price, volume);
        }
        // Oldest entry holds the maximum.
        window.evict_oldest();
        assert_close(window.max_price, 3.0);
        assert_close(window.min_price, 0.5);
    }

    #[test]
    fn test_typical_price() {
        let window = seeded_window(100);
        assert_close(window.typical_price(2.0), (5.1 + 1.1 + 2.0) / 3.0);
    }

    #[test]
    fn test_add_below_capacity() {
        let mut window = seeded_window(100);

        window.add(0.5, 2.0);

        assert_close(window.cumulated_volume, 12.0);
        assert_close(window.max_price, 5.1);
        // New price becomes the minimum.
        assert_close(window.min_price, 0.5);
        assert_close(window.cumulated_tpv, 24.4);
        assert_eq!(window.prices.len(), 6);
        assert_eq!(window.volumes.len(), 6);
    }

    #[test]
    fn test_add_full_window_evicts_first() {
        // Five trades retained, window of five: the oldest entry
        // (price 3.2, volume 1) must go before the new one is appended.
        let mut window = seeded_window(5);

        window.add(0.5, 2.0);

        assert_close(window.cumulated_volume, 11.0);
        assert_close(window.max_price, 5.1);
        assert_close(window.min_price, 0.5);
        assert_eq!(window.prices.len(), 5);
        assert_eq!(window.volumes.len(), 5);
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut window = VwapWindow::new(3, "ETH-USD");
        let mut expected_volume = 0.0;
        for i in 0..10 {
            let volume = (i + 1) as f64;
            window.add(100.0 + i as f64, volume);
            expected_volume = if i < 3 {
                expected_volume + volume
            } else {
                // Sum of the last three volumes only.
                volume + (volume - 1.0) + (volume - 2.0)
            };
            assert!(window.len() <= 3);
            assert_close(window.cumulated_volume, expected_volume);
        }
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_extrema_track_retained_prices() {
        let mut window = VwapWindow::new(2, "ETH-USD");
        window.add(10.0, 1.0);
        window.add(1.0, 1.0);
        window.add(5.0, 1.0); // evicts 10.0
        assert_close(window.max_price, 5.0);
        assert_close(window.min_price, 1.0);
        window.add(7.0, 1.0); // evicts 1.0
        assert_close(window.max_price, 7.0);
        assert_close(window.min_price, 5.0);
    }

    #[test]
    fn test_vwap() {
        let window = seeded_window(5);
        assert_close(window.vwap(), 3.3733333);
    }

    #[test]
    fn test_vwap_empty_is_nan_then_finite() {
        let mut window = VwapWindow::new(5, "BTC-USD");
        assert!(window.vwap().is_nan());
        window.add(2.0, 1.0);
        assert!(window.vwap().is_finite());
    }

    #[test]
    fn test_display() {
        let window = seeded_window(5);
        assert_eq!(
            window.to_string(),
            "Trading Pair: BTC-USD, VWAP: 3.373333"
        );
    }

    #[test]
    fn test_display_nan_sentinel() {
        let window = VwapWindow::new(5, "ETH-USD");
        assert_eq!(window.to_string(), "Trading Pair: ETH-USD, VWAP: NaN");
    }

    #[test]
    fn test_display_is_idempotent() {
        let window = seeded_window(5);
        assert_eq!(window.to_string(), window.to_string());
    }
}
