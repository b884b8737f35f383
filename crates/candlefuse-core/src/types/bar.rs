//! OHLCV bar type.

use crate::error::DataError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV bar.
///
/// Bars are append-only: once stored they are never edited. Prices are
/// `f64` for fast indicator math; the timestamp is UTC epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds (UTC)
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: u64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check the OHLC invariant: `low <= min(open, close)` and
    /// `max(open, close) <= high`, with all prices positive and finite.
    pub fn validate(&self) -> Result<(), DataError> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(DataError::InvalidBar {
                timestamp: self.timestamp,
                reason: "prices must be positive finite numbers".into(),
            });
        }
        if self.low > self.open.min(self.close) || self.high < self.open.max(self.close) {
            return Err(DataError::InvalidBar {
                timestamp: self.timestamp,
                reason: format!(
                    "OHLC invariant violated (o={} h={} l={} c={})",
                    self.open, self.high, self.low, self.close
                ),
            });
        }
        Ok(())
    }

    /// Typical price (HLC average).
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Bar range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if the bar is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Timestamp as a `DateTime<Utc>`.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }

    /// True range relative to the previous close (used for ATR and ADX).
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }
}

/// Outcome of a bulk insert or file import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Rows stored as new bars
    pub imported: usize,
    /// Rows skipped (duplicates or malformed)
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bar() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 5000);
        assert!(bar.validate().is_ok());
        assert!((bar.typical_price() - 103.333333).abs() < 1e-4);
        assert!((bar.range() - 15.0).abs() < 1e-10);
        assert!(bar.is_bullish());
    }

    #[test]
    fn test_invariant_violations() {
        // high below close
        assert!(Bar::new(0, 100.0, 101.0, 99.0, 102.0, 0).validate().is_err());
        // low above open
        assert!(Bar::new(0, 100.0, 103.0, 101.0, 102.0, 0).validate().is_err());
        // non-positive price
        assert!(Bar::new(0, -1.0, 1.0, -2.0, 0.5, 0).validate().is_err());
        // NaN
        assert!(Bar::new(0, f64::NAN, 1.0, 0.5, 0.7, 0).validate().is_err());
    }

    #[test]
    fn test_true_range_gap() {
        let bar = Bar::new(0, 100.0, 110.0, 95.0, 105.0, 0);
        assert!((bar.true_range(None) - 15.0).abs() < 1e-10);
        // Gap up from a close of 90: high - prev_close dominates
        assert!((bar.true_range(Some(90.0)) - 20.0).abs() < 1e-10);
    }
}
