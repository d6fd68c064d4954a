use serde::{Deserialize, Serialize};

use crate::error::{ZoneError, ZoneResult};

/// One OHLC price bar.
///
/// `index` is the bar's position in the full history (matches the chart
/// x-position), `time_ms` its open time as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub index: u64,
    pub time_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    // A constructor for convenience
    pub fn new(index: u64, time_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Bar {
            index,
            time_ms,
            open,
            high,
            low,
            close,
        }
    }

    /// True range against the previous close.
    ///
    /// With no previous bar the bar's own open stands in for the previous close.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        let prev_close = prev_close.unwrap_or(self.open);
        (self.high - self.low)
            .max((self.high - prev_close).abs())
            .max((self.low - prev_close).abs())
    }

    /// Rejects bars no chart could have produced.
    pub fn validate(&self) -> ZoneResult<()> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(ZoneError::MalformedBar {
                index: self.index,
                reason: "non-finite price".to_string(),
            });
        }
        if self.high < self.low {
            return Err(ZoneError::MalformedBar {
                index: self.index,
                reason: format!("high {} below low {}", self.high, self.low),
            });
        }
        Ok(())
    }

    /// Strictly after `previous` in both index and time.
    pub fn follows(&self, previous: &Bar) -> ZoneResult<()> {
        if self.index <= previous.index || self.time_ms <= previous.time_ms {
            return Err(ZoneError::OutOfOrderInput {
                previous_index: previous.index,
                previous_time_ms: previous.time_ms,
                index: self.index,
                time_ms: self.time_ms,
            });
        }
        Ok(())
    }
}

/// Checks a whole history: every bar well-formed, strictly increasing.
pub fn validate_history(bars: &[Bar]) -> ZoneResult<()> {
    for bar in bars {
        bar.validate()?;
    }
    for pair in bars.windows(2) {
        pair[1].follows(&pair[0])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bar_uses_open_as_previous_close() {
        let bar = Bar::new(0, 0, 100.0, 101.0, 99.5, 100.5);
        // high - low = 1.5, |high - open| = 1.0, |low - open| = 0.5
        assert_eq!(bar.true_range(None), 1.5);
    }

    #[test]
    fn gap_dominates_true_range() {
        let bar = Bar::new(1, 1, 110.0, 111.0, 109.0, 110.0);
        assert_eq!(bar.true_range(Some(100.0)), 11.0);
    }

    #[test]
    fn inverted_bar_is_malformed() {
        let bar = Bar::new(3, 3, 10.0, 9.0, 11.0, 10.0);
        assert!(matches!(
            bar.validate(),
            Err(ZoneError::MalformedBar { index: 3, .. })
        ));
    }

    #[test]
    fn repeated_index_is_out_of_order() {
        let a = Bar::new(5, 500, 1.0, 1.0, 1.0, 1.0);
        let b = Bar::new(5, 600, 1.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            validate_history(&[a, b]),
            Err(ZoneError::OutOfOrderInput { index: 5, .. })
        ));
    }
}
