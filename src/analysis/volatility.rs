//! Average True Range.
//!
//! Batch and streaming both go through [`AtrTracker`], so a replayed history
//! produces bit-identical samples either way.

use std::collections::VecDeque;

use crate::config::AtrSmoothing;
use crate::domain::{Atr, Bar};

/// Incremental ATR accumulator. Feed bars in order with [`AtrTracker::push`].
#[derive(Debug, Clone)]
pub struct AtrTracker {
    period: usize,
    smoothing: AtrSmoothing,
    prev_close: Option<f64>,
    seen: usize,
    // Wilder seed accumulator (first `period` true ranges)
    seed_sum: f64,
    // Simple: last `period` true ranges
    recent: VecDeque<f64>,
    current: Atr,
}

impl AtrTracker {
    pub fn new(period: usize, smoothing: AtrSmoothing) -> Self {
        Self {
            period,
            smoothing,
            prev_close: None,
            seen: 0,
            seed_sum: 0.0,
            recent: VecDeque::new(),
            current: Atr::NotYetAvailable,
        }
    }

    pub fn current(&self) -> Atr {
        self.current
    }

    pub fn push(&mut self, bar: &Bar) -> Atr {
        let tr = bar.true_range(self.prev_close);
        self.prev_close = Some(bar.close);
        self.seen += 1;
        let period = self.period as f64;

        self.current = match self.smoothing {
            AtrSmoothing::Wilder => {
                if self.seen < self.period {
                    self.seed_sum += tr;
                    Atr::NotYetAvailable
                } else if self.seen == self.period {
                    self.seed_sum += tr;
                    Atr::Value(self.seed_sum / period)
                } else {
                    match self.current {
                        Atr::Value(prev) => Atr::Value((prev * (period - 1.0) + tr) / period),
                        // Not reachable once seeded
                        Atr::NotYetAvailable => Atr::Value(tr),
                    }
                }
            }
            AtrSmoothing::Simple => {
                if self.recent.len() == self.period {
                    self.recent.pop_front();
                }
                self.recent.push_back(tr);
                if self.recent.len() < self.period {
                    Atr::NotYetAvailable
                } else {
                    Atr::Value(self.recent.iter().sum::<f64>() / period)
                }
            }
        };

        self.current
    }
}

/// True range for each bar in order.
pub fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    let mut prev_close = None;
    bars.iter()
        .map(|bar| {
            let tr = bar.true_range(prev_close);
            prev_close = Some(bar.close);
            tr
        })
        .collect()
}

/// One ATR sample per bar; the first `period - 1` are `NotYetAvailable`.
pub fn atr_series(bars: &[Bar], period: usize, smoothing: AtrSmoothing) -> Vec<Atr> {
    let mut tracker = AtrTracker::new(period, smoothing);
    bars.iter().map(|bar| tracker.push(bar)).collect()
}
