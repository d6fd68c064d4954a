//! Analysis and computation configuration

use serde::{Deserialize, Serialize};

use crate::error::{ZoneError, ZoneResult};

/// How the true-range series is smoothed into an ATR.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AtrSmoothing {
    /// Seed with the mean of the first `period` true ranges, then
    /// `atr = (prev * (period - 1) + tr) / period`.
    #[default]
    Wilder,
    /// Plain moving average of the last `period` true ranges.
    Simple,
}

/// Default values for every engine knob
pub struct ZoneDefaults {
    // Bars either side of a candidate that it must strictly exceed
    pub swing_length: usize,
    pub atr_period: usize,
    // Capacity of each zone store (supply and demand separately)
    pub history_to_keep: usize,
    // Band thickness ratio, applied as `atr * box_width / 10`
    pub box_width: f64,
    // Streaming mode only: how many BOS records are kept
    pub bos_history: usize,
    pub atr_smoothing: AtrSmoothing,
}

pub const ANALYSIS: ZoneDefaults = ZoneDefaults {
    swing_length: 10,
    atr_period: 50,
    history_to_keep: 20,
    box_width: 2.5,
    bos_history: 5,
    atr_smoothing: AtrSmoothing::Wilder,
};

/// Overlap threshold is `atr * OVERLAP_ATR_MULTIPLIER`. Fixed, not a knob.
pub const OVERLAP_ATR_MULTIPLIER: f64 = 2.0;

/// Runtime configuration for both batch and streaming analysis.
///
/// Deserialises from partial JSON: missing fields fall back to [`ANALYSIS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub swing_length: usize,
    pub atr_period: usize,
    pub history_to_keep: usize,
    pub box_width: f64,
    pub bos_history: usize,
    pub atr_smoothing: AtrSmoothing,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            swing_length: ANALYSIS.swing_length,
            atr_period: ANALYSIS.atr_period,
            history_to_keep: ANALYSIS.history_to_keep,
            box_width: ANALYSIS.box_width,
            bos_history: ANALYSIS.bos_history,
            atr_smoothing: ANALYSIS.atr_smoothing,
        }
    }
}

impl ZoneConfig {
    /// Fail fast on values that would make the engine meaningless.
    pub fn validate(&self) -> ZoneResult<()> {
        let positive = [
            ("swing_length", self.swing_length),
            ("atr_period", self.atr_period),
            ("history_to_keep", self.history_to_keep),
            ("bos_history", self.bos_history),
        ];
        if let Some(&(field, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ZoneError::InvalidConfiguration {
                field,
                reason: "must be greater than zero".to_string(),
            });
        }

        if !self.box_width.is_finite() || self.box_width <= 0.0 {
            return Err(ZoneError::InvalidConfiguration {
                field: "box_width",
                reason: format!("must be a positive number, got {}", self.box_width),
            });
        }

        Ok(())
    }

    /// Fewest bars for which analysis can produce anything.
    pub fn min_bars(&self) -> usize {
        (self.swing_length * 2 + 1).max(self.atr_period)
    }

    /// Band thickness for a given ATR value.
    pub fn atr_buffer(&self, atr: f64) -> f64 {
        atr * (self.box_width / 10.0)
    }

    /// Streaming rolling window length.
    pub fn window_len(&self) -> usize {
        (self.swing_length * 3).max(self.swing_length * 2 + 1)
    }
}
