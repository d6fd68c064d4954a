use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingKind {
    High,
    Low,
}

/// A confirmed local extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub bar_index: u64,
    pub time_ms: i64,
    pub price: f64,
    pub kind: SwingKind,
}

/// Market structure label of a swing relative to the previous swing of the same kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingLabel {
    HH, // Higher high
    LH, // Lower high
    HL, // Higher low
    LL, // Lower low
}

impl fmt::Display for SwingLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            SwingLabel::HH => "HH",
            SwingLabel::LH => "LH",
            SwingLabel::HL => "HL",
            SwingLabel::LL => "LL",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledSwing {
    pub swing: SwingPoint,
    pub label: SwingLabel,
}
