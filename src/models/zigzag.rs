use serde::{Deserialize, Serialize};

use crate::domain::{SwingKind, SwingPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZigZagPoint {
    pub bar_index: u64,
    pub time_ms: i64,
    pub price: f64,
    pub kind: SwingKind,
}

impl From<&SwingPoint> for ZigZagPoint {
    fn from(swing: &SwingPoint) -> Self {
        Self {
            bar_index: swing.bar_index,
            time_ms: swing.time_ms,
            price: swing.price,
            kind: swing.kind,
        }
    }
}

/// What happened to a swing offered to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZigZagStep {
    Appended,
    ReplacedLast,
    Discarded,
}

/// Alternating high/low polyline. Never holds two consecutive points of the same kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZigZagLine {
    points: Vec<ZigZagPoint>,
}

impl ZigZagLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swings must be offered in increasing bar-index order.
    pub fn push(&mut self, swing: &SwingPoint) -> ZigZagStep {
        let candidate = ZigZagPoint::from(swing);
        match self.points.last_mut() {
            Some(last) if last.kind == candidate.kind => {
                let more_extreme = match candidate.kind {
                    SwingKind::High => candidate.price > last.price,
                    SwingKind::Low => candidate.price < last.price,
                };
                if more_extreme {
                    *last = candidate;
                    ZigZagStep::ReplacedLast
                } else {
                    ZigZagStep::Discarded
                }
            }
            _ => {
                self.points.push(candidate);
                ZigZagStep::Appended
            }
        }
    }

    pub fn points(&self) -> &[ZigZagPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<ZigZagPoint> {
        self.points
    }
}
