use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// A named bar history for one instrument.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            name: name.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_time_ms(&self) -> Option<i64> {
        self.bars.first().map(|b| b.time_ms)
    }

    pub fn last_time_ms(&self) -> Option<i64> {
        self.bars.last().map(|b| b.time_ms)
    }
}
