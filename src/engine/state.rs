use std::collections::VecDeque;

use crate::domain::{Atr, Bar};

/// Rolling window of the most recent bars, each paired with the ATR sample
/// computed when it arrived.
#[derive(Debug, Clone)]
pub struct BarWindow {
    capacity: usize,
    bars: VecDeque<Bar>,
    atr: VecDeque<Atr>,
}

impl BarWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bars: VecDeque::new(),
            atr: VecDeque::new(),
        }
    }

    /// Append, dropping the oldest bar once full.
    pub fn push(&mut self, bar: Bar, atr: Atr) {
        if self.bars.len() >= self.capacity {
            self.bars.pop_front();
            self.atr.pop_front();
        }
        self.bars.push_back(bar);
        self.atr.push_back(atr);
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// ATR recorded for the bar at window position `pos`.
    pub fn atr_at(&self, pos: usize) -> Atr {
        self.atr.get(pos).copied().unwrap_or_default()
    }

    /// Oldest first, as one slice so pivot checks can index into it.
    pub fn as_slice(&mut self) -> &[Bar] {
        self.bars.make_contiguous()
    }
}
