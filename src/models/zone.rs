use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ZoneConfig;
use crate::domain::{Bar, SwingKind, SwingPoint};

/// Supply zones hang below swing highs, demand zones sit above swing lows.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum ZoneKind {
    Supply,
    Demand,
}

impl ZoneKind {
    pub fn for_swing(kind: SwingKind) -> Self {
        match kind {
            SwingKind::High => ZoneKind::Supply,
            SwingKind::Low => ZoneKind::Demand,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZoneKind::Supply => write!(f, "SUPPLY"),
            ZoneKind::Demand => write!(f, "DEMAND"),
        }
    }
}

/// `Live -> Broken` is the only transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneState {
    Live,
    Broken { break_bar_index: u64 },
}

/// A price band around a swing point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub top: f64,
    pub bottom: f64,
    /// Point of interest: middle of the band, fixed at creation
    pub poi: f64,
    pub origin_bar_index: u64,
    pub origin_time_ms: i64,
    /// Last bar the zone is drawn to. Follows the newest bar while Live.
    pub right_bar_index: u64,
    pub atr_at_origin: f64,
    pub state: ZoneState,
}

/// Break of Structure: a close through a zone's outer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BosRecord {
    pub kind: ZoneKind,
    pub poi: f64,
    pub origin_bar_index: u64,
    pub break_bar_index: u64,
    pub break_time_ms: i64,
}

impl Zone {
    /// Build the candidate band for a swing.
    ///
    /// Supply: `top` is the swing high, `bottom` sits `atr * box_width / 10` below.
    /// Demand mirrors this upward from the swing low.
    pub fn from_swing(swing: &SwingPoint, atr: f64, config: &ZoneConfig) -> Self {
        let atr_buffer = config.atr_buffer(atr).abs();
        let kind = ZoneKind::for_swing(swing.kind);
        let (top, bottom) = match kind {
            ZoneKind::Supply => (swing.price, swing.price - atr_buffer),
            ZoneKind::Demand => (swing.price + atr_buffer, swing.price),
        };

        Self {
            kind,
            top,
            bottom,
            poi: (top + bottom) / 2.0,
            origin_bar_index: swing.bar_index,
            origin_time_ms: swing.time_ms,
            right_bar_index: swing.bar_index,
            atr_at_origin: atr,
            state: ZoneState::Live,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == ZoneState::Live
    }

    pub fn break_bar_index(&self) -> Option<u64> {
        match self.state {
            ZoneState::Live => None,
            ZoneState::Broken { break_bar_index } => Some(break_bar_index),
        }
    }

    /// Was this zone already broken as of `bar_index` (inclusive)?
    pub fn is_broken_at(&self, bar_index: u64) -> bool {
        self.break_bar_index()
            .is_some_and(|break_idx| break_idx <= bar_index)
    }

    /// The price that must be closed through to break the zone.
    pub fn level_to_break(&self) -> f64 {
        match self.kind {
            ZoneKind::Supply => self.top,
            ZoneKind::Demand => self.bottom,
        }
    }

    /// Does a close at `close` break this zone?
    pub fn is_broken_by(&self, close: f64) -> bool {
        let level = self.level_to_break();
        match self.kind {
            ZoneKind::Supply => close >= level,
            ZoneKind::Demand => close <= level,
        }
    }

    /// Live -> Broken. Returns the BOS record, or `None` if already broken.
    pub fn mark_broken(&mut self, bar: &Bar) -> Option<BosRecord> {
        if !self.is_live() {
            return None;
        }
        self.state = ZoneState::Broken {
            break_bar_index: bar.index,
        };
        self.right_bar_index = bar.index;

        Some(BosRecord {
            kind: self.kind,
            poi: self.poi,
            origin_bar_index: self.origin_bar_index,
            break_bar_index: bar.index,
            break_time_ms: bar.time_ms,
        })
    }

    /// Live zones follow the newest bar; broken ones stay where they broke.
    pub fn extend_to(&mut self, bar_index: u64) {
        if self.is_live() && bar_index > self.right_bar_index {
            self.right_bar_index = bar_index;
        }
    }
}
