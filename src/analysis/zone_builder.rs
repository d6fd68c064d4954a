//! Candidate zone construction and the overlap filter.
//!
//! Admission is greedy and order dependent: candidates must be offered in
//! chronological order to get reproducible stores.

use crate::config::{DEBUG_FLAGS, OVERLAP_ATR_MULTIPLIER, ZoneConfig};
use crate::domain::{Atr, SwingPoint};
use crate::models::{Zone, ZoneStore};

/// Outcome of offering one swing to a zone store.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneDecision {
    /// ATR not yet available at the swing's bar
    Skipped { swing: SwingPoint },
    /// Too close to the POI of a Live zone of the same kind
    Rejected { candidate: Zone, blocking_poi: f64 },
    Admitted { zone: Zone, evicted: Option<Zone> },
}

/// The bar that confirms a pivot, where its candidate zone is judged.
///
/// `atr` is the volatility on that bar, which sets the overlap threshold. The
/// band thickness still comes from the ATR on the pivot bar itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfirmationBar {
    pub index: u64,
    pub atr: Atr,
}

impl ConfirmationBar {
    pub fn new(index: u64, atr: Atr) -> Self {
        Self { index, atr }
    }

    /// Largest POI distance that still counts as overlapping.
    pub fn overlap_threshold(&self, candidate: &Zone) -> f64 {
        // The confirmation bar is never earlier than the pivot, so its ATR is
        // seeded whenever the candidate exists
        let atr = self.atr.value().unwrap_or(candidate.atr_at_origin);
        atr * OVERLAP_ATR_MULTIPLIER
    }
}

/// Band for `swing`, or `None` while ATR is still seeding.
pub fn build_candidate(swing: &SwingPoint, atr: Atr, config: &ZoneConfig) -> Option<Zone> {
    match atr {
        Atr::NotYetAvailable => None,
        Atr::Value(atr) => Some(Zone::from_swing(swing, atr, config)),
    }
}

/// POI of the first zone in `store` that blocks `candidate`, if any.
///
/// Only zones still Live at the confirmation bar are compared; the threshold
/// is that bar's ATR * 2, inclusive.
pub fn find_overlap(store: &ZoneStore, candidate: &Zone, at: ConfirmationBar) -> Option<f64> {
    let threshold = at.overlap_threshold(candidate);
    store
        .iter()
        .filter(|existing| !existing.is_broken_at(at.index))
        .find(|existing| (candidate.poi - existing.poi).abs() <= threshold)
        .map(|existing| existing.poi)
}

/// Offer `swing` to `store`.
///
/// `prepare` runs on an accepted zone before insertion (batch mode uses it to
/// settle the zone's breakout ahead of time).
pub fn consider_swing<F>(
    store: &mut ZoneStore,
    swing: &SwingPoint,
    pivot_atr: Atr,
    config: &ZoneConfig,
    at: ConfirmationBar,
    prepare: F,
) -> ZoneDecision
where
    F: FnOnce(&mut Zone),
{
    let Some(mut candidate) = build_candidate(swing, pivot_atr, config) else {
        if DEBUG_FLAGS.print_zone_decisions {
            log::debug!(
                "No ATR yet at bar {}: skipping {:?} swing at {:.5}",
                swing.bar_index,
                swing.kind,
                swing.price
            );
        }
        return ZoneDecision::Skipped { swing: *swing };
    };

    if let Some(blocking_poi) = find_overlap(store, &candidate, at) {
        if DEBUG_FLAGS.print_zone_decisions {
            log::debug!(
                "{} candidate from bar {} (poi {:.5}) overlaps live zone at poi {:.5}",
                candidate.kind,
                candidate.origin_bar_index,
                candidate.poi,
                blocking_poi
            );
        }
        return ZoneDecision::Rejected {
            candidate,
            blocking_poi,
        };
    }

    prepare(&mut candidate);
    let evicted = store.insert(candidate.clone());

    if DEBUG_FLAGS.print_zone_decisions {
        log::debug!(
            "{} zone admitted from bar {}: [{:.5}, {:.5}] poi {:.5}",
            candidate.kind,
            candidate.origin_bar_index,
            candidate.bottom,
            candidate.top,
            candidate.poi
        );
    }
    if DEBUG_FLAGS.print_evictions {
        if let Some(old) = &evicted {
            log::debug!(
                "{} store full ({}): evicted zone from bar {}",
                old.kind,
                store.capacity(),
                old.origin_bar_index
            );
        }
    }

    ZoneDecision::Admitted {
        zone: candidate,
        evicted,
    }
}
