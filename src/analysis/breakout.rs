//! Break of Structure (BOS) detection.
//!
//! A supply zone breaks on the first later close at or above its top; a
//! demand zone on the first later close at or below its bottom. The condition
//! is checked once per bar per Live zone, so checking only new bars is enough.

use crate::config::DEBUG_FLAGS;
use crate::domain::Bar;
use crate::models::{BosRecord, Zone, ZoneStore};

/// First bar strictly after the zone's origin whose close breaks it.
pub fn find_break<'a>(zone: &Zone, bars: &'a [Bar]) -> Option<&'a Bar> {
    bars.iter()
        .filter(|bar| bar.index > zone.origin_bar_index)
        .find(|bar| zone.is_broken_by(bar.close))
}

/// Scan `bars` for the zone's first break and retire it there.
pub fn settle_zone(zone: &mut Zone, bars: &[Bar]) -> Option<BosRecord> {
    let breaking_bar = find_break(zone, bars)?;
    let record = zone.mark_broken(breaking_bar);
    if let Some(bos) = &record {
        log_bos(bos);
    }
    record
}

/// Check every Live zone in `store` against one new bar.
pub fn apply_bar(store: &mut ZoneStore, bar: &Bar) -> Vec<BosRecord> {
    let mut breaks = Vec::new();
    for zone in store.iter_mut() {
        if zone.is_live() && bar.index > zone.origin_bar_index && zone.is_broken_by(bar.close) {
            if let Some(bos) = zone.mark_broken(bar) {
                log_bos(&bos);
                breaks.push(bos);
            }
        }
    }
    breaks
}

fn log_bos(bos: &BosRecord) {
    if DEBUG_FLAGS.print_bos_events {
        log::debug!(
            "BOS: {} zone from bar {} (poi {:.5}) broken at bar {}",
            bos.kind,
            bos.origin_bar_index,
            bos.poi,
            bos.break_bar_index
        );
    }
}
