//! Batch analysis: the whole history is known up front.
//!
//! Decisions are replayed in the order the streaming engine would make them,
//! so both modes agree on the same history. A pivot at position `i` is only
//! knowable at its confirmation bar `i + swing_length`; that bar is the "as of"
//! point for the overlap filter and for eviction.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::breakout::settle_zone;
use crate::analysis::pivots::find_swings;
use crate::analysis::swing_labels::label_swings;
use crate::analysis::volatility::atr_series;
use crate::analysis::zigzag::build_zigzag;
use crate::analysis::zone_builder::{ConfirmationBar, ZoneDecision, consider_swing};
use crate::config::{DEBUG_FLAGS, ZoneConfig};
use crate::data::BarSeries;
use crate::domain::{Bar, LabeledSwing, SwingKind, SwingPoint, validate_history};
use crate::error::ZoneResult;
use crate::models::{BosRecord, ZigZagPoint, Zone, ZoneKind, ZoneStore};

/// Everything derived from one bar history. Plain data, safe to serialise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub swing_highs: Vec<SwingPoint>,
    pub swing_lows: Vec<SwingPoint>,
    pub zig_zag: Vec<ZigZagPoint>,
    /// Live only, newest first
    pub supply_zones: Vec<Zone>,
    /// Live only, newest first
    pub demand_zones: Vec<Zone>,
    /// Ordered by break bar
    pub supply_bos: Vec<BosRecord>,
    pub demand_bos: Vec<BosRecord>,
    pub swing_labels: Vec<LabeledSwing>,
}

impl AnalysisOutput {
    pub fn is_empty(&self) -> bool {
        self.swing_highs.is_empty() && self.swing_lows.is_empty()
    }
}

/// Run every stage over `bars`.
///
/// Fewer than `config.min_bars()` bars yields an empty output, not an error.
pub fn analyze(bars: &[Bar], config: &ZoneConfig) -> ZoneResult<AnalysisOutput> {
    config.validate()?;
    validate_history(bars)?;

    if bars.len() < config.min_bars() {
        log::debug!(
            "Insufficient data: {} bars, need {} - returning empty analysis",
            bars.len(),
            config.min_bars()
        );
        return Ok(AnalysisOutput::default());
    }

    let atr = atr_series(bars, config.atr_period, config.atr_smoothing);
    let swings = find_swings(bars, config.swing_length);
    let last_bar_index = bars[bars.len() - 1].index;

    let mut supply = ZoneStore::new(ZoneKind::Supply, config.history_to_keep);
    let mut demand = ZoneStore::new(ZoneKind::Demand, config.history_to_keep);
    let mut bos: Vec<BosRecord> = Vec::new();

    for swing in &swings {
        // Swings come from `bars`, so the lookup cannot miss
        let Ok(pos) = bars.binary_search_by_key(&swing.bar_index, |b| b.index) else {
            continue;
        };
        let confirmed_at = pos + config.swing_length;
        let as_of_bar = bars[confirmed_at].index;
        let store = match swing.kind {
            SwingKind::High => &mut supply,
            SwingKind::Low => &mut demand,
        };

        let mut settled = None;
        let at = ConfirmationBar::new(as_of_bar, atr[confirmed_at]);
        let decision = consider_swing(store, swing, atr[pos], config, at, |zone| {
            settled = settle_zone(zone, &bars[pos + 1..]);
            if zone.is_live() {
                zone.extend_to(last_bar_index);
            }
        });

        if let ZoneDecision::Admitted { evicted, .. } = decision {
            bos.extend(settled);
            // A zone evicted while still Live never gets to report its break
            if let Some(old) = evicted {
                if !old.is_broken_at(as_of_bar) {
                    bos.retain(|r| !(r.kind == old.kind && r.origin_bar_index == old.origin_bar_index));
                }
            }
        }
    }

    bos.sort_by_key(|r| (r.break_bar_index, r.origin_bar_index));
    let (supply_bos, demand_bos): (Vec<BosRecord>, Vec<BosRecord>) =
        bos.into_iter().partition(|r| r.kind == ZoneKind::Supply);

    let output = AnalysisOutput {
        swing_highs: swings.iter().filter(|s| s.kind == SwingKind::High).copied().collect(),
        swing_lows: swings.iter().filter(|s| s.kind == SwingKind::Low).copied().collect(),
        zig_zag: build_zigzag(&swings),
        supply_zones: supply.live_zones(),
        demand_zones: demand.live_zones(),
        supply_bos,
        demand_bos,
        swing_labels: label_swings(&swings),
    };

    if DEBUG_FLAGS.print_zone_decisions {
        log::debug!(
            "Analysed {} bars: {} swings, {} live supply, {} live demand",
            bars.len(),
            swings.len(),
            output.supply_zones.len(),
            output.demand_zones.len()
        );
    }

    Ok(output)
}

/// Analyse independent series in parallel. Results keep the input order.
pub fn analyze_collection(
    series: &[BarSeries],
    config: &ZoneConfig,
) -> Vec<(String, ZoneResult<AnalysisOutput>)> {
    series
        .par_iter()
        .map(|s| (s.name.clone(), analyze(&s.bars, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZoneError;

    fn bar(i: u64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(i, i as i64 * 60_000, close, high, low, close)
    }

    #[test]
    fn too_few_bars_is_empty_not_an_error() {
        let bars: Vec<Bar> = (0..30).map(|i| bar(i, 101.0, 99.0, 100.0)).collect();
        let out = analyze(&bars, &ZoneConfig::default()).expect("short history is fine");
        assert_eq!(out, AnalysisOutput::default());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let cfg = ZoneConfig {
            history_to_keep: 0,
            ..Default::default()
        };
        assert!(matches!(
            analyze(&[], &cfg),
            Err(ZoneError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn unordered_history_is_reported() {
        let bars = vec![bar(1, 2.0, 1.0, 1.5), bar(0, 2.0, 1.0, 1.5)];
        assert!(matches!(
            analyze(&bars, &ZoneConfig::default()),
            Err(ZoneError::OutOfOrderInput { .. })
        ));
    }

    #[test]
    fn zones_extend_to_last_bar_until_broken() {
        // Peak at 3, trough at 9, then a rally through the peak at 14
        let highs = [
            100.0, 101.0, 102.0, 110.0, 102.0, 101.0, 100.0, 99.0, 98.0, 95.0, 98.0, 99.0,
            100.0, 101.0, 112.0, 103.0, 102.0,
        ];
        let bars: Vec<Bar> = highs
            .iter()
            .enumerate()
            .map(|(i, &h)| bar(i as u64, h, h - 2.0, h - 1.0))
            .collect();
        let cfg = ZoneConfig {
            swing_length: 2,
            atr_period: 3,
            ..Default::default()
        };

        let out = analyze(&bars, &cfg).expect("valid input");
        assert_eq!(out.swing_highs.iter().map(|s| s.bar_index).collect::<Vec<_>>(), vec![3, 14]);
        assert_eq!(out.swing_lows.iter().map(|s| s.bar_index).collect::<Vec<_>>(), vec![9]);

        // Close 111 at bar 14 is the first close >= 110
        assert_eq!(out.supply_bos.len(), 1);
        assert_eq!(out.supply_bos[0].origin_bar_index, 3);
        assert_eq!(out.supply_bos[0].break_bar_index, 14);

        assert_eq!(out.supply_zones.len(), 1);
        assert_eq!(out.supply_zones[0].origin_bar_index, 14);
        assert_eq!(out.supply_zones[0].right_bar_index, 16);
        assert_eq!(out.demand_zones.len(), 1);
        assert_eq!(out.demand_zones[0].right_bar_index, 16);

        let kinds: Vec<SwingKind> = out.zig_zag.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![SwingKind::High, SwingKind::Low, SwingKind::High]);
    }

    #[test]
    fn collection_keeps_input_order() {
        let flat: Vec<Bar> = (0..60).map(|i| bar(i, 101.0, 99.0, 100.0)).collect();
        let series = vec![
            BarSeries::new("A", flat.clone()),
            BarSeries::new("B", Vec::new()),
            BarSeries::new("C", flat),
        ];
        let results = analyze_collection(&series, &ZoneConfig::default());
        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }
}
