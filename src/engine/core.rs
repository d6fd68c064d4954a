use std::collections::VecDeque;

use crate::analysis::breakout::{apply_bar, settle_zone};
use crate::analysis::pivots::swing_at;
use crate::analysis::zone_builder::{ConfirmationBar, ZoneDecision, consider_swing};
use crate::analysis::{AnalysisOutput, AtrTracker, SwingLabeler};
use crate::config::{DEBUG_FLAGS, ZoneConfig};
use crate::domain::{Atr, Bar, LabeledSwing, SwingKind, SwingPoint};
use crate::error::ZoneResult;
use crate::models::{BosRecord, ZigZagLine, ZigZagPoint, Zone, ZoneKind, ZoneStore};

use super::messages::UpdateReport;
use super::state::BarWindow;

/// Incremental zone engine for one instrument.
///
/// Owns all of its state. Feed bars through [`ZoneEngine::update`] in strictly
/// increasing order; every query hands back copies.
#[derive(Debug, Clone)]
pub struct ZoneEngine {
    config: ZoneConfig,
    window: BarWindow,
    atr: AtrTracker,
    supply: ZoneStore,
    demand: ZoneStore,
    /// Newest first, capped at `config.bos_history`
    bos: VecDeque<BosRecord>,
    labeler: SwingLabeler,
    swing_labels: Vec<LabeledSwing>,
    zig_zag: ZigZagLine,
    bars_seen: usize,
}

impl ZoneEngine {
    pub fn new(config: ZoneConfig) -> ZoneResult<Self> {
        config.validate()?;
        Ok(Self {
            window: BarWindow::new(config.window_len()),
            atr: AtrTracker::new(config.atr_period, config.atr_smoothing),
            supply: ZoneStore::new(ZoneKind::Supply, config.history_to_keep),
            demand: ZoneStore::new(ZoneKind::Demand, config.history_to_keep),
            bos: VecDeque::new(),
            labeler: SwingLabeler::new(),
            swing_labels: Vec::new(),
            zig_zag: ZigZagLine::new(),
            bars_seen: 0,
            config,
        })
    }

    /// Ingest one bar.
    ///
    /// A rejected bar leaves the engine exactly as it was.
    pub fn update(&mut self, bar: Bar) -> ZoneResult<UpdateReport> {
        if let Err(e) = self.check_bar(&bar) {
            log::warn!("Rejected bar {}: {}", bar.index, e);
            return Err(e);
        }

        let atr = self.atr.push(&bar);
        self.window.push(bar, atr);
        self.bars_seen += 1;

        let mut report = UpdateReport::new(bar.index, atr);

        // Breaks first: a zone admitted below must not be judged against a
        // store that still treats this bar's breaks as Live
        report.breaks.extend(apply_bar(&mut self.supply, &bar));
        report.breaks.extend(apply_bar(&mut self.demand, &bar));

        self.confirm_pivot(&bar, &mut report);

        for zone in self.supply.iter_mut().chain(self.demand.iter_mut()) {
            zone.extend_to(bar.index);
        }

        for bos in &report.breaks {
            self.bos.push_front(*bos);
        }
        self.bos.truncate(self.config.bos_history);

        Ok(report)
    }

    fn check_bar(&self, bar: &Bar) -> ZoneResult<()> {
        bar.validate()?;
        match self.window.last() {
            Some(previous) => bar.follows(previous),
            None => Ok(()),
        }
    }

    /// Look for a pivot `swing_length` bars back and offer it to its store.
    fn confirm_pivot(&mut self, bar: &Bar, report: &mut UpdateReport) {
        let length = self.config.swing_length;
        if self.window.len() < length * 2 + 1 {
            return;
        }
        let pos = self.window.len() - 1 - length;
        let pivot_atr = self.window.atr_at(pos);
        let at = ConfirmationBar::new(bar.index, self.atr.current());

        let bars = self.window.as_slice();
        let Some(swing) = swing_at(bars, pos, length) else {
            return;
        };

        let store = match swing.kind {
            SwingKind::High => &mut self.supply,
            SwingKind::Low => &mut self.demand,
        };

        // The new zone has not yet been checked against the bars that
        // confirmed it
        let mut caught_up = None;
        let decision = consider_swing(store, &swing, pivot_atr, &self.config, at, |zone| {
            caught_up = settle_zone(zone, &bars[pos + 1..]);
            zone.extend_to(bar.index);
        });

        if DEBUG_FLAGS.print_zone_decisions {
            if let ZoneDecision::Admitted { zone, .. } = &decision {
                log::debug!(
                    "Bar {} confirmed {} zone from bar {}",
                    bar.index,
                    zone.kind,
                    zone.origin_bar_index
                );
            }
        }

        let labeled = self.labeler.label(&swing);
        self.swing_labels.push(labeled);
        self.zig_zag.push(&swing);

        report.breaks.extend(caught_up);
        report.swing = Some(labeled);
        report.decision = Some(decision);
    }

    pub fn is_warmed_up(&self) -> bool {
        self.bars_seen >= self.config.min_bars()
    }

    /// Live supply zones, newest first.
    pub fn supply_zones(&self) -> Vec<Zone> {
        if !self.is_warmed_up() {
            return Vec::new();
        }
        self.supply.live_zones()
    }

    /// Live demand zones, newest first.
    pub fn demand_zones(&self) -> Vec<Zone> {
        if !self.is_warmed_up() {
            return Vec::new();
        }
        self.demand.live_zones()
    }

    /// Most recent breaks of structure, newest first.
    pub fn bos_zones(&self) -> Vec<BosRecord> {
        if !self.is_warmed_up() {
            return Vec::new();
        }
        self.bos.iter().copied().collect()
    }

    /// Every labelled swing so far, oldest first.
    pub fn swing_patterns(&self) -> Vec<LabeledSwing> {
        if !self.is_warmed_up() {
            return Vec::new();
        }
        self.swing_labels.clone()
    }

    pub fn zig_zag(&self) -> Vec<ZigZagPoint> {
        if !self.is_warmed_up() {
            return Vec::new();
        }
        self.zig_zag.points().to_vec()
    }

    pub fn current_atr(&self) -> Atr {
        self.atr.current()
    }

    pub fn bars_seen(&self) -> usize {
        self.bars_seen
    }

    pub fn last_bar(&self) -> Option<Bar> {
        self.window.last().copied()
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    /// Current state in batch output shape.
    ///
    /// BOS lists only hold what the bounded history still remembers, ordered
    /// by break bar.
    pub fn snapshot(&self) -> AnalysisOutput {
        let mut bos = self.bos_zones();
        bos.sort_by_key(|r| (r.break_bar_index, r.origin_bar_index));
        let (supply_bos, demand_bos): (Vec<BosRecord>, Vec<BosRecord>) =
            bos.into_iter().partition(|r| r.kind == ZoneKind::Supply);

        let swing_labels = self.swing_patterns();
        let swings_of = |kind: SwingKind| -> Vec<SwingPoint> {
            swing_labels
                .iter()
                .map(|l| l.swing)
                .filter(|s| s.kind == kind)
                .collect()
        };

        AnalysisOutput {
            swing_highs: swings_of(SwingKind::High),
            swing_lows: swings_of(SwingKind::Low),
            zig_zag: self.zig_zag(),
            supply_zones: self.supply_zones(),
            demand_zones: self.demand_zones(),
            supply_bos,
            demand_bos,
            swing_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::error::ZoneError;

    fn bar(i: u64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(i, i as i64 * 60_000, close, high, low, close)
    }

    fn small_config() -> ZoneConfig {
        ZoneConfig {
            swing_length: 2,
            atr_period: 3,
            history_to_keep: 3,
            bos_history: 1_000,
            ..Default::default()
        }
    }

    // Deterministic wave with drift so zones form, break and age out
    fn wave(n: u64) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                let mid = 100.0 + 8.0 * (t * 0.45).sin() + 0.15 * t + 3.0 * (t * 1.7).cos();
                let close = mid + (t * 0.9).sin();
                bar(i, mid + 1.5, mid - 1.5, close)
            })
            .collect()
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = ZoneConfig {
            swing_length: 0,
            ..Default::default()
        };
        assert!(matches!(
            ZoneEngine::new(cfg),
            Err(ZoneError::InvalidConfiguration { field: "swing_length", .. })
        ));
    }

    #[test]
    fn huge_history_limits_do_not_preallocate() {
        let cfg = ZoneConfig {
            history_to_keep: usize::MAX,
            bos_history: usize::MAX,
            ..small_config()
        };
        let mut engine = ZoneEngine::new(cfg).expect("positive limits are valid");
        for b in wave(60) {
            engine.update(b).expect("ordered bars");
        }
        assert_eq!(engine.bars_seen(), 60);
        assert_eq!(engine.demand_zones().len(), 1);
        assert!(!engine.bos_zones().is_empty());
    }

    #[test]
    fn queries_are_empty_until_warmed_up() {
        let mut engine = ZoneEngine::new(small_config()).expect("valid config");
        let bars = wave(4);
        for b in &bars {
            engine.update(*b).expect("ordered bars");
        }
        // min_bars = max(5, 3)
        assert!(!engine.is_warmed_up());
        assert!(engine.supply_zones().is_empty());
        assert!(engine.swing_patterns().is_empty());
        assert_eq!(engine.bars_seen(), 4);
    }

    #[test]
    fn out_of_order_bar_leaves_state_untouched() {
        let mut engine = ZoneEngine::new(small_config()).expect("valid config");
        for b in wave(40) {
            engine.update(b).expect("ordered bars");
        }
        let before = engine.snapshot();
        let atr_before = engine.current_atr();

        let stale = bar(39, 120.0, 90.0, 110.0);
        assert!(matches!(
            engine.update(stale),
            Err(ZoneError::OutOfOrderInput { index: 39, .. })
        ));
        let malformed = bar(40, 90.0, 120.0, 100.0);
        assert!(matches!(
            engine.update(malformed),
            Err(ZoneError::MalformedBar { index: 40, .. })
        ));

        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.current_atr(), atr_before);
        assert_eq!(engine.bars_seen(), 40);
        assert_eq!(engine.last_bar().map(|b| b.index), Some(39));
    }

    #[test]
    fn streaming_matches_batch() {
        let cfg = small_config();
        let bars = wave(200);
        let batch = analyze(&bars, &cfg).expect("valid input");

        let mut engine = ZoneEngine::new(cfg).expect("valid config");
        for b in &bars {
            engine.update(*b).expect("ordered bars");
        }
        let stream = engine.snapshot();

        assert_eq!(stream.swing_highs, batch.swing_highs);
        assert_eq!(stream.swing_lows, batch.swing_lows);
        assert_eq!(stream.swing_labels, batch.swing_labels);
        assert_eq!(stream.zig_zag, batch.zig_zag);
        assert_eq!(stream.supply_zones, batch.supply_zones);
        assert_eq!(stream.demand_zones, batch.demand_zones);
        assert_eq!(stream.supply_bos, batch.supply_bos);
        assert_eq!(stream.demand_bos, batch.demand_bos);
    }

    #[test]
    fn bos_history_is_bounded_newest_first() {
        let cfg = ZoneConfig {
            bos_history: 2,
            ..small_config()
        };
        let mut engine = ZoneEngine::new(cfg).expect("valid config");
        let mut all_breaks = Vec::new();
        for b in wave(200) {
            let report = engine.update(b).expect("ordered bars");
            all_breaks.extend(report.breaks);
        }
        assert!(all_breaks.len() > 2, "fixture should break several zones");

        let kept = engine.bos_zones();
        assert_eq!(kept.len(), 2);
        assert!(kept[0].break_bar_index >= kept[1].break_bar_index);
        assert_eq!(kept[0], all_breaks[all_breaks.len() - 1]);
    }

    #[test]
    fn live_zones_extend_to_latest_bar() {
        let mut engine = ZoneEngine::new(small_config()).expect("valid config");
        let bars = wave(120);
        for b in &bars {
            engine.update(*b).expect("ordered bars");
        }
        for zone in engine.supply_zones().iter().chain(engine.demand_zones().iter()) {
            assert_eq!(zone.right_bar_index, 119);
        }
    }
}
