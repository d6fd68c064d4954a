//! Swing high / swing low detection over a symmetric window.
//!
//! Bar `i` is a swing high when its high is strictly above the high of every
//! other bar in `[i - len, i + len]`; swing lows mirror this with lows. Bars
//! closer than `len` to either end of the history never qualify.

use itertools::Itertools;

use crate::domain::{Bar, SwingKind, SwingPoint};

fn has_full_window(n: usize, i: usize, swing_length: usize) -> bool {
    i >= swing_length && i + swing_length < n
}

pub fn is_swing_high(bars: &[Bar], i: usize, swing_length: usize) -> bool {
    if !has_full_window(bars.len(), i, swing_length) {
        return false;
    }
    let candidate = bars[i].high;
    (i - swing_length..=i + swing_length)
        .filter(|&j| j != i)
        .all(|j| candidate > bars[j].high)
}

pub fn is_swing_low(bars: &[Bar], i: usize, swing_length: usize) -> bool {
    if !has_full_window(bars.len(), i, swing_length) {
        return false;
    }
    let candidate = bars[i].low;
    (i - swing_length..=i + swing_length)
        .filter(|&j| j != i)
        .all(|j| candidate < bars[j].low)
}

/// Classify bar `i`.
///
/// An outside bar that is both the strict highest high and strict lowest low
/// of its window is ambiguous and resolves to no pivot.
pub fn swing_at(bars: &[Bar], i: usize, swing_length: usize) -> Option<SwingPoint> {
    let kind = match (
        is_swing_high(bars, i, swing_length),
        is_swing_low(bars, i, swing_length),
    ) {
        (true, false) => SwingKind::High,
        (false, true) => SwingKind::Low,
        _ => return None,
    };

    let bar = &bars[i];
    Some(SwingPoint {
        bar_index: bar.index,
        time_ms: bar.time_ms,
        price: match kind {
            SwingKind::High => bar.high,
            SwingKind::Low => bar.low,
        },
        kind,
    })
}

fn swings_of_kind(bars: &[Bar], swing_length: usize, kind: SwingKind) -> Vec<SwingPoint> {
    if bars.len() < swing_length * 2 + 1 {
        return Vec::new();
    }
    (swing_length..bars.len() - swing_length)
        .filter_map(|i| swing_at(bars, i, swing_length))
        .filter(|swing| swing.kind == kind)
        .collect()
}

pub fn find_swing_highs(bars: &[Bar], swing_length: usize) -> Vec<SwingPoint> {
    swings_of_kind(bars, swing_length, SwingKind::High)
}

pub fn find_swing_lows(bars: &[Bar], swing_length: usize) -> Vec<SwingPoint> {
    swings_of_kind(bars, swing_length, SwingKind::Low)
}

/// Highs and lows merged into one chronological list.
pub fn find_swings(bars: &[Bar], swing_length: usize) -> Vec<SwingPoint> {
    find_swing_highs(bars, swing_length)
        .into_iter()
        .merge_by(find_swing_lows(bars, swing_length), |a, b| {
            a.bar_index <= b.bar_index
        })
        .collect()
}
