use chrono::DateTime;

const MS_IN_MIN: i64 = 60_000;
const MS_IN_H: i64 = MS_IN_MIN * 60;
const MS_IN_D: i64 = MS_IN_H * 24;

const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Bar spacings with a shorthand name.
const KNOWN_INTERVALS: [(i64, &str); 8] = [
    (MS_IN_MIN, "1m"),
    (MS_IN_MIN * 5, "5m"),
    (MS_IN_MIN * 15, "15m"),
    (MS_IN_MIN * 30, "30m"),
    (MS_IN_H, "1h"),
    (MS_IN_H * 4, "4h"),
    (MS_IN_D, "1d"),
    (MS_IN_D * 7, "1w"),
];

/// Binance-style shorthand for a bar spacing (e.g. `30m`, `1h`).
pub fn interval_label(interval_ms: i64) -> Option<&'static str> {
    KNOWN_INTERVALS
        .iter()
        .find(|(ms, _)| *ms == interval_ms)
        .map(|(_, label)| *label)
}

/// Bar timestamp for log output. Empty for out-of-range values.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format(STANDARD_TIME_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Spacing of a bar series, from its first two timestamps.
pub fn bar_interval_ms(times_ms: &[i64]) -> Option<i64> {
    match times_ms {
        [first, second, ..] => Some(second - first),
        _ => None,
    }
}
