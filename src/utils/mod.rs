pub mod time_utils;

pub use time_utils::{bar_interval_ms, epoch_ms_to_utc, interval_label};
