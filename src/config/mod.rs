//! Configuration module for the zone engine.

pub mod analysis;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AtrSmoothing, OVERLAP_ATR_MULTIPLIER, ZoneConfig};
pub use persistence::{BAR_CACHE_VERSION, bar_cache_filename};
