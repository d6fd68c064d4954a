//! File persistence and serialization configuration

/// Base filename for bar cache files (without extension)
pub const BAR_CACHE_FILENAME_WITHOUT_EXT: &str = "bars";

/// Current version of the bar cache serialization format
pub const BAR_CACHE_VERSION: f64 = 1.0;

/// Generate a cache filename for a named series
/// Example: "bars_BTCUSDT_v1.bin"
pub fn bar_cache_filename(series_name: &str) -> String {
    format!(
        "{}_{}_v{}.bin",
        BAR_CACHE_FILENAME_WITHOUT_EXT, series_name, BAR_CACHE_VERSION
    )
}
