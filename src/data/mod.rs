// Data loading: bar files on disk in, plain bar series out
pub mod bar_file;
pub mod series;

pub use bar_file::{BarCacheFile, load_bars, load_series, parse_bars_json};
pub use series::BarSeries;
