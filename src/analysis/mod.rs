// Analysis stages, leaves first
pub mod batch;
pub mod breakout;
pub mod pivots;
pub mod swing_labels;
pub mod volatility;
pub mod zigzag;
pub mod zone_builder;

// Re-export commonly used types
pub use batch::{AnalysisOutput, analyze, analyze_collection};
pub use swing_labels::SwingLabeler;
pub use volatility::{AtrTracker, atr_series};
pub use zone_builder::{ConfirmationBar, ZoneDecision};
