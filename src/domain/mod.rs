// Domain types and value objects
pub mod bar;
pub mod swing;
pub mod volatility;

// Re-export commonly used types
pub use bar::{Bar, validate_history};
pub use swing::{LabeledSwing, SwingKind, SwingLabel, SwingPoint};
pub use volatility::Atr;
