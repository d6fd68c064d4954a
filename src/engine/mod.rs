pub mod core;
pub mod messages;
pub mod state;

// Re-export key components
pub use core::ZoneEngine;
pub use messages::UpdateReport;
pub use state::BarWindow;
