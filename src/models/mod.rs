// Domain models for zone analysis
// These modules contain pure business logic independent of rendering

pub mod zigzag;
pub mod zone;
pub mod zone_store;

// Re-export key types for convenience
pub use zigzag::{ZigZagLine, ZigZagPoint, ZigZagStep};
pub use zone::{BosRecord, Zone, ZoneKind, ZoneState};
pub use zone_store::ZoneStore;
