//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. Decision, BOS and eviction lines go
//! through `log::debug!`, so they also need `RUST_LOG=debug`.

pub struct DebugFlags {
    /// Emit one line per candidate zone: admitted, rejected as overlapping, or skipped (no ATR).
    pub print_zone_decisions: bool,
    /// Emit a line whenever a zone is retired by a Break of Structure.
    pub print_bos_events: bool,
    /// Emit a line whenever a zone store drops its oldest entry.
    pub print_evictions: bool,
    /// Emit a per-series summary at the end of a batch run.
    pub print_batch_summary: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_zone_decisions: false,
    print_bos_events: false,
    print_evictions: false,
    print_batch_summary: true,
};
