use thiserror::Error;

/// Errors surfaced by the zone engine.
///
/// Too little history is *not* an error: batch analysis returns an empty
/// result and streaming queries stay empty until enough bars have arrived.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZoneError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error(
        "Out of order bar: index {index} (time {time_ms}) must follow index {previous_index} (time {previous_time_ms})"
    )]
    OutOfOrderInput {
        previous_index: u64,
        previous_time_ms: i64,
        index: u64,
        time_ms: i64,
    },

    #[error("Malformed bar at index {index}: {reason}")]
    MalformedBar { index: u64, reason: String },
}

pub type ZoneResult<T> = Result<T, ZoneError>;
