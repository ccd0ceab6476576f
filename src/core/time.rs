//! Timestamps
//!
//! Time never comes from the system clock inside settlement logic. Every
//! state-mutating call carries the host's notion of "now", which keeps the
//! whole state machine replayable: the same call sequence with the same
//! timestamps produces the same ledger on any platform.

/// Milliseconds since the Unix epoch, as reported by the host per call.
pub type Timestamp = u64;

/// One second in timestamp units.
pub const SECOND_MS: u64 = 1_000;

/// One minute.
pub const MINUTE_MS: u64 = 60 * SECOND_MS;

/// One hour.
pub const HOUR_MS: u64 = 60 * MINUTE_MS;

/// One day: the default request time-to-live.
pub const DAY_MS: u64 = 24 * HOUR_MS;
