//! Compile-time timing constants and the monotonic clock contract.

/// Minimum spacing between two accepted button edges.
pub const DEBOUNCE_WINDOW_US: u64 = 250_000;
/// Pause between two render/control iterations.
pub const LOOP_INTERVAL_MS: u64 = 50;
/// Period of the loop status log line.
pub const STATUS_REPORT_INTERVAL_MS: u64 = 5_000;

/// Microsecond clock that starts at boot and never goes backwards.
pub trait MonotonicClock {
    fn now_us(&self) -> u64;
}
