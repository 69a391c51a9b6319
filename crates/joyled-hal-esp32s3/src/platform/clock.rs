use esp_hal::time::Instant;
use joyled_core::timing::MonotonicClock;

/// System timer since boot.
#[derive(Debug, Default, Clone, Copy)]
pub struct BootClock;

impl MonotonicClock for BootClock {
    fn now_us(&self) -> u64 {
        Instant::now().duration_since_epoch().as_micros()
    }
}
