//! Time-gated edge filter.

use crate::timing::DEBOUNCE_WINDOW_US;

/// Accepts an edge only when the previous accepted edge is at least one window
/// old.
///
/// One gate is shared by every button it serves: an edge on one line inside
/// the window of an accepted edge on another line is rejected too.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DebounceGate {
    window_us: u64,
    last_accepted_us: Option<u64>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_US)
    }
}

impl DebounceGate {
    pub const fn new(window_us: u64) -> Self {
        Self {
            window_us,
            last_accepted_us: None,
        }
    }

    /// Records an edge at `now_us` and reports whether it is accepted.
    ///
    /// The stored timestamp only moves on acceptance.
    pub fn try_accept(&mut self, now_us: u64) -> bool {
        let accepted = match self.last_accepted_us {
            None => true,
            Some(last) => now_us.saturating_sub(last) >= self.window_us,
        };

        if accepted {
            self.last_accepted_us = Some(now_us);
        }
        accepted
    }
}
