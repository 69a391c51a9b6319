//! Button-driven state shared between the GPIO interrupt and the main loop.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

/// Display border variant, advanced by the joystick button.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum BorderStyle {
    None = 0,
    Single = 1,
    Double = 2,
}

impl BorderStyle {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Single,
            2 => Self::Double,
            _ => Self::None,
        }
    }

    /// Next style in the fixed `None -> Single -> Double -> None` cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Single,
            Self::Single => Self::Double,
            Self::Double => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

/// Immutable view of [`SharedState`] taken by the main loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StateSnapshot {
    pub pwm_enabled: bool,
    pub led_green_on: bool,
    pub border_style: BorderStyle,
    /// Bumped on every mutation.
    pub revision: u32,
}

impl StateSnapshot {
    pub const fn initial() -> Self {
        Self {
            pwm_enabled: true,
            led_green_on: false,
            border_style: BorderStyle::None,
            revision: 0,
        }
    }
}

/// Lock-free shared button state.
///
/// Written only from the input handler, read by the loop. Every field is a
/// single atomic so a reader never sees a torn value; a snapshot taken while
/// the handler runs may mix old and new fields and is corrected on the next
/// iteration.
#[derive(Debug)]
pub struct SharedState {
    pwm_enabled: AtomicBool,
    led_green_on: AtomicBool,
    border_style: AtomicU8,
    revision: AtomicU32,
    green_led_fault: AtomicBool,
}

impl SharedState {
    pub const fn new() -> Self {
        let initial = StateSnapshot::initial();
        Self {
            pwm_enabled: AtomicBool::new(initial.pwm_enabled),
            led_green_on: AtomicBool::new(initial.led_green_on),
            border_style: AtomicU8::new(initial.border_style as u8),
            revision: AtomicU32::new(initial.revision),
            green_led_fault: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            pwm_enabled: self.pwm_enabled.load(Ordering::Acquire),
            led_green_on: self.led_green_on.load(Ordering::Acquire),
            border_style: BorderStyle::from_raw(self.border_style.load(Ordering::Acquire)),
            revision: self.revision.load(Ordering::Acquire),
        }
    }

    pub fn pwm_enabled(&self) -> bool {
        self.pwm_enabled.load(Ordering::Acquire)
    }

    /// Flips the global PWM enable and returns the new value.
    pub fn toggle_pwm(&self) -> bool {
        let next = !self.pwm_enabled.fetch_xor(true, Ordering::AcqRel);
        self.bump_revision();
        next
    }

    /// Flips the green LED flag and returns the new value.
    pub fn toggle_green_led(&self) -> bool {
        let next = !self.led_green_on.fetch_xor(true, Ordering::AcqRel);
        self.bump_revision();
        next
    }

    /// Moves the border one step along its cycle and returns the new style.
    pub fn advance_border(&self) -> BorderStyle {
        // Single writer: only the input handler stores here.
        let next = BorderStyle::from_raw(self.border_style.load(Ordering::Acquire)).next();
        self.border_style.store(next as u8, Ordering::Release);
        self.bump_revision();
        next
    }

    /// Records a failed green LED pin write for the loop to report.
    pub fn note_green_led_fault(&self) {
        self.green_led_fault.store(true, Ordering::Release);
    }

    /// Returns and clears the pending green LED fault.
    pub fn take_green_led_fault(&self) -> bool {
        self.green_led_fault.swap(false, Ordering::AcqRel)
    }

    fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_pwm_on_led_off_no_border() {
        let state = SharedState::new();
        assert_eq!(state.snapshot(), StateSnapshot::initial());
        assert!(state.pwm_enabled());
    }

    #[test]
    fn toggles_return_new_value_and_bump_revision() {
        let state = SharedState::new();

        assert!(!state.toggle_pwm());
        assert!(state.toggle_green_led());
        assert!(state.toggle_pwm());

        let snap = state.snapshot();
        assert!(snap.pwm_enabled);
        assert!(snap.led_green_on);
        assert_eq!(snap.revision, 3);
    }

    #[test]
    fn border_cycles_in_fixed_order() {
        let state = SharedState::new();

        assert_eq!(state.advance_border(), BorderStyle::Single);
        assert_eq!(state.advance_border(), BorderStyle::Double);
        assert_eq!(state.advance_border(), BorderStyle::None);
        assert_eq!(state.snapshot().border_style, BorderStyle::None);
    }

    #[test]
    fn green_led_fault_is_taken_once() {
        let state = SharedState::new();
        assert!(!state.take_green_led_fault());

        state.note_green_led_fault();
        assert!(state.take_green_led_fault());
        assert!(!state.take_green_led_fault());
        assert_eq!(state.snapshot().revision, 0);
    }

    #[test]
    fn unknown_raw_border_reads_as_none() {
        assert_eq!(BorderStyle::from_raw(7), BorderStyle::None);
    }
}
