//! GPIO interrupt glue for the two push buttons.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::OutputPin;
use esp_hal::gpio::{Event, Input};
use joyled_core::{
    input::{ButtonPair, EdgeLine, ServiceSummary},
    timing::MonotonicClock,
};
use log::info;

/// Pulled-up push button input.
pub struct ButtonLine<'d>(Input<'d>);

impl<'d> ButtonLine<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self(input)
    }
}

impl EdgeLine for ButtonLine<'_> {
    fn arm_falling_edge(&mut self) {
        self.0.listen(Event::FallingEdge);
    }

    fn take_edge(&mut self) -> bool {
        if !self.0.is_interrupt_set() {
            return false;
        }
        self.0.clear_interrupt();
        true
    }
}

pub type ButtonLines<LED> = ButtonPair<'static, ButtonLine<'static>, LED>;

/// `static`-friendly slot for [`ButtonLines`] shared with the interrupt handler.
pub struct SharedButtons<LED> {
    lines: Mutex<RefCell<Option<ButtonLines<LED>>>>,
}

impl<LED> SharedButtons<LED>
where
    LED: OutputPin,
{
    pub const fn new() -> Self {
        Self {
            lines: Mutex::new(RefCell::new(None)),
        }
    }

    /// Hands the lines over to interrupt context and arms them.
    ///
    /// Arming happens inside the same critical section as the hand-over, so
    /// the handler never sees a pending edge on an empty slot.
    pub fn install(&self, mut lines: ButtonLines<LED>) {
        critical_section::with(|cs| {
            lines.arm();
            self.lines.borrow_ref_mut(cs).replace(lines);
        });
        info!("buttons armed for falling edges");
    }

    /// Entry point for the GPIO interrupt handler. No-op until installed.
    pub fn service<C>(&self, clock: &C) -> ServiceSummary
    where
        C: MonotonicClock,
    {
        critical_section::with(|cs| {
            self.lines
                .borrow_ref_mut(cs)
                .as_mut()
                .map(|lines| lines.service(clock))
                .unwrap_or_default()
        })
    }
}

impl<LED> Default for SharedButtons<LED>
where
    LED: OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}
