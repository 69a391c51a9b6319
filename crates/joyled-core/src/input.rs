//! Falling-edge handler run from the GPIO interrupt.

use embedded_hal::digital::{OutputPin, PinState};

use crate::{debounce::DebounceGate, state::SharedState, timing::MonotonicClock};

/// Button line that produced an edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// Toggles the PWM enable.
    ButtonA,
    /// Toggles the green LED and advances the border.
    JoystickButton,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeOutcome {
    Accepted(Trigger),
    /// Accepted and applied, but the green LED pin write failed.
    LedFault(Trigger),
    Rejected,
}

/// Applies debounced button edges to [`SharedState`].
///
/// Owns the debounce gate and the green LED pin. Every call is bounded: one
/// gate check, at most two atomic updates and one pin write.
#[derive(Debug)]
pub struct InputHandler<'a, LED> {
    gate: DebounceGate,
    state: &'a SharedState,
    green_led: LED,
}

impl<'a, LED> InputHandler<'a, LED>
where
    LED: OutputPin,
{
    /// Creates a handler and drives the green LED to match `state`.
    pub fn new(state: &'a SharedState, green_led: LED, gate: DebounceGate) -> Self {
        let mut handler = Self {
            gate,
            state,
            green_led,
        };
        handler.write_green_led(state.snapshot().led_green_on);
        handler
    }

    /// Handles one falling edge observed at `now_us`.
    pub fn on_falling_edge(&mut self, trigger: Trigger, now_us: u64) -> EdgeOutcome {
        if !self.gate.try_accept(now_us) {
            return EdgeOutcome::Rejected;
        }

        match trigger {
            Trigger::ButtonA => {
                let _ = self.state.toggle_pwm();
            }
            Trigger::JoystickButton => {
                let on = self.state.toggle_green_led();
                let _ = self.state.advance_border();
                if !self.write_green_led(on) {
                    return EdgeOutcome::LedFault(trigger);
                }
            }
        }

        EdgeOutcome::Accepted(trigger)
    }

    fn write_green_led(&mut self, on: bool) -> bool {
        let written = self.green_led.set_state(PinState::from(on)).is_ok();
        if !written {
            self.state.note_green_led_fault();
        }
        written
    }
}

/// Interrupt-capable input line.
pub trait EdgeLine {
    /// Enables the falling-edge interrupt.
    fn arm_falling_edge(&mut self);

    /// Clears a pending edge flag. Returns whether one was set.
    fn take_edge(&mut self) -> bool;
}

/// Result of servicing one GPIO interrupt.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ServiceSummary {
    pub accepted: u8,
    pub rejected: u8,
    pub led_faults: u8,
}

/// Button A, the joystick push button and the handler they feed.
///
/// Lines stay disarmed until [`Self::arm`]; arm only once the interrupt
/// handler can reach this value, or a pending flag is never cleared.
#[derive(Debug)]
pub struct ButtonPair<'a, L, LED> {
    button_a: L,
    joystick_button: L,
    handler: InputHandler<'a, LED>,
}

impl<'a, L, LED> ButtonPair<'a, L, LED>
where
    L: EdgeLine,
    LED: OutputPin,
{
    pub fn new(button_a: L, joystick_button: L, handler: InputHandler<'a, LED>) -> Self {
        Self {
            button_a,
            joystick_button,
            handler,
        }
    }

    pub fn arm(&mut self) {
        self.button_a.arm_falling_edge();
        self.joystick_button.arm_falling_edge();
    }

    /// Clears pending edge flags and feeds each one to the handler.
    ///
    /// Button A is serviced first when both lines fired together.
    pub fn service<C>(&mut self, clock: &C) -> ServiceSummary
    where
        C: MonotonicClock,
    {
        let mut summary = ServiceSummary::default();

        for trigger in [Trigger::ButtonA, Trigger::JoystickButton] {
            let line = match trigger {
                Trigger::ButtonA => &mut self.button_a,
                Trigger::JoystickButton => &mut self.joystick_button,
            };
            if !line.take_edge() {
                continue;
            }

            match self.handler.on_falling_edge(trigger, clock.now_us()) {
                EdgeOutcome::Accepted(_) => summary.accepted += 1,
                EdgeOutcome::LedFault(_) => {
                    summary.accepted += 1;
                    summary.led_faults += 1;
                }
                EdgeOutcome::Rejected => summary.rejected += 1,
            }
        }

        summary
    }
}
