//! Render/control loop: sample, map, drive LEDs, redraw.

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::{
    mapping::{ADC_CENTER, ADC_MAX, invert_axis, map_joystick_to_brightness},
    render::{DisplaySink, RenderFrame, draw_frame},
    state::{SharedState, StateSnapshot},
};

/// Joystick axis wired to one ADC channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

/// Channel-multiplexed 12-bit ADC.
///
/// Each call selects `axis` and converts it before returning, so two calls
/// never overlap on the shared converter.
pub trait AnalogSource {
    type Error;

    fn sample(&mut self, axis: Axis) -> Result<u16, Self::Error>;
}

/// Raw readings of one iteration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct JoystickSample {
    pub axis_x: u16,
    pub axis_y: u16,
}

impl JoystickSample {
    pub const fn at_rest() -> Self {
        Self {
            axis_x: ADC_CENTER,
            axis_y: ADC_CENTER,
        }
    }

    /// Y reading flipped to screen orientation.
    pub const fn corrected_y(self) -> u16 {
        invert_axis(self.axis_y)
    }
}

/// PWM levels for the two axis LEDs, `0..=ADC_MAX`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LedOutputs {
    /// Follows the x axis.
    pub red: u16,
    /// Follows the (corrected) y axis.
    pub blue: u16,
}

impl LedOutputs {
    pub const OFF: Self = Self { red: 0, blue: 0 };

    /// Maps a sample to LED levels; a disabled PWM forces both to zero.
    pub const fn compute(sample: JoystickSample, pwm_enabled: bool) -> Self {
        if !pwm_enabled {
            return Self::OFF;
        }

        Self {
            red: map_joystick_to_brightness(sample.axis_x),
            blue: map_joystick_to_brightness(sample.corrected_y()),
        }
    }
}

/// Collaborator failures seen during one iteration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoopFaults {
    pub sample: bool,
    pub pwm: bool,
    pub display: bool,
    /// A green LED write failed in the input handler since the last iteration.
    pub green_led: bool,
}

impl LoopFaults {
    pub const fn any(self) -> bool {
        self.sample || self.pwm || self.display || self.green_led
    }
}

/// What one iteration read, decided and drew.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IterationReport {
    pub sample: JoystickSample,
    pub state: StateSnapshot,
    pub outputs: LedOutputs,
    pub frame: RenderFrame,
    pub faults: LoopFaults,
}

/// Owns the loop-side peripherals and reads [`SharedState`].
pub struct ControlLoop<'a, ADC, RED, BLUE, DISP> {
    adc: ADC,
    red: RED,
    blue: BLUE,
    display: DISP,
    state: &'a SharedState,
    last_revision: u32,
}

impl<'a, ADC, RED, BLUE, DISP> ControlLoop<'a, ADC, RED, BLUE, DISP>
where
    ADC: AnalogSource,
    RED: SetDutyCycle,
    BLUE: SetDutyCycle,
    DISP: DisplaySink,
{
    pub fn new(adc: ADC, red: RED, blue: BLUE, display: DISP, state: &'a SharedState) -> Self {
        Self {
            adc,
            red,
            blue,
            display,
            state,
            last_revision: state.snapshot().revision,
        }
    }

    /// Runs one iteration. Pacing between iterations is the caller's job.
    pub fn iterate(&mut self) -> IterationReport {
        let mut faults = LoopFaults {
            green_led: self.state.take_green_led_fault(),
            ..LoopFaults::default()
        };

        let sample = self.read_sample(&mut faults);
        let state = self.observe_state();

        let outputs = LedOutputs::compute(sample, state.pwm_enabled);
        if set_level(&mut self.red, outputs.red).is_err() {
            faults.pwm = true;
        }
        if set_level(&mut self.blue, outputs.blue).is_err() {
            faults.pwm = true;
        }

        let frame = RenderFrame::compose(sample.axis_x, sample.corrected_y(), state.border_style);
        if draw_frame(&frame, &mut self.display).is_err() {
            faults.display = true;
        }

        IterationReport {
            sample,
            state,
            outputs,
            frame,
            faults,
        }
    }

    /// Releases owned peripherals.
    pub fn release(self) -> (ADC, RED, BLUE, DISP) {
        (self.adc, self.red, self.blue, self.display)
    }

    fn read_sample(&mut self, faults: &mut LoopFaults) -> JoystickSample {
        // Y first, then X.
        let axis_y = self.adc.sample(Axis::Y).unwrap_or_else(|_| {
            faults.sample = true;
            ADC_CENTER
        });
        let axis_x = self.adc.sample(Axis::X).unwrap_or_else(|_| {
            faults.sample = true;
            ADC_CENTER
        });

        JoystickSample { axis_x, axis_y }
    }

    fn observe_state(&mut self) -> StateSnapshot {
        let state = self.state.snapshot();
        if state.revision != self.last_revision {
            debug!(
                "state revision={} pwm_enabled={} led_green_on={} border={}",
                state.revision,
                state.pwm_enabled,
                state.led_green_on,
                state.border_style.as_str()
            );
            self.last_revision = state.revision;
        }
        state
    }
}

fn set_level<P>(pwm: &mut P, level: u16) -> Result<(), P::Error>
where
    P: SetDutyCycle,
{
    pwm.set_duty_cycle_fraction(level.min(ADC_MAX), ADC_MAX)
}

#[cfg(test)]
mod tests;
