use core::convert::Infallible;

use embedded_hal::pwm::{ErrorKind, ErrorType};

use super::*;
use crate::{
    debounce::DebounceGate,
    input::{InputHandler, Trigger},
    render::{Rect, SCREEN},
    state::BorderStyle,
};

struct ScriptedAdc {
    x: u16,
    y: u16,
    fail_x: bool,
    reads: Vec<Axis>,
}

impl ScriptedAdc {
    fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            fail_x: false,
            reads: Vec::new(),
        }
    }
}

impl AnalogSource for ScriptedAdc {
    type Error = ();

    fn sample(&mut self, axis: Axis) -> Result<u16, Self::Error> {
        self.reads.push(axis);
        match axis {
            Axis::X if self.fail_x => Err(()),
            Axis::X => Ok(self.x),
            Axis::Y => Ok(self.y),
        }
    }
}

#[derive(Default)]
struct RecordingPwm {
    duties: Vec<u16>,
}

impl ErrorType for RecordingPwm {
    type Error = Infallible;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        ADC_MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duties.push(duty);
        Ok(())
    }
}

struct BrokenPwm;

impl ErrorType for BrokenPwm {
    type Error = ErrorKind;
}

impl SetDutyCycle for BrokenPwm {
    fn max_duty_cycle(&self) -> u16 {
        ADC_MAX
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

#[derive(Default)]
struct RecordingDisplay {
    cleared: usize,
    filled: Vec<Rect>,
    outlined: Vec<Rect>,
    flushes: usize,
    fail_flush: bool,
}

impl DisplaySink for RecordingDisplay {
    type Error = ();

    fn clear(&mut self) {
        self.cleared += 1;
        self.filled.clear();
        self.outlined.clear();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.filled.push(rect);
    }

    fn outline_rect(&mut self, rect: Rect) {
        self.outlined.push(rect);
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail_flush {
            return Err(());
        }
        self.flushes += 1;
        Ok(())
    }
}

type TestLoop<'a> = ControlLoop<'a, ScriptedAdc, RecordingPwm, RecordingPwm, RecordingDisplay>;

fn make_loop(state: &SharedState, x: u16, y: u16) -> TestLoop<'_> {
    ControlLoop::new(
        ScriptedAdc::new(x, y),
        RecordingPwm::default(),
        RecordingPwm::default(),
        RecordingDisplay::default(),
        state,
    )
}

#[test]
fn centered_stick_draws_centered_cursor_with_leds_off() {
    let state = SharedState::new();
    // 4095 - 2047 = 2048 after inversion.
    let mut control = make_loop(&state, 2048, 2047);

    let report = control.iterate();

    assert_eq!(report.outputs, LedOutputs::OFF);
    assert_eq!(report.frame.cursor(), Rect::new(60, 28, 8, 8));
    assert!(report.frame.border().is_empty());
    assert!(!report.faults.any());

    let (adc, red, blue, display) = control.release();
    assert_eq!(adc.reads, [Axis::Y, Axis::X]);
    assert_eq!(red.duties, [0]);
    assert_eq!(blue.duties, [0]);
    assert_eq!(display.cleared, 1);
    assert_eq!(display.filled, [Rect::new(60, 28, 8, 8)]);
    assert_eq!(display.flushes, 1);
}

#[test]
fn deflection_drives_red_from_x_and_blue_from_inverted_y() {
    let state = SharedState::new();
    // y raw 1095 -> corrected 3000.
    let mut control = make_loop(&state, 1000, 1095);

    let report = control.iterate();

    assert_eq!(report.sample.corrected_y(), 3000);
    assert_eq!(report.outputs, LedOutputs { red: 2096, blue: 1904 });

    let (_, red, blue, _) = control.release();
    assert_eq!(red.duties, [2096]);
    assert_eq!(blue.duties, [1904]);
}

#[test]
fn disabled_pwm_forces_both_leds_off_for_any_sample() {
    let state = SharedState::new();
    state.toggle_pwm();

    for (x, y) in [(0, 0), (4095, 4095), (1000, 3000), (2048, 2047)] {
        let mut control = make_loop(&state, x, y);
        let report = control.iterate();

        assert_eq!(report.outputs, LedOutputs::OFF);
        let (_, red, blue, _) = control.release();
        assert_eq!(red.duties, [0]);
        assert_eq!(blue.duties, [0]);
    }
}

#[test]
fn pwm_toggle_takes_effect_on_next_iteration() {
    let state = SharedState::new();
    let mut handler = InputHandler::new(&state, NullPin, DebounceGate::default());
    let mut control = make_loop(&state, 4095, 2047);

    assert_eq!(control.iterate().outputs.red, 4094);

    handler.on_falling_edge(Trigger::ButtonA, 0);
    assert_eq!(control.iterate().outputs.red, 0);

    handler.on_falling_edge(Trigger::ButtonA, 300_000);
    assert_eq!(control.iterate().outputs.red, 4094);
}

#[test]
fn border_follows_joystick_button_presses() {
    let state = SharedState::new();
    let mut handler = InputHandler::new(&state, NullPin, DebounceGate::default());
    let mut control = make_loop(&state, 2048, 2047);

    handler.on_falling_edge(Trigger::JoystickButton, 0);
    let report = control.iterate();
    assert_eq!(report.state.border_style, BorderStyle::Single);
    assert_eq!(report.frame.border(), [SCREEN]);

    handler.on_falling_edge(Trigger::JoystickButton, 300_000);
    let report = control.iterate();
    assert_eq!(report.frame.border(), [SCREEN, Rect::new(2, 2, 124, 60)]);

    let (_, _, _, display) = control.release();
    assert_eq!(display.outlined, [SCREEN, Rect::new(2, 2, 124, 60)]);
    assert_eq!(display.cleared, 2);
}

#[test]
fn failed_sample_falls_back_to_rest() {
    let state = SharedState::new();
    let mut adc = ScriptedAdc::new(0, 2047);
    adc.fail_x = true;
    let mut control = ControlLoop::new(
        adc,
        RecordingPwm::default(),
        RecordingPwm::default(),
        RecordingDisplay::default(),
        &state,
    );

    let report = control.iterate();

    assert!(report.faults.sample);
    assert_eq!(report.sample.axis_x, ADC_CENTER);
    assert_eq!(report.outputs, LedOutputs::OFF);
}

#[test]
fn output_faults_are_reported_without_stopping_the_iteration() {
    let state = SharedState::new();
    let display = RecordingDisplay {
        fail_flush: true,
        ..RecordingDisplay::default()
    };
    let mut control = ControlLoop::new(
        ScriptedAdc::new(3000, 2047),
        BrokenPwm,
        RecordingPwm::default(),
        display,
        &state,
    );

    let report = control.iterate();

    assert!(report.faults.pwm);
    assert!(report.faults.display);
    assert!(!report.faults.sample);

    let (_, _, blue, display) = control.release();
    assert_eq!(blue.duties, [0]);
    assert_eq!(display.filled.len(), 1);
}

#[test]
fn green_led_fault_surfaces_once_in_the_next_iteration() {
    let state = SharedState::new();
    let mut control = make_loop(&state, 2048, 2047);

    state.note_green_led_fault();
    let report = control.iterate();
    assert!(report.faults.green_led);
    assert!(report.faults.any());

    assert!(!control.iterate().faults.green_led);
}

struct NullPin;

impl embedded_hal::digital::ErrorType for NullPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
