use esp_hal::{
    gpio::DriveMode,
    ledc::{
        LSGlobalClkSource, Ledc, LowSpeed,
        channel::{self as ledc_channel, ChannelIFace as _},
        timer::{self as ledc_timer, TimerIFace as _},
    },
    peripherals::{GPIO12, GPIO13, LEDC},
    time::Rate,
};
use static_cell::StaticCell;

use super::LED_PWM_HZ;

static LED_TIMER: StaticCell<ledc_timer::Timer<'static, LowSpeed>> = StaticCell::new();

pub(super) type LedChannel = ledc_channel::Channel<'static, LowSpeed>;

#[derive(Debug)]
pub(super) enum LedPwmError {
    Timer(ledc_timer::Error),
    Channel(ledc_channel::Error),
}

/// Red (GPIO13) and blue (GPIO12) LEDs on one 12-bit low-speed LEDC timer,
/// both starting dark.
pub(super) fn led_pwm_channels(
    ledc: LEDC<'static>,
    red_pin: GPIO13<'static>,
    blue_pin: GPIO12<'static>,
) -> Result<(LedChannel, LedChannel), LedPwmError> {
    let mut ledc = Ledc::new(ledc);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let mut timer = ledc.timer::<LowSpeed>(ledc_timer::Number::Timer0);
    timer
        .configure(ledc_timer::config::Config {
            duty: ledc_timer::config::Duty::Duty12Bit,
            clock_source: ledc_timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(LED_PWM_HZ),
        })
        .map_err(LedPwmError::Timer)?;
    let timer = LED_TIMER.init(timer);

    let mut red = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel0, red_pin);
    red.configure(ledc_channel::config::Config {
        timer: &*timer,
        duty_pct: 0,
        drive_mode: DriveMode::PushPull,
    })
    .map_err(LedPwmError::Channel)?;

    let mut blue = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel1, blue_pin);
    blue.configure(ledc_channel::config::Config {
        timer: &*timer,
        duty_pct: 0,
        drive_mode: DriveMode::PushPull,
    })
    .map_err(LedPwmError::Channel)?;

    Ok((red, blue))
}
