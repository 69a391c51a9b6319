#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_hal::{
    analog::adc::{Adc, AdcConfig, Attenuation},
    clock::CpuClock,
    gpio::{Input, InputConfig, Io, Level, Output, OutputConfig, Pull},
    handler,
    i2c::master::{Config as I2cConfig, I2c},
    ram,
    time::{Instant, Rate},
    timer::timg::TimerGroup,
};
use joyled_core::{
    control::ControlLoop,
    debounce::DebounceGate,
    input::{ButtonPair, InputHandler},
    state::SharedState,
    timing::{DEBOUNCE_WINDOW_US, LOOP_INTERVAL_MS},
};
use joyled_hal_esp32s3::{
    input::buttons::{ButtonLine, SharedButtons},
    platform::{analog::JoystickAdc, clock::BootClock, display::OledDisplay},
};
use log::{LevelFilter, info};
use ssd1306_mono::DriverConfig;

use status::{FaultLog, StatusReporter};

#[path = "main/board.rs"]
mod board;
#[path = "main/status.rs"]
mod status;

const DISPLAY_CONFIG: DriverConfig = DriverConfig::new()
    .with_address(0x3C)
    .with_bus_hz(400_000);
const LED_PWM_HZ: u32 = 10_000;

static STATE: SharedState = SharedState::new();
static BUTTONS: SharedButtons<Output<'static>> = SharedButtons::new();

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[handler]
#[ram]
fn gpio_handler() {
    let _ = BUTTONS.service(&BootClock);
}

async fn park(reason: &str) -> ! {
    esp_println::println!("boot: halted ({})", reason);
    loop {
        Timer::after_secs(1).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: joyled starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Joystick wiring: VRX=GPIO1 (ADC1_CH0), VRY=GPIO2 (ADC1_CH1)
    let mut adc_config = AdcConfig::new();
    let vrx = adc_config.enable_pin(peripherals.GPIO1, Attenuation::_11dB);
    let vry = adc_config.enable_pin(peripherals.GPIO2, Attenuation::_11dB);
    let joystick = JoystickAdc::new(Adc::new(peripherals.ADC1, adc_config), vrx, vry);

    // OLED wiring: SDA=GPIO14, SCL=GPIO15
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_hz(DISPLAY_CONFIG.bus_hz));
    let i2c = match I2c::new(peripherals.I2C0, i2c_config) {
        Ok(i2c) => i2c
            .with_sda(peripherals.GPIO14)
            .with_scl(peripherals.GPIO15),
        Err(err) => {
            info!("i2c config failed: {:?}", err);
            park("i2c config").await
        }
    };

    let mut display = OledDisplay::new(i2c, DISPLAY_CONFIG);
    esp_println::println!("display: init begin (SDA=14 SCL=15 addr=0x3C)");
    if let Err(err) = display.initialize() {
        esp_println::println!("display: initialize failed");
        info!("display initialize failed: {:?}", err);
    } else {
        esp_println::println!("display: initialize ok");
    }
    if let Err(err) = display.clear_all() {
        esp_println::println!("display: clear failed");
        info!("display clear failed: {:?}", err);
    } else {
        esp_println::println!("display: clear ok");
    }

    // LED wiring: GREEN=GPIO11 (digital), BLUE=GPIO12 (PWM), RED=GPIO13 (PWM)
    let green = Output::new(peripherals.GPIO11, Level::Low, OutputConfig::default());
    let (red, blue) =
        match board::led_pwm_channels(peripherals.LEDC, peripherals.GPIO13, peripherals.GPIO12) {
            Ok(channels) => channels,
            Err(err) => {
                info!("led pwm setup failed: {:?}", err);
                let _ = display.disable_output();
                park("led pwm").await
            }
        };

    // Button wiring: A=GPIO5, JOYSTICK=GPIO21, both active low
    let input_cfg = InputConfig::default().with_pull(Pull::Up);
    let button_a = Input::new(peripherals.GPIO5, input_cfg);
    let joystick_button = Input::new(peripherals.GPIO21, input_cfg);

    let handler = InputHandler::new(&STATE, green, DebounceGate::new(DEBOUNCE_WINDOW_US));
    let mut io = Io::new(peripherals.IO_MUX);
    BUTTONS.install(ButtonPair::new(
        ButtonLine::new(button_a),
        ButtonLine::new(joystick_button),
        handler,
    ));
    io.set_interrupt_handler(gpio_handler);

    let mut control = ControlLoop::new(joystick, red, blue, display, &STATE);
    let mut faults = FaultLog::default();

    info!(
        "joyled started: loop_interval_ms={} debounce_us={} i2c_hz={} pwm_hz={}",
        LOOP_INTERVAL_MS, DEBOUNCE_WINDOW_US, DISPLAY_CONFIG.bus_hz, LED_PWM_HZ
    );
    info!("Joystick pins: VRX=GPIO1 VRY=GPIO2 SW=GPIO21");
    info!("LED pins: GREEN=GPIO11 BLUE=GPIO12 RED=GPIO13");
    info!("Button A pin: GPIO5");

    let loop_start = Instant::now();
    let mut reporter = StatusReporter::new(0);

    loop {
        let report = control.iterate();
        let now_ms = loop_start.elapsed().as_millis();

        faults.note(report.faults);
        reporter.track(&report, now_ms);

        Timer::after_millis(LOOP_INTERVAL_MS).await;
    }
}
