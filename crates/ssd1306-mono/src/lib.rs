#![cfg_attr(not(test), no_std)]

//! SSD1306 (128x64 monochrome OLED, I2C) driver primitives.

mod framebuffer;
pub mod protocol;

pub use framebuffer::FrameBuffer;

use embedded_hal::i2c::{I2c, Operation};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DriverConfig {
    /// 7-bit bus address.
    pub address: u8,
    /// Bus clock in Hz the board glue configures the I2C peripheral with.
    pub bus_hz: u32,
    /// Contrast applied during [`Ssd1306::init`].
    pub contrast: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverConfig {
    /// Default address, 400 kHz bus and the contrast the panel ships with.
    pub const fn new() -> Self {
        Self {
            address: protocol::DEFAULT_ADDRESS,
            bus_hz: 400_000,
            contrast: 0xCF,
        }
    }

    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub const fn with_bus_hz(mut self, bus_hz: u32) -> Self {
        self.bus_hz = bus_hz;
        self
    }

    pub const fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<I2cErr> {
    /// I2C transaction failed.
    I2c(I2cErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

pub type DriverResult<I2cErr> = Result<(), Error<I2cErr>>;

/// SSD1306 driver.
#[derive(Debug)]
pub struct Ssd1306<I2C> {
    i2c: I2C,
    config: DriverConfig,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Creates a new driver instance. No bus traffic happens until [`Self::init`].
    pub fn new(i2c: I2C, config: DriverConfig) -> Self {
        Self { i2c, config }
    }

    /// Returns current configuration.
    pub fn config(&self) -> DriverConfig {
        self.config
    }

    /// Releases the owned bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Runs the power-up command sequence and switches the panel on.
    pub fn init(&mut self) -> DriverResult<I2C::Error> {
        self.write_commands(&protocol::init_sequence(self.config.contrast))
    }

    /// Switches the panel on or off (GDDRAM is retained).
    pub fn set_display_on(&mut self, on: bool) -> DriverResult<I2C::Error> {
        let command = if on {
            protocol::DISPLAY_ON
        } else {
            protocol::DISPLAY_OFF
        };
        self.write_commands(&[command])
    }

    /// Flushes a full framebuffer.
    pub fn flush_full(&mut self, frame: &FrameBuffer) -> DriverResult<I2C::Error> {
        self.write_commands(&protocol::full_window())?;

        for page in 0..protocol::PAGES as u8 {
            let data = frame.page(page).ok_or(Error::InvalidInput)?;
            self.write_data(data)?;
        }

        Ok(())
    }

    fn write_commands(&mut self, commands: &[u8]) -> DriverResult<I2C::Error> {
        let mut ops = [
            Operation::Write(&[protocol::CONTROL_COMMAND]),
            Operation::Write(commands),
        ];
        self.i2c
            .transaction(self.config.address, &mut ops)
            .map_err(Error::I2c)
    }

    fn write_data(&mut self, data: &[u8]) -> DriverResult<I2C::Error> {
        let mut ops = [
            Operation::Write(&[protocol::CONTROL_DATA]),
            Operation::Write(data),
        ];
        self.i2c
            .transaction(self.config.address, &mut ops)
            .map_err(Error::I2c)
    }
}
