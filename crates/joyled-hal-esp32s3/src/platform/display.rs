use embedded_hal::i2c::I2c;
use joyled_core::render::{DisplaySink, Rect};
use log::info;
use ssd1306_mono::{DriverConfig, Error as DriverError, FrameBuffer, Ssd1306};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DisplayError<I2cErr> {
    Bus(I2cErr),
    Protocol,
}

impl<I2cErr> From<DriverError<I2cErr>> for DisplayError<I2cErr> {
    fn from(err: DriverError<I2cErr>) -> Self {
        match err {
            DriverError::I2c(err) => Self::Bus(err),
            DriverError::InvalidInput => Self::Protocol,
        }
    }
}

pub type OledDisplayResult<I2cErr> = Result<(), DisplayError<I2cErr>>;

/// Board-level SSD1306 adapter: a local framebuffer plus the bus driver.
#[derive(Debug)]
pub struct OledDisplay<I2C> {
    driver: Ssd1306<I2C>,
    frame: FrameBuffer,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, config: DriverConfig) -> Self {
        Self {
            driver: Ssd1306::new(i2c, config),
            frame: FrameBuffer::new(),
        }
    }

    /// Runs the panel power-up sequence.
    pub fn initialize(&mut self) -> OledDisplayResult<I2C::Error> {
        let config = self.driver.config();
        self.driver.init().map_err(DisplayError::from)?;
        info!(
            "oled initialized: addr=0x{:02X} bus_hz={} contrast=0x{:02X}",
            config.address, config.bus_hz, config.contrast
        );
        Ok(())
    }

    /// Blanks both the local buffer and the panel.
    pub fn clear_all(&mut self) -> OledDisplayResult<I2C::Error> {
        self.frame.clear(false);
        self.driver
            .flush_full(&self.frame)
            .map_err(DisplayError::from)
    }

    /// Switches the panel off, e.g. before parking after a bring-up failure.
    pub fn disable_output(&mut self) -> OledDisplayResult<I2C::Error> {
        self.driver
            .set_display_on(false)
            .map_err(DisplayError::from)
    }

}

impl<I2C> DisplaySink for OledDisplay<I2C>
where
    I2C: I2c,
{
    type Error = DisplayError<I2C::Error>;

    fn clear(&mut self) {
        self.frame.clear(false);
    }

    fn fill_rect(&mut self, rect: Rect) {
        draw(&mut self.frame, rect, true);
    }

    fn outline_rect(&mut self, rect: Rect) {
        draw(&mut self.frame, rect, false);
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.driver
            .flush_full(&self.frame)
            .map_err(DisplayError::from)
    }
}

fn draw(frame: &mut FrameBuffer, rect: Rect, fill: bool) {
    frame.draw_rect(
        rect.x as usize,
        rect.y as usize,
        rect.w as usize,
        rect.h as usize,
        true,
        fill,
    );
}
