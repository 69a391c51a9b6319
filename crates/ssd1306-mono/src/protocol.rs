//! Wire-level protocol helpers for the SSD1306 over I2C.

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Number of 8-pixel-tall pages.
pub const PAGES: usize = HEIGHT / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// Default 7-bit bus address (SA0 pulled low).
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte prefix for a command stream (Co = 0, D/C# = 0).
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte prefix for a GDDRAM data stream (Co = 0, D/C# = 1).
pub const CONTROL_DATA: u8 = 0x40;

pub const SET_CONTRAST: u8 = 0x81;
pub const DISPLAY_RESUME_RAM: u8 = 0xA4;
pub const SET_NORMAL: u8 = 0xA6;
pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_MEMORY_MODE: u8 = 0x20;
pub const SET_COLUMN_ADDRESS: u8 = 0x21;
pub const SET_PAGE_ADDRESS: u8 = 0x22;
pub const SET_START_LINE: u8 = 0x40;
pub const SET_SEGMENT_REMAP: u8 = 0xA1;
pub const SET_MULTIPLEX: u8 = 0xA8;
pub const SET_COM_SCAN_DEC: u8 = 0xC8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_CLOCK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_VCOM_DESELECT: u8 = 0xDB;
pub const SET_CHARGE_PUMP: u8 = 0x8D;

/// Horizontal addressing: column pointer wraps into the next page.
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Number of bytes in [`init_sequence`].
pub const INIT_SEQUENCE_LEN: usize = 25;

/// Builds the power-up command sequence for a 128x64 panel with the internal
/// charge pump enabled.
///
/// The display is left switched on and showing GDDRAM contents.
pub const fn init_sequence(contrast: u8) -> [u8; INIT_SEQUENCE_LEN] {
    [
        DISPLAY_OFF,
        SET_CLOCK_DIV,
        0x80,
        SET_MULTIPLEX,
        (HEIGHT - 1) as u8,
        SET_DISPLAY_OFFSET,
        0x00,
        SET_START_LINE,
        SET_CHARGE_PUMP,
        0x14,
        SET_MEMORY_MODE,
        MEMORY_MODE_HORIZONTAL,
        SET_SEGMENT_REMAP,
        SET_COM_SCAN_DEC,
        SET_COM_PINS,
        0x12,
        SET_CONTRAST,
        contrast,
        SET_PRECHARGE,
        0xF1,
        SET_VCOM_DESELECT,
        0x40,
        DISPLAY_RESUME_RAM,
        SET_NORMAL,
        DISPLAY_ON,
    ]
}

/// Builds the address window command covering the whole panel.
#[inline]
pub const fn full_window() -> [u8; 6] {
    [
        SET_COLUMN_ADDRESS,
        0,
        (WIDTH - 1) as u8,
        SET_PAGE_ADDRESS,
        0,
        (PAGES - 1) as u8,
    ]
}
