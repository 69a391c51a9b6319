//! In-memory framebuffer for SSD1306.

use core::convert::TryFrom;

use crate::protocol::{BUFFER_SIZE, HEIGHT, PAGES, WIDTH};

/// 1bpp framebuffer in GDDRAM page layout.
///
/// Byte `page * WIDTH + x` holds column `x` of rows `page*8..page*8+8`; bit 0 is
/// the top row of the page.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a new blank framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Fills every pixel with `on`.
    pub fn clear(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let Some((index, mask)) = locate(x, y) else {
            return false;
        };

        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }

        true
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let (index, mask) = locate(x, y)?;
        Some((self.bytes[index] & mask) != 0)
    }

    /// Draws a rectangle with its top-left corner at `(x, y)`.
    ///
    /// `fill = false` draws a one-pixel outline. Parts outside the panel are
    /// clipped.
    pub fn draw_rect(&mut self, x: usize, y: usize, w: usize, h: usize, on: bool, fill: bool) {
        if w == 0 || h == 0 {
            return;
        }

        let right = x + w - 1;
        let bottom = y + h - 1;

        if fill {
            for py in y..=bottom.min(HEIGHT - 1) {
                for px in x..=right.min(WIDTH - 1) {
                    let _ = self.set_pixel(px, py, on);
                }
            }
            return;
        }

        for px in x..=right {
            let _ = self.set_pixel(px, y, on);
            let _ = self.set_pixel(px, bottom, on);
        }
        for py in y..=bottom {
            let _ = self.set_pixel(x, py, on);
            let _ = self.set_pixel(right, py, on);
        }
    }

    /// Returns one page (0..8) as the 128 column bytes sent to GDDRAM.
    pub fn page(&self, page: u8) -> Option<&[u8; WIDTH]> {
        if page as usize >= PAGES {
            return None;
        }

        let start = page as usize * WIDTH;
        <&[u8; WIDTH]>::try_from(&self.bytes[start..start + WIDTH]).ok()
    }
}

#[inline]
fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
    if x >= WIDTH || y >= HEIGHT {
        return None;
    }

    Some(((y / 8) * WIDTH + x, 1u8 << (y % 8)))
}
