//! Frame composition and the display sink contract.

use heapless::Vec;

use crate::{mapping::scale_to_extent, state::BorderStyle};

/// Logical display width in pixels.
pub const DISPLAY_WIDTH: u16 = 128;
/// Logical display height in pixels.
pub const DISPLAY_HEIGHT: u16 = 64;
/// Side of the filled cursor square.
pub const CURSOR_SIZE: u16 = 8;
/// Offset of the inner rectangle of a double border.
pub const BORDER_INSET: u16 = 2;

/// Largest cursor x that keeps the square on screen.
pub const CURSOR_X_EXTENT: u16 = DISPLAY_WIDTH - CURSOR_SIZE;
/// Largest cursor y that keeps the square on screen.
pub const CURSOR_Y_EXTENT: u16 = DISPLAY_HEIGHT - CURSOR_SIZE;

const MAX_BORDER_RECTS: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle inset by `margin` on every side.
    pub const fn inset(self, margin: u16) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            w: self.w.saturating_sub(2 * margin),
            h: self.h.saturating_sub(2 * margin),
        }
    }
}

/// Whole-screen rectangle.
pub const SCREEN: Rect = Rect::new(0, 0, DISPLAY_WIDTH, DISPLAY_HEIGHT);

/// One redraw worth of geometry, rebuilt every loop iteration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderFrame {
    cursor: Rect,
    border: Vec<Rect, MAX_BORDER_RECTS>,
}

impl RenderFrame {
    /// Places the cursor from a raw x sample and an already inverted y sample.
    pub fn compose(x_raw: u16, y_corrected: u16, style: BorderStyle) -> Self {
        let cursor = Rect::new(
            scale_to_extent(x_raw, CURSOR_X_EXTENT),
            scale_to_extent(y_corrected, CURSOR_Y_EXTENT),
            CURSOR_SIZE,
            CURSOR_SIZE,
        );

        Self {
            cursor,
            border: border_rects(style),
        }
    }

    pub fn cursor(&self) -> Rect {
        self.cursor
    }

    /// Outlines to draw, outermost first.
    pub fn border(&self) -> &[Rect] {
        &self.border
    }
}

/// Outline rectangles for a border style.
pub fn border_rects(style: BorderStyle) -> Vec<Rect, MAX_BORDER_RECTS> {
    let mut rects = Vec::new();
    match style {
        BorderStyle::None => {}
        BorderStyle::Single => {
            let _ = rects.push(SCREEN);
        }
        BorderStyle::Double => {
            let _ = rects.push(SCREEN);
            let _ = rects.push(SCREEN.inset(BORDER_INSET));
        }
    }
    rects
}

/// Monochrome frame-buffered display.
///
/// Drawing only touches the local buffer; [`DisplaySink::flush`] is the single
/// point that talks to the panel.
pub trait DisplaySink {
    type Error;

    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect);
    fn outline_rect(&mut self, rect: Rect);
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Clears, draws `frame` and flushes it.
pub fn draw_frame<D>(frame: &RenderFrame, display: &mut D) -> Result<(), D::Error>
where
    D: DisplaySink,
{
    display.clear();
    display.fill_rect(frame.cursor());
    for rect in frame.border() {
        display.outline_rect(*rect);
    }
    display.flush()
}
