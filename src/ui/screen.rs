//! The text-drawing interface scenes render through.
//!
//! Scenes emit a sequence of positioned text calls; whatever sits behind the
//! trait (real panel, host simulator, test recorder) consumes them in
//! emission order. Redraw is pull-based: a scene calls these itself whenever
//! its displayed state changes, nothing forces a cadence on it.

use embedded_graphics::pixelcolor::Rgb565;

use crate::config::CENTER_X;

/// Logical font sizes. The adapter maps them to concrete fonts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Tiny,
    Small,
    Medium,
    Large,
}

/// Anchor point of a text draw relative to its (x, y) position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    BottomLeft,
    BottomRight,
    Centered,
}

/// Display output as the scenes see it.
pub trait Screen {
    /// Fill the panel with the background color.
    fn clear(&mut self);

    /// Draw one run of text anchored at (x, y).
    fn text(&mut self, s: &str, x: i32, y: i32, color: Rgb565, size: FontSize, align: Align);

    /// Draw text horizontally centered on the panel.
    fn centered_text(&mut self, s: &str, y: i32, color: Rgb565, size: FontSize) {
        self.text(s, CENTER_X, y, color, size, Align::Centered);
    }

    /// Push any buffered drawing to the panel.
    fn refresh(&mut self);

    /// Set the backlight level.
    fn set_brightness(&mut self, level: u8);
}
