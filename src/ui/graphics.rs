//! embedded-graphics adapter for the [`Screen`] trait.
//!
//! Renders the pendant's text calls through any `DrawTarget<Color = Rgb565>`
//! using the profont family. Draw errors are swallowed; the panel driver
//! reports transport problems on its own channel.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use profont::{PROFONT_9_POINT, PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use super::colors::BLACK;
use super::screen::{Align, FontSize, Screen};

/// Backlight control, kept separate from the draw target because on real
/// hardware it is a PWM pin, not part of the panel data path.
pub trait Backlight {
    fn set_level(&mut self, level: u8);
}

/// Backlight stub for targets without brightness control.
pub struct NullBacklight;

impl Backlight for NullBacklight {
    fn set_level(&mut self, _level: u8) {}
}

/// [`Screen`] implementation over an embedded-graphics draw target.
pub struct GraphicsScreen<D, B> {
    target: D,
    backlight: B,
}

impl<D, B> GraphicsScreen<D, B>
where
    D: DrawTarget<Color = Rgb565>,
    B: Backlight,
{
    pub fn new(target: D, backlight: B) -> Self {
        Self { target, backlight }
    }

    const fn font(size: FontSize) -> &'static MonoFont<'static> {
        match size {
            FontSize::Tiny => &PROFONT_9_POINT,
            FontSize::Small => &PROFONT_12_POINT,
            FontSize::Medium => &PROFONT_18_POINT,
            FontSize::Large => &PROFONT_24_POINT,
        }
    }
}

impl<D, B> Screen for GraphicsScreen<D, B>
where
    D: DrawTarget<Color = Rgb565>,
    B: Backlight,
{
    fn clear(&mut self) {
        let _ = self.target.clear(BLACK);
    }

    fn text(&mut self, s: &str, x: i32, y: i32, color: Rgb565, size: FontSize, align: Align) {
        let character_style = MonoTextStyle::new(Self::font(size), color);
        let (alignment, baseline) = match align {
            Align::TopLeft => (Alignment::Left, Baseline::Top),
            Align::BottomLeft => (Alignment::Left, Baseline::Bottom),
            Align::BottomRight => (Alignment::Right, Baseline::Bottom),
            Align::Centered => (Alignment::Center, Baseline::Middle),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();
        let _ = Text::with_text_style(s, Point::new(x, y), character_style, text_style)
            .draw(&mut self.target);
    }

    fn refresh(&mut self) {
        // Draw-through targets need no flush; buffered panels flush in their
        // driver after the tick.
    }

    fn set_brightness(&mut self, level: u8) {
        self.backlight.set_level(level);
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_graphics::Pixel;
    use embedded_graphics::geometry::{OriginDimensions, Size};

    use super::*;

    /// Draw target that only counts touched pixels.
    struct CountingTarget {
        pixels: usize,
    }

    impl OriginDimensions for CountingTarget {
        fn size(&self) -> Size {
            Size::new(240, 240)
        }
    }

    impl DrawTarget for CountingTarget {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels += pixels.into_iter().count();
            Ok(())
        }
    }

    struct CountingBacklight {
        last: Option<u8>,
    }

    impl Backlight for CountingBacklight {
        fn set_level(&mut self, level: u8) {
            self.last = Some(level);
        }
    }

    fn screen() -> GraphicsScreen<CountingTarget, CountingBacklight> {
        GraphicsScreen::new(
            CountingTarget { pixels: 0 },
            CountingBacklight { last: None },
        )
    }

    #[test]
    fn text_draws_pixels() {
        let mut s = screen();
        s.text("Hi", 10, 30, super::super::colors::WHITE, FontSize::Small, Align::TopLeft);
        assert!(s.target.pixels > 0);
    }

    #[test]
    fn clear_fills_the_panel() {
        let mut s = screen();
        s.clear();
        assert_eq!(s.target.pixels, 240 * 240);
    }

    #[test]
    fn brightness_reaches_the_backlight() {
        let mut s = screen();
        s.set_brightness(32);
        assert_eq!(s.backlight.last, Some(32));
    }
}
