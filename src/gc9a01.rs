//! Minimal GC9A01 panel driver for the round 240x240 dial display.
//!
//! Blocking SPI, draw-through (no framebuffer): pixels go straight to panel
//! RAM as embedded-graphics emits them. Fills use a windowed burst write so
//! `clear` stays fast.

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use esp_hal::Blocking;
use esp_hal::delay::Delay;
use esp_hal::gpio::Output;
use esp_hal::spi::master::Spi;

use dial_pendant::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

const CMD_SLEEP_OUT: u8 = 0x11;
const CMD_DISPLAY_ON: u8 = 0x29;
const CMD_COLUMN_ADDR: u8 = 0x2A;
const CMD_ROW_ADDR: u8 = 0x2B;
const CMD_MEMORY_WRITE: u8 = 0x2C;
const CMD_MADCTL: u8 = 0x36;
const CMD_PIXEL_FORMAT: u8 = 0x3A;
const CMD_INREG1_EN: u8 = 0xFE;
const CMD_INREG2_EN: u8 = 0xEF;

/// RGB565, 16 bits per pixel
const PIXEL_FORMAT_16BPP: u8 = 0x55;

pub struct Gc9a01<'d> {
    spi: Spi<'d, Blocking>,
    dc: Output<'d>,
    rst: Output<'d>,
}

impl<'d> Gc9a01<'d> {
    pub fn new(spi: Spi<'d, Blocking>, dc: Output<'d>, rst: Output<'d>, delay: &mut Delay) -> Self {
        let mut panel = Self { spi, dc, rst };
        panel.hard_reset(delay);
        panel.init_sequence(delay);
        panel
    }

    fn hard_reset(&mut self, delay: &mut Delay) {
        self.rst.set_low();
        delay.delay_millis(20);
        self.rst.set_high();
        delay.delay_millis(120);
    }

    fn init_sequence(&mut self, delay: &mut Delay) {
        self.command(CMD_INREG2_EN, &[]);
        self.command(CMD_INREG1_EN, &[]);
        // Landscape-neutral orientation, BGR panel wiring
        self.command(CMD_MADCTL, &[0x48]);
        self.command(CMD_PIXEL_FORMAT, &[PIXEL_FORMAT_16BPP]);
        self.command(CMD_SLEEP_OUT, &[]);
        delay.delay_millis(120);
        self.command(CMD_DISPLAY_ON, &[]);
        delay.delay_millis(20);
    }

    fn command(&mut self, cmd: u8, args: &[u8]) {
        self.dc.set_low();
        let _ = self.spi.write(&[cmd]);
        if !args.is_empty() {
            self.dc.set_high();
            let _ = self.spi.write(args);
        }
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        self.command(
            CMD_COLUMN_ADDR,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        );
        self.command(
            CMD_ROW_ADDR,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        );
        self.command(CMD_MEMORY_WRITE, &[]);
        self.dc.set_high();
    }

    fn push_pixel(&mut self, color: Rgb565) {
        let raw: u16 = color.into_storage();
        let _ = self.spi.write(&raw.to_be_bytes());
    }
}

impl OriginDimensions for Gc9a01<'_> {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Gc9a01<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= SCREEN_WIDTH as i32
                || point.y >= SCREEN_HEIGHT as i32
            {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y);
            self.push_pixel(color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&Rectangle::new(Point::zero(), self.size()));
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };
        self.set_window(
            clipped.top_left.x as u16,
            clipped.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        );

        let raw = color.into_storage().to_be_bytes();
        let mut burst = [0u8; 64];
        for pair in burst.chunks_exact_mut(2) {
            pair.copy_from_slice(&raw);
        }

        let mut remaining = (clipped.size.width * clipped.size.height) as usize * 2;
        while remaining > 0 {
            let n = remaining.min(burst.len());
            let _ = self.spi.write(&burst[..n]);
            remaining -= n;
        }
        Ok(())
    }
}
