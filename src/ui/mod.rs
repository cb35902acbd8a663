//! Rendering interface and visual constants.
//!
//! - `colors`: RGB565 color constants
//! - `screen`: the text-drawing interface scenes render through
//! - `graphics`: embedded-graphics adapter implementing that interface

pub mod colors;
pub mod graphics;
pub mod screen;

pub use graphics::{Backlight, GraphicsScreen, NullBacklight};
pub use screen::{Align, FontSize, Screen};
