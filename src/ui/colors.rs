//! Color constants for the pendant UI.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! The format is native to the GC9A01 panel, so no conversion happens when
//! writing to the display buffer.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black. Background color.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Primary text on dark background.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Warnings: brownout, OTA errors, alarm state.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Values and the Run state.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Hold state.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Light gray for secondary text (labels, info lines).
/// RGB565: (21, 42, 21) - roughly 66% brightness.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Dark gray for separators. Subtle enough to not distract.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Orange for the Jog state and mild warnings.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);
