//! Face palette in Rgb565.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

pub const BLACK: Rgb565 = Rgb565::BLACK;

pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Time band background, low-battery ring and disconnected marker.
pub const RED: Rgb565 = Rgb565::RED;

/// Battery ring fill.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Outline of the battery and device rings.
/// RGB565: (0, 21, 0), a third of full green.
pub const DARK_GREEN: Rgb565 = Rgb565::new(0, 21, 0);

/// Device ring fill.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Connected marker.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Face background.
pub const BACKGROUND: Rgb565 = BLACK;
