//! 1-bit icon assets and the icon blitter.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

/// Packed 1-bit bitmap, rows MSB first, each row padded to a whole byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: &'static [u8],
}

impl Bitmap {
    pub const fn new(width: u32, height: u32, data: &'static [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn bytes_per_row(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Whether the pixel at (`x`, `y`) is set. Out-of-range reads are unset.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte_index = y as usize * self.bytes_per_row() + x as usize / 8;
        let bit_index = 7 - (x % 8);
        self.data
            .get(byte_index)
            .is_some_and(|byte| (byte >> bit_index) & 1 == 1)
    }

    /// Draw the set pixels in `color` with the bitmap's top-left at `position`.
    /// Unset pixels are left untouched.
    pub fn draw<D>(&self, target: &mut D, position: Point, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let pixels = (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.is_set(x, y))
                .map(move |x| Pixel(position + Point::new(x as i32, y as i32), color))
        });
        target.draw_iter(pixels)
    }
}

/// The four face icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    BluetoothConnected,
    BluetoothDisconnected,
    QuietOn,
    QuietOff,
}

impl Icon {
    pub fn for_bluetooth(connected: bool) -> Self {
        if connected {
            Icon::BluetoothConnected
        } else {
            Icon::BluetoothDisconnected
        }
    }

    pub fn for_quiet_mode(active: bool) -> Self {
        if active {
            Icon::QuietOn
        } else {
            Icon::QuietOff
        }
    }
}

/// Icon bitmaps, resolved once when the face is built.
#[derive(Clone, Copy, Debug)]
pub struct IconSet {
    bluetooth_connected: Bitmap,
    bluetooth_disconnected: Bitmap,
    quiet_on: Bitmap,
    quiet_off: Bitmap,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::load()
    }
}

impl IconSet {
    pub const fn load() -> Self {
        Self {
            bluetooth_connected: BLUETOOTH_CONNECTED,
            bluetooth_disconnected: BLUETOOTH_DISCONNECTED,
            quiet_on: QUIET_ON,
            quiet_off: QUIET_OFF,
        }
    }

    pub fn get(&self, icon: Icon) -> &Bitmap {
        match icon {
            Icon::BluetoothConnected => &self.bluetooth_connected,
            Icon::BluetoothDisconnected => &self.bluetooth_disconnected,
            Icon::QuietOn => &self.quiet_on,
            Icon::QuietOff => &self.quiet_off,
        }
    }
}

// =============================================================================
// Bitmaps (16x16)
// =============================================================================

#[rustfmt::skip]
pub const BLUETOOTH_CONNECTED: Bitmap = Bitmap::new(
    16,
    16,
    &[
        0b0000_0001, 0b0000_0000,
        0b0000_0001, 0b1000_0000,
        0b0000_0001, 0b0100_0000,
        0b0001_0001, 0b0010_0000,
        0b0000_1001, 0b0001_0000,
        0b0000_0101, 0b0010_0000,
        0b0000_0011, 0b1000_0000,
        0b0000_0001, 0b0000_0000,
        0b0000_0011, 0b1000_0000,
        0b0000_0101, 0b0010_0000,
        0b0000_1001, 0b0001_0000,
        0b0001_0001, 0b0010_0000,
        0b0000_0001, 0b0100_0000,
        0b0000_0001, 0b1000_0000,
        0b0000_0001, 0b0000_0000,
        0b0000_0000, 0b0000_0000,
    ],
);

#[rustfmt::skip]
pub const BLUETOOTH_DISCONNECTED: Bitmap = Bitmap::new(
    16,
    16,
    &[
        0b1000_0001, 0b0000_0001,
        0b0100_0001, 0b1000_0010,
        0b0010_0001, 0b0100_0100,
        0b0001_0001, 0b0010_1000,
        0b0000_1001, 0b0001_0000,
        0b0000_0101, 0b0010_1000,
        0b0000_0011, 0b1000_0010,
        0b0000_0001, 0b0000_0000,
        0b0000_0011, 0b1000_0000,
        0b0000_0101, 0b0010_0000,
        0b0000_1001, 0b0001_0000,
        0b0001_0001, 0b0010_0000,
        0b0000_0001, 0b0100_0000,
        0b0000_0001, 0b1000_0000,
        0b0000_0001, 0b0000_0000,
        0b0000_0000, 0b0000_0000,
    ],
);

#[rustfmt::skip]
pub const QUIET_ON: Bitmap = Bitmap::new(
    16,
    16,
    &[
        0b0000_0000, 0b0000_0000,
        0b0000_0111, 0b1000_0000,
        0b0001_1100, 0b0000_0000,
        0b0011_1000, 0b0000_0000,
        0b0111_0000, 0b0000_0000,
        0b0111_0000, 0b0000_0000,
        0b1110_0000, 0b0000_0000,
        0b1110_0000, 0b0000_0000,
        0b1110_0000, 0b0000_0000,
        0b1110_0000, 0b0000_0000,
        0b0111_0000, 0b0000_0001,
        0b0111_1000, 0b0000_0011,
        0b0011_1111, 0b0000_1110,
        0b0001_1111, 0b1111_1000,
        0b0000_0111, 0b1110_0000,
        0b0000_0000, 0b0000_0000,
    ],
);

#[rustfmt::skip]
pub const QUIET_OFF: Bitmap = Bitmap::new(
    16,
    16,
    &[
        0b0000_0001, 0b1000_0000,
        0b0000_0011, 0b1100_0000,
        0b0000_1111, 0b1111_0000,
        0b0001_1111, 0b1111_1000,
        0b0001_1111, 0b1111_1000,
        0b0001_1111, 0b1111_1000,
        0b0001_1111, 0b1111_1000,
        0b0001_1111, 0b1111_1000,
        0b0011_1111, 0b1111_1100,
        0b0011_1111, 0b1111_1100,
        0b0111_1111, 0b1111_1110,
        0b1111_1111, 0b1111_1111,
        0b0000_0000, 0b0000_0000,
        0b0000_0011, 0b1100_0000,
        0b0000_0001, 0b1000_0000,
        0b0000_0000, 0b0000_0000,
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn test_bitmaps_are_complete() {
        for bitmap in [
            BLUETOOTH_CONNECTED,
            BLUETOOTH_DISCONNECTED,
            QUIET_ON,
            QUIET_OFF,
        ] {
            assert_eq!(bitmap.data.len(), 32);
            assert_eq!(bitmap.size(), Size::new(16, 16));
        }
    }

    #[test]
    fn test_pixel_lookup() {
        // Top of the rune spine
        assert!(BLUETOOTH_CONNECTED.is_set(7, 0));
        assert!(!BLUETOOTH_CONNECTED.is_set(0, 0));
        // Strike-through corner only on the disconnected icon
        assert!(BLUETOOTH_DISCONNECTED.is_set(0, 0));
        assert!(!BLUETOOTH_CONNECTED.is_set(16, 0));
    }

    #[test]
    fn test_draw_only_set_pixels() {
        let mut display = MockDisplay::<Rgb565>::new();
        BLUETOOTH_CONNECTED
            .draw(&mut display, Point::new(4, 4), Rgb565::BLUE)
            .unwrap();
        assert_eq!(display.get_pixel(Point::new(11, 4)), Some(Rgb565::BLUE));
        assert_eq!(display.get_pixel(Point::new(4, 4)), None);
    }

    #[test]
    fn test_icon_selection() {
        let icons = IconSet::load();
        assert_eq!(icons.get(Icon::for_bluetooth(true)), &BLUETOOTH_CONNECTED);
        assert_eq!(icons.get(Icon::for_quiet_mode(false)), &QUIET_OFF);
    }
}
