//! Compile-time configuration

use crate::ui::Variant;

/// Offset of local time from UTC in seconds.
pub const TIMEZONE: i32 = 3_600;

/// LCD width in pixels (ST7789, 240x240)
pub const LCD_WIDTH: u16 = 240;

/// LCD height in pixels
pub const LCD_HEIGHT: u16 = 240;

/// Clock tick period in milliseconds.
pub const TICK_MS: u64 = 1_000;

/// Battery poll period in milliseconds.
pub const BATTERY_POLL_MS: u64 = 1_000;

/// Bluetooth device name
pub const DEVICE_NAME: &str = "Ringface";

/// Watchface variant built into the firmware.
pub const VARIANT: Variant = if cfg!(feature = "face-quiet-dated") {
    Variant::QuietDated
} else if cfg!(feature = "face-quiet") {
    Variant::Quiet
} else if cfg!(feature = "face-dated") {
    Variant::Dated
} else {
    Variant::Classic
};

/// Top-left corner of the face on the LCD, centring it.
pub const FACE_OFFSET: (i32, i32) = (
    (LCD_WIDTH as i32 - crate::ui::FACE_WIDTH as i32) / 2,
    (LCD_HEIGHT as i32 - crate::ui::FACE_HEIGHT as i32) / 2,
);

const _: () = assert!(crate::ui::FACE_WIDTH <= LCD_WIDTH as u32);
const _: () = assert!(crate::ui::FACE_HEIGHT <= LCD_HEIGHT as u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_centred() {
        assert_eq!(FACE_OFFSET, (48, 36));
    }

    #[test]
    fn test_default_variant() {
        if !cfg!(any(
            feature = "face-dated",
            feature = "face-quiet",
            feature = "face-quiet-dated"
        )) {
            assert_eq!(VARIANT, Variant::Classic);
        }
    }
}
