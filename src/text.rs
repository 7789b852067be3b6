//! Fixed-capacity label text
//!
//! Labels live in fixed storage sized for the longest string the face shows.
//! Formatting into a full label keeps the longest prefix that fits and drops
//! the rest, matching fixed-width `strftime`/`snprintf` buffers.

use core::fmt::{self, Write};
use core::ops::Deref;

use heapless::String;

/// Truncating text buffer holding at most `N` bytes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BoundedText<const N: usize> {
    buf: String<N>,
}

impl<const N: usize> BoundedText<N> {
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Create a label holding `text`, truncated to capacity.
    pub fn from_str_truncated(text: &str) -> Self {
        let mut label = Self::new();
        label.push_truncated(text);
        label
    }

    /// Replace the contents with formatted text.
    pub fn set_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.buf.clear();
        // `write_str` below never fails, so neither does formatting
        let _ = self.write_fmt(args);
    }

    /// Replace the contents with `text`.
    pub fn set(&mut self, text: &str) {
        self.buf.clear();
        self.push_truncated(text);
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    fn push_truncated(&mut self, text: &str) {
        for c in text.chars() {
            // Stop at the first char that doesn't fit so a multi-byte char
            // is never split
            if self.buf.push(c).is_err() {
                break;
            }
        }
    }
}

impl<const N: usize> Write for BoundedText<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_truncated(s);
        Ok(())
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for BoundedText<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_exactly() {
        let mut text = BoundedText::<8>::new();
        text.set_fmt(format_args!("{:02}:{:02}:{:02}", 13, 7, 9));
        assert_eq!(text.as_str(), "13:07:09");
    }

    #[test]
    fn test_overflow_keeps_prefix() {
        let mut text = BoundedText::<5>::new();
        text.set_fmt(format_args!("{}% remaining", 100));
        assert_eq!(text.as_str(), "100% ");
    }

    #[test]
    fn test_set_replaces_previous_contents() {
        let mut text = BoundedText::<14>::from_str_truncated("100% remaining");
        text.set("charging");
        assert_eq!(&*text, "charging");
    }

    #[test]
    fn test_multibyte_char_not_split() {
        // "ü" is two bytes and would straddle the capacity
        let text = BoundedText::<3>::from_str_truncated("abü");
        assert_eq!(text.as_str(), "ab");
    }

    #[test]
    fn test_capacity_reported() {
        assert_eq!(BoundedText::<16>::new().capacity(), 16);
    }
}
