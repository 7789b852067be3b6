//! Wall-clock helpers: label formats, BLE Current Time Service payloads and
//! the uptime-based clock reference.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::text::BoundedText;

/// Length of a Current Time Service (0x2A2B) characteristic value.
pub const CTS_LEN: usize = 10;

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Payload has the wrong length
    InvalidPayload,
    /// Fields don't form a valid calendar date/time
    InvalidDate,
}

/// How the date label is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateStyle {
    /// `05.01.2024`
    Numeric,
    /// `Jan 05`
    MonthDay,
}

/// How the weekday label is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayStyle {
    /// `Fri`
    Short,
    /// `Friday`
    Long,
}

/// Write `HH:MM:SS`.
pub fn format_time<T: Timelike, const N: usize>(time: &T, out: &mut BoundedText<N>) {
    out.set_fmt(format_args!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    ));
}

pub fn format_date<D: Datelike, const N: usize>(
    date: &D,
    style: DateStyle,
    out: &mut BoundedText<N>,
) {
    match style {
        DateStyle::Numeric => out.set_fmt(format_args!(
            "{:02}.{:02}.{:04}",
            date.day(),
            date.month(),
            date.year()
        )),
        DateStyle::MonthDay => out.set_fmt(format_args!(
            "{} {:02}",
            month_abbrev(date.month0()),
            date.day()
        )),
    }
}

pub fn format_day<D: Datelike, const N: usize>(
    date: &D,
    style: DayStyle,
    out: &mut BoundedText<N>,
) {
    out.set(match style {
        DayStyle::Short => weekday_abbrev(date.weekday()),
        DayStyle::Long => weekday_name(date.weekday()),
    });
}

fn month_abbrev(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        _ => "Dec",
    }
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Decode a Current Time Service value.
///
/// Layout: year (u16 LE), month, day, hours, minutes, seconds, day of week,
/// fractions of 1/256 s, adjust reason. Day of week and adjust reason are
/// ignored; the date fields are authoritative.
pub fn from_cts_bytes(bytes: &[u8]) -> Result<NaiveDateTime, Error> {
    let bytes: &[u8; CTS_LEN] = bytes.try_into().map_err(|_| Error::InvalidPayload)?;

    let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
    let month = bytes[2] as u32;
    let day = bytes[3] as u32;
    let hour = bytes[4] as u32;
    let min = bytes[5] as u32;
    let sec = bytes[6] as u32;
    // Convert fractions_256 to milliseconds
    let milli = bytes[8] as u32 * 1000 / 256;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_milli_opt(hour, min, sec, milli))
        .ok_or(Error::InvalidDate)
}

/// Encode local time as a Current Time Service value.
pub fn to_cts_bytes(time: &NaiveDateTime) -> [u8; CTS_LEN] {
    let year = (time.year() as u16).to_le_bytes();
    let fractions = (time.nanosecond() / 1_000_000 * 256 / 1000) as u8;
    [
        year[0],
        year[1],
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
        time.weekday().number_from_monday() as u8,
        fractions,
        0,
    ]
}

/// Pairs a known wall-clock time with the uptime at which it was taken.
///
/// The default is 1970-01-01 00:00:00 at boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Uptime when `time` was valid, in microseconds
    uptime_us: u64,
}

impl TimeReference {
    pub fn new(time: NaiveDateTime, uptime_us: u64) -> Self {
        Self { time, uptime_us }
    }

    /// Reference from a UTC epoch shifted into local time.
    pub fn from_epoch(
        epoch_secs: i64,
        utc_offset_secs: i32,
        uptime_us: u64,
    ) -> Result<Self, Error> {
        let time = DateTime::from_timestamp(epoch_secs + utc_offset_secs as i64, 0)
            .ok_or(Error::InvalidDate)?
            .naive_utc();
        Ok(Self::new(time, uptime_us))
    }

    /// Wall-clock time at `uptime_us`.
    pub fn at(&self, uptime_us: u64) -> NaiveDateTime {
        let elapsed = uptime_us.saturating_sub(self.uptime_us);
        self.time + chrono::Duration::microseconds(elapsed as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(13, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_time_format() {
        let mut text = BoundedText::<8>::new();
        format_time(&friday(), &mut text);
        assert_eq!(text.as_str(), "13:07:09");
    }

    #[test]
    fn test_date_styles() {
        let mut text = BoundedText::<16>::new();
        format_date(&friday(), DateStyle::Numeric, &mut text);
        assert_eq!(text.as_str(), "05.01.2024");
        format_date(&friday(), DateStyle::MonthDay, &mut text);
        assert_eq!(text.as_str(), "Jan 05");
    }

    #[test]
    fn test_day_styles() {
        let mut text = BoundedText::<10>::new();
        format_day(&friday(), DayStyle::Short, &mut text);
        assert_eq!(text.as_str(), "Fri");
        format_day(&friday(), DayStyle::Long, &mut text);
        assert_eq!(text.as_str(), "Friday");
    }

    #[test]
    fn test_longest_day_fits() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut text = BoundedText::<10>::new();
        format_day(&date, DayStyle::Long, &mut text);
        assert_eq!(text.as_str(), "Wednesday");
    }

    #[test]
    fn test_cts_decode() {
        // 2024-01-05 13:07:09, Friday, 128/256 s
        let bytes = [0xE8, 0x07, 1, 5, 13, 7, 9, 5, 128, 0];
        let time = from_cts_bytes(&bytes).unwrap();
        assert_eq!(time, friday() + chrono::Duration::milliseconds(500));
    }

    #[test]
    fn test_cts_rejects_short_payload() {
        assert_eq!(from_cts_bytes(&[0xE8, 0x07, 1]), Err(Error::InvalidPayload));
    }

    #[test]
    fn test_cts_rejects_bad_date() {
        let bytes = [0xE8, 0x07, 2, 30, 13, 7, 9, 5, 0, 0];
        assert_eq!(from_cts_bytes(&bytes), Err(Error::InvalidDate));
    }

    #[test]
    fn test_cts_encode_layout() {
        assert_eq!(to_cts_bytes(&friday()), [0xE8, 0x07, 1, 5, 13, 7, 9, 5, 0, 0]);
    }

    #[test]
    fn test_cts_encodes_running_clock() {
        let reference = TimeReference::new(friday(), 0);
        let bytes = to_cts_bytes(&reference.at(1_500_000));
        // 13:07:10 and half a second
        assert_eq!(bytes[6], 10);
        assert_eq!(bytes[8], 128);
    }

    #[test]
    fn test_cts_encode_matches_decode() {
        let bytes = to_cts_bytes(&friday());
        assert_eq!(bytes[7], 5);
        assert_eq!(from_cts_bytes(&bytes).unwrap(), friday());
    }

    #[test]
    fn test_default_reference_is_epoch() {
        let reference = TimeReference::default();
        assert_eq!(reference.at(0).to_string(), "1970-01-01 00:00:00");
        assert_eq!(reference.at(61_000_000).time().to_string(), "00:01:01");
    }

    #[test]
    fn test_reference_advances_with_uptime() {
        let reference = TimeReference::new(friday(), 2_000_000);
        let later = reference.at(2_000_000 + 51_000_000);
        assert_eq!(later.time().to_string(), "13:08:00");
    }

    #[test]
    fn test_reference_from_epoch_applies_offset() {
        // 2024-01-05T12:07:09Z
        let reference = TimeReference::from_epoch(1_704_456_429, 3_600, 0).unwrap();
        assert_eq!(reference.at(0), friday());
    }
}
