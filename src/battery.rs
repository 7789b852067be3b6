//! Battery gauge
//!
//! Voltage conversion based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use crate::state::BatteryInfo;

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SAADC sample outside the 12-bit range
    InvalidMeasurement,
}

/// Convert a 12-bit SAADC sample into the battery voltage in millivolts.
pub fn millivolts_from_adc(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // Keep as 32 bit for multiplication: the battery sits behind a
            // 1/2 divider and 4096 counts span 3.3 V
            let adc_val = raw_measurement as u32;
            Ok((adc_val * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate remaining capacity from the battery voltage.
///
/// Uses fixed data points with linear interpolation in between.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Tracks the last reading so callers only hear about changes.
#[derive(Debug, Default)]
pub struct BatteryGauge {
    last: Option<BatteryInfo>,
}

impl BatteryGauge {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed a raw sample and the charge indication pin state.
    ///
    /// Returns the new reading if it differs from the previous one.
    pub fn update(
        &mut self,
        raw_measurement: i16,
        charging: bool,
    ) -> Result<Option<BatteryInfo>, Error> {
        let percent = percent_from_millivolts(millivolts_from_adc(raw_measurement)?);
        let info = BatteryInfo { percent, charging };

        if self.last == Some(info) {
            return Ok(None);
        }
        self.last = Some(info);
        Ok(Some(info))
    }

    /// Most recent reading, if any.
    pub fn info(&self) -> Option<BatteryInfo> {
        self.last
    }
}
