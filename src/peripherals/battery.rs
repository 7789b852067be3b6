//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, saadc::Saadc};
use ringface::{
    battery::{BatteryGauge, Error},
    BatteryInfo,
};

pub struct BatteryStatus<'a> {
    /// Pin P0.12: High = battery, Low = charging
    pin_charge_indication: Input<'a>,
    /// SAADC sampling P0.31 (battery voltage through a 1/2 divider)
    saadc: Saadc<'a, 1>,
    /// Last reading
    gauge: BatteryGauge,
}

impl<'a> BatteryStatus<'a> {
    /// Initialize battery status and take the first reading
    pub async fn init(
        pin_charge_indication: Input<'a>,
        saadc: Saadc<'a, 1>,
    ) -> Result<Self, Error> {
        let mut battery = Self {
            pin_charge_indication,
            saadc,
            gauge: BatteryGauge::new(),
        };
        battery.update().await?;
        Ok(battery)
    }

    /// Current state of the battery.
    ///
    /// This returns the stored value. To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.gauge.info().unwrap_or(BatteryInfo {
            percent: 0,
            charging: false,
        })
    }

    /// Read the hardware. Returns the new state if it changed.
    pub async fn update(&mut self) -> Result<Option<BatteryInfo>, Error> {
        let charging = self.pin_charge_indication.is_low();

        let mut buf = [0; 1];
        self.saadc.sample(&mut buf).await;

        self.gauge.update(buf[0], charging)
    }
}
