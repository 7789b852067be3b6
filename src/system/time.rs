//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::Instant;
use ringface::clock::{self, TimeReference, CTS_LEN};

/// Wall clock derived from a reference time and the uptime counter.
pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot from a UTC epoch
    pub fn init(utc_epoch: i64, utc_offset_secs: i32) -> Self {
        let reference = TimeReference::from_epoch(utc_epoch, utc_offset_secs, uptime_us())
            .unwrap_or_else(|_| {
                defmt::warn!("Invalid boot epoch {}, starting at 1970", utc_epoch);
                TimeReference::default()
            });
        Self { reference }
    }

    /// Get current time
    pub fn now(&self) -> NaiveDateTime {
        self.reference.at(uptime_us())
    }

    /// Current time as a Current Time Service value
    pub fn cts_bytes(&self) -> [u8; CTS_LEN] {
        clock::to_cts_bytes(&self.now())
    }

    /// Update time reference
    pub fn set_time(&mut self, time: NaiveDateTime) {
        self.reference = TimeReference::new(time, uptime_us());
    }

    /// Update time reference from Current Time Service data
    pub fn set_from_cts(&mut self, bytes: &[u8]) -> Result<(), clock::Error> {
        self.set_time(clock::from_cts_bytes(bytes)?);
        Ok(())
    }
}

fn uptime_us() -> u64 {
    Instant::now().as_micros()
}
