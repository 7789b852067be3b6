//! Control the vibration motor
//!
//! Pin behaviour from https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::Output;
use embassy_time::Timer;
use ringface::Pulse;

/// Gap between the pulses of a multi-pulse pattern in ms
const PULSE_GAP_MS: u64 = 150;

/// Controller for the internal vibration motor
pub struct VibrationMotor<'a> {
    /// Pin P0.16: High = off, Low = on
    control_pin: Output<'a>,
}

impl<'a> VibrationMotor<'a> {
    /// Initialize vibration controller
    pub fn init(control_pin: Output<'a>) -> Self {
        let mut motor = Self { control_pin };
        motor.off();
        motor
    }

    /// Play a vibration pattern.
    pub async fn play(&mut self, pulse: Pulse) {
        for n in 0..pulse.count() {
            if n > 0 {
                Timer::after_millis(PULSE_GAP_MS).await;
            }
            self.on();
            Timer::after_millis(pulse.duration_ms() as u64).await;
            self.off();
        }
    }

    fn on(&mut self) {
        self.control_pin.set_low();
    }

    fn off(&mut self) {
        self.control_pin.set_high();
    }
}
