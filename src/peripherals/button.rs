//! Button control module for PineTime

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::gpio::{Input, Output};
use embassy_time::{Duration, Timer};

/// Side button, sampled and debounced by polling.
pub struct Button<'a> {
    /// Pin P0.13: button detection (high = pressed)
    pin_button: Input<'a>,
    /// Pin P0.15: button enable
    pin_enable: Output<'a>,
    /// Debouncer for button
    debouncer: Debouncer<u8, Repeat2>,
}

impl<'a> Button<'a> {
    /// Configure button on boot
    pub fn init(pin_button: Input<'a>, pin_enable: Output<'a>) -> Self {
        Self {
            pin_button,
            pin_enable,
            debouncer: debounce_2(false),
        }
    }

    /// Sample the button once. Returns `true` on a debounced press.
    pub async fn pressed(&mut self) -> bool {
        // Enable button
        self.pin_enable.set_high();
        // The button needs a short time to give stable outputs
        Timer::after(Duration::from_micros(1)).await;

        let edge = self.debouncer.update(self.pin_button.is_high());

        // Button consumes around 34µA when P0.15 is left high.
        // To reduce current consumption, set it low most of the time.
        self.pin_enable.set_low();

        edge == Some(Edge::Rising)
    }
}
