//! Chip configuration: clocks, regulator and interrupt levels

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::{self, InterruptExt, Priority},
};

/// Level for every interrupt we own. The SoftDevice reserves 0, 1 and 4.
const APP_PRIORITY: Priority = Priority::P2;
/// Level for the peripheral drivers bound in `main`
const DRIVER_PRIORITY: Priority = Priority::P3;

/// nRF configuration for the watch, passed to `embassy_nrf::init`.
pub fn nrf_config() -> Config {
    // `Config` is `non_exhaustive`, so start from the default
    let mut config = Config::default();

    // Both crystals are fitted on the PineTime
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // DC/DC cuts runtime current considerably
    config.dcdc.reg1 = true;

    config.gpiote_interrupt_priority = APP_PRIORITY;
    config.time_interrupt_priority = APP_PRIORITY;

    config.debug = Debug::Allowed;

    config
}

/// Move the SAADC and SPIM interrupts off the SoftDevice levels.
pub fn set_driver_priorities() {
    interrupt::SAADC.set_priority(DRIVER_PRIORITY);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(DRIVER_PRIORITY);
}
