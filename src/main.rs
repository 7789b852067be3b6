#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    battery::BatteryStatus,
    button::Button,
    display::{BacklightPins, Display},
    vibration::VibrationMotor,
};
use ringface::{
    clock::CTS_LEN,
    config::{BATTERY_POLL_MS, TICK_MS, TIMEZONE, VARIANT},
    dispatch, populate, BatteryInfo, Event, HapticQueue, Pulse, Redraw, Startup, WatchFace,
};
use system::{
    bluetooth::{self, Server},
    config as system_config,
    time::TimeManager,
};

// Include build time as UTC epoch
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Event, 8> = Channel::new();
static PULSES: Channel<ThreadModeRawMutex, Pulse, 4> = Channel::new();
static BATTERY_LEVEL: Signal<ThreadModeRawMutex, u8> = Signal::new();
static CTS_WRITE: Signal<ThreadModeRawMutex, [u8; CTS_LEN]> = Signal::new();

static SERVER: StaticCell<Server> = StaticCell::new();

/// Play queued vibration patterns
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut motor: VibrationMotor<'static>) {
    loop {
        let pulse = PULSES.receive().await;
        defmt::debug!("Vibrating: {}", pulse);
        motor.play(pulse).await;
    }
}

/// Poll the battery and report changes.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: BatteryStatus<'static>) {
    let mut tick = Ticker::every(Duration::from_millis(BATTERY_POLL_MS));
    loop {
        match battery.update().await {
            Ok(Some(info)) => {
                defmt::info!(
                    "Battery status: {}% ({})",
                    info.percent,
                    if info.charging {
                        "charging"
                    } else {
                        "discharging"
                    }
                );
                BATTERY_LEVEL.signal(info.percent);
                EVENTS.send(Event::Battery(info)).await;
            }
            Ok(None) => {}
            Err(e) => defmt::warn!("Battery read failed: {}", e),
        }

        tick.next().await;
    }
}

/// Keep the BLE battery characteristic current.
#[embassy_executor::task(pool_size = 1)]
async fn publish_battery(server: &'static Server) {
    loop {
        let percent = BATTERY_LEVEL.wait().await;
        bluetooth::publish_battery(server, percent);
    }
}

/// Emit a clock tick every second, applying time syncs from the phone.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(mut clock: TimeManager, server: &'static Server) {
    let mut tick = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        if let Some(bytes) = CTS_WRITE.try_take() {
            match clock.set_from_cts(&bytes) {
                Ok(()) => defmt::info!("Time set from phone"),
                Err(e) => defmt::warn!("Rejected time update: {}", e),
            }
            // Overwrite the raw write with the time we actually keep
            bluetooth::publish_time(server, &clock.cts_bytes());
        }

        EVENTS.send(Event::Tick(clock.now())).await;

        tick.next().await;
    }
}

/// Toggle quiet mode on each button press. Polls every 10ms.
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button<'static>) {
    let mut quiet = false;
    loop {
        if button.pressed().await {
            quiet = !quiet;
            defmt::info!("Quiet mode {}", if quiet { "on" } else { "off" });
            EVENTS.send(Event::QuietMode(quiet)).await;
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Own the display state: apply events, then repaint once per burst.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<'static, SPI2>, startup: Startup) {
    let face = WatchFace::new(VARIANT);
    let mut state = face.initial_state();
    let mut haptics = HapticQueue::new();

    populate(&mut state, &startup, &mut haptics);
    let mut redraw = Redraw::ALL;

    loop {
        if redraw.any() {
            if let Err(e) = display.update(&face, &state) {
                defmt::warn!("Display update failed: {}", e);
            }
        }

        for pulse in haptics.drain() {
            if PULSES.try_send(pulse).is_err() {
                defmt::debug!("Vibration busy, dropping {}", pulse);
            }
        }

        // Coalesce everything already queued into one repaint
        redraw = dispatch(&mut state, EVENTS.receive().await, &mut haptics);
        while let Ok(event) = EVENTS.try_receive() {
            redraw |= dispatch(&mut state, event, &mut haptics);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(system_config::nrf_config());
    system_config::set_driver_priorities();
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Battery
    let battery = unwrap!(BatteryStatus::init(Input::new(p.P0_12, Pull::None), saadc).await);
    let battery_info: BatteryInfo = battery.info();

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize vibration motor
    let vibration = VibrationMotor::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::High, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        BacklightPins {
            low: Output::new(p.P0_14, Level::High, OutputDrive::Standard),
            mid: Output::new(p.P0_22, Level::High, OutputDrive::Standard),
            high: Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        },
    ));

    // Initialize clock
    let clock = TimeManager::init(UTC_EPOCH, TIMEZONE);
    let startup = Startup {
        now: clock.now(),
        battery: battery_info,
        connected: false,
        quiet_mode: false,
    };

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server = SERVER.init(unwrap!(Server::new(sd)));
    bluetooth::publish_battery(server, battery_info.percent);
    bluetooth::publish_time(server, &clock.cts_bytes());

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(bluetooth::softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth::peripheral_task(sd, server)));
    unwrap!(spawner.spawn(publish_battery(server)));
    unwrap!(spawner.spawn(update_lcd(display, startup)));
    unwrap!(spawner.spawn(notify(vibration)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(update_time(clock, server)));
    unwrap!(spawner.spawn(poll_button(button)));
}
