//! Display state and the notifications that mutate it

use chrono::NaiveDateTime;

use crate::{
    clock,
    haptics::{Haptics, Pulse},
    text::BoundedText,
    ui::Variant,
};

/// Battery level that triggers the low-battery alert.
///
/// Compared with `==`, so only a reading of exactly this value alerts.
pub const LOW_BATTERY_PERCENT: u8 = 10;

pub type TimeText = BoundedText<8>;
pub type DateText = BoundedText<16>;
pub type DayText = BoundedText<10>;
pub type BatteryText = BoundedText<14>;

/// Battery reading as delivered by the battery service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Charge in percent (0–100)
    pub percent: u8,
    /// Charger connected
    pub charging: bool,
}

/// Everything the face shows.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    variant: Variant,
    pub time_text: TimeText,
    pub date_text: DateText,
    pub day_text: DayText,
    pub battery_text: BatteryText,
    battery_percent: u8,
    pub is_charging: bool,
    pub bluetooth_connected: bool,
    pub quiet_mode_active: bool,
    /// Off during startup so the first connectivity read stays silent
    vibration_armed: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl DisplayState {
    /// Placeholder state shown before the first readings arrive.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            time_text: TimeText::from_str_truncated("00:00:00"),
            date_text: DateText::new(),
            day_text: DayText::new(),
            battery_text: BatteryText::from_str_truncated("100% charged"),
            battery_percent: 100,
            is_charging: false,
            bluetooth_connected: false,
            quiet_mode_active: false,
            vibration_armed: false,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Battery charge, always within 0–100.
    pub fn battery_percent(&self) -> u8 {
        self.battery_percent
    }

    pub fn vibration_armed(&self) -> bool {
        self.vibration_armed
    }

    /// Allow connectivity changes to vibrate.
    pub fn arm_vibration(&mut self) {
        self.vibration_armed = true;
    }

    pub fn disarm_vibration(&mut self) {
        self.vibration_armed = false;
    }

    /// Clock tick: refresh the time label and, where the variant shows them,
    /// the date and weekday labels.
    pub fn on_tick(&mut self, now: &NaiveDateTime) {
        clock::format_time(now, &mut self.time_text);
        if let Some(style) = self.variant.date_style() {
            clock::format_date(now, style, &mut self.date_text);
        }
        if let Some(style) = self.variant.day_style() {
            clock::format_day(now, style, &mut self.day_text);
        }
    }

    /// Battery change. Requests a pulse when unplugged at exactly
    /// [`LOW_BATTERY_PERCENT`], whether or not vibration is armed.
    pub fn on_battery_change(&mut self, info: BatteryInfo, haptics: &mut impl Haptics) {
        self.battery_percent = info.percent.min(100);
        self.is_charging = info.charging;

        if self.battery_percent == LOW_BATTERY_PERCENT && !self.is_charging {
            haptics.pulse(Pulse::Double);
        }

        if self.is_charging {
            self.battery_text.set("charging");
        } else {
            self.battery_text
                .set_fmt(format_args!("{}% remaining", self.battery_percent));
        }
    }

    /// Phone connection change. Requests a pulse once vibration is armed.
    pub fn on_connectivity_change(&mut self, connected: bool, haptics: &mut impl Haptics) {
        self.bluetooth_connected = connected;

        if self.vibration_armed {
            haptics.pulse(Pulse::Double);
        }
    }

    pub fn on_quiet_mode_change(&mut self, active: bool) {
        self.quiet_mode_active = active;
    }

    /// Label for the connection band.
    pub fn connection_text(&self) -> &'static str {
        if self.bluetooth_connected {
            "connected"
        } else {
            "disconnected"
        }
    }

    /// Whether the battery ring should use the alert colour.
    pub fn battery_alert(&self) -> bool {
        self.battery_percent == LOW_BATTERY_PERCENT
    }
}

/// Readings taken synchronously when the face is brought up.
#[derive(Clone, Copy, Debug)]
pub struct Startup {
    pub now: NaiveDateTime,
    pub battery: BatteryInfo,
    pub connected: bool,
    pub quiet_mode: bool,
}

/// Fill a fresh state from the startup readings, then arm vibration.
pub fn populate(state: &mut DisplayState, startup: &Startup, haptics: &mut impl Haptics) {
    state.disarm_vibration();
    state.on_tick(&startup.now);
    state.on_connectivity_change(startup.connected, haptics);
    state.on_battery_change(startup.battery, haptics);
    state.on_quiet_mode_change(startup.quiet_mode);
    state.arm_vibration();
}
