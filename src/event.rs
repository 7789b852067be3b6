//! Platform notifications and their dispatch onto the display state

use core::ops::{BitOr, BitOrAssign};

use chrono::NaiveDateTime;

use crate::{
    haptics::Haptics,
    state::{BatteryInfo, DisplayState},
};

/// A notification from one of the watch services.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Clock tick with the current local time
    Tick(NaiveDateTime),
    /// Battery level or charger state changed
    Battery(BatteryInfo),
    /// Phone connected (`true`) or disconnected
    Connectivity(bool),
    /// Quiet mode switched on or off
    QuietMode(bool),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Event {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Event::Tick(_) => defmt::write!(f, "Tick"),
            Event::Battery(info) => defmt::write!(f, "Battery({})", info),
            Event::Connectivity(connected) => defmt::write!(f, "Connectivity({})", connected),
            Event::QuietMode(active) => defmt::write!(f, "QuietMode({})", active),
        }
    }
}

/// Which parts of the face need repainting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Redraw {
    /// Rings and indicators
    pub canvas: bool,
    /// Text bands
    pub labels: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        canvas: false,
        labels: false,
    };
    pub const ALL: Redraw = Redraw {
        canvas: true,
        labels: true,
    };

    pub fn any(self) -> bool {
        self.canvas || self.labels
    }
}

impl BitOr for Redraw {
    type Output = Redraw;

    fn bitor(self, rhs: Redraw) -> Redraw {
        Redraw {
            canvas: self.canvas || rhs.canvas,
            labels: self.labels || rhs.labels,
        }
    }
}

impl BitOrAssign for Redraw {
    fn bitor_assign(&mut self, rhs: Redraw) {
        *self = *self | rhs;
    }
}

/// Apply `event` to `state` and report what needs repainting.
pub fn dispatch(state: &mut DisplayState, event: Event, haptics: &mut impl Haptics) -> Redraw {
    match event {
        Event::Tick(now) => {
            state.on_tick(&now);
            Redraw {
                canvas: false,
                labels: true,
            }
        }
        Event::Battery(info) => {
            state.on_battery_change(info, haptics);
            Redraw::ALL
        }
        Event::Connectivity(connected) => {
            state.on_connectivity_change(connected, haptics);
            Redraw::ALL
        }
        Event::QuietMode(active) => {
            state.on_quiet_mode_change(active);
            Redraw {
                canvas: true,
                labels: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::HapticQueue;
    use chrono::NaiveDate;

    #[test]
    fn test_tick_only_dirties_labels() {
        let mut state = DisplayState::default();
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let redraw = dispatch(&mut state, Event::Tick(now), &mut HapticQueue::new());
        assert_eq!(
            redraw,
            Redraw {
                canvas: false,
                labels: true
            }
        );
        assert_eq!(state.time_text.as_str(), "23:59:59");
    }

    #[test]
    fn test_battery_event_reaches_haptics() {
        let mut state = DisplayState::default();
        let mut haptics = HapticQueue::new();
        let event = Event::Battery(BatteryInfo {
            percent: 10,
            charging: false,
        });
        assert_eq!(dispatch(&mut state, event, &mut haptics), Redraw::ALL);
        assert_eq!(haptics.pending(), 1);
        assert!(state.battery_alert());
    }

    #[test]
    fn test_quiet_mode_event() {
        let mut state = DisplayState::default();
        let redraw = dispatch(&mut state, Event::QuietMode(true), &mut HapticQueue::new());
        assert!(redraw.canvas);
        assert!(state.quiet_mode_active);
    }

    #[test]
    fn test_redraw_coalesces() {
        let mut pending = Redraw::NONE;
        assert!(!pending.any());
        pending |= Redraw {
            canvas: false,
            labels: true,
        };
        pending |= Redraw {
            canvas: true,
            labels: false,
        };
        assert_eq!(pending, Redraw::ALL);
    }
}
