//! Integration tests for the host-testable watchface logic.

use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use ringface::{
    battery::BatteryGauge,
    clock,
    dispatch, populate,
    ui::{colors, render::DrawCommand, FACE_HEIGHT, FACE_WIDTH},
    BatteryInfo, Event, HapticQueue, Pulse, Redraw, Startup, Variant, WatchFace,
};

/// Plain framebuffer covering the face area.
struct Framebuffer {
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb565::new(1, 2, 3); (FACE_WIDTH * FACE_HEIGHT) as usize],
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[y as usize * FACE_WIDTH as usize + x as usize]
    }

    fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(FACE_WIDTH, FACE_HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < FACE_WIDTH
                && (point.y as u32) < FACE_HEIGHT
            {
                self.pixels[point.y as usize * FACE_WIDTH as usize + point.x as usize] = color;
            }
        }
        Ok(())
    }
}

fn friday_at(secs: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(13, 7, secs))
        .expect("valid date")
}

fn friday_afternoon() -> NaiveDateTime {
    friday_at(9)
}

fn startup(percent: u8, charging: bool, connected: bool) -> Startup {
    Startup {
        now: friday_afternoon(),
        battery: BatteryInfo { percent, charging },
        connected,
        quiet_mode: false,
    }
}

#[test]
fn startup_populates_every_variant_silently() {
    for variant in Variant::ALL {
        let face = WatchFace::new(variant);
        let mut state = face.initial_state();
        let mut haptics = HapticQueue::new();

        populate(&mut state, &startup(80, false, true), &mut haptics);

        assert!(haptics.is_empty(), "{:?} vibrated on startup", variant);
        assert!(state.vibration_armed());
        assert_eq!(state.time_text.as_str(), "13:07:09");
        assert_eq!(state.battery_text.as_str(), "80% remaining");
        assert!(state.bluetooth_connected);
    }
}

#[test]
fn date_labels_follow_variant() {
    let expected = [
        (Variant::Classic, "", ""),
        (Variant::Dated, "05.01.2024", "Fri"),
        (Variant::Quiet, "", ""),
        (Variant::QuietDated, "Jan 05", "Friday"),
    ];
    for (variant, date, day) in expected {
        let mut state = WatchFace::new(variant).initial_state();
        let mut haptics = HapticQueue::new();
        dispatch(&mut state, Event::Tick(friday_afternoon()), &mut haptics);

        assert_eq!(state.date_text.as_str(), date, "{:?}", variant);
        assert_eq!(state.day_text.as_str(), day, "{:?}", variant);
    }
}

#[test]
fn connectivity_change_after_startup_vibrates() {
    let face = WatchFace::new(Variant::Classic);
    let mut state = face.initial_state();
    let mut haptics = HapticQueue::new();
    populate(&mut state, &startup(80, false, true), &mut haptics);

    let redraw = dispatch(&mut state, Event::Connectivity(false), &mut haptics);

    assert_eq!(redraw, Redraw::ALL);
    assert_eq!(haptics.take(), Some(Pulse::Double));
    assert_eq!(state.connection_text(), "disconnected");
}

#[test]
fn low_battery_alerts_once_per_reading_and_turns_ring_red() {
    let face = WatchFace::new(Variant::Dated);
    let mut state = face.initial_state();
    let mut haptics = HapticQueue::new();
    populate(&mut state, &startup(11, false, false), &mut haptics);
    assert!(haptics.is_empty());

    dispatch(
        &mut state,
        Event::Battery(BatteryInfo {
            percent: 10,
            charging: false,
        }),
        &mut haptics,
    );
    assert_eq!(haptics.drain().collect::<Vec<_>>(), vec![Pulse::Double]);

    let battery_color = face
        .frame(&state)
        .iter()
        .find_map(|command| match command {
            DrawCommand::Radial {
                start_deg,
                sweep_deg,
                color,
                ..
            } if *start_deg == 0.0 && *sweep_deg == 36.0 => Some(*color),
            _ => None,
        });
    assert_eq!(battery_color, Some(colors::RED));

    // Nine percent is below the alert level but not at it
    dispatch(
        &mut state,
        Event::Battery(BatteryInfo {
            percent: 9,
            charging: false,
        }),
        &mut haptics,
    );
    assert!(haptics.is_empty());
    assert!(!state.battery_alert());
}

#[test]
fn burst_of_events_coalesces_into_one_redraw() {
    let mut state = WatchFace::new(Variant::Quiet).initial_state();
    let mut haptics = HapticQueue::new();

    let events = [
        Event::Tick(friday_afternoon()),
        Event::QuietMode(true),
        Event::Tick(friday_at(10)),
    ];
    let mut redraw = Redraw::NONE;
    for event in events {
        redraw |= dispatch(&mut state, event, &mut haptics);
    }

    assert_eq!(redraw, Redraw::ALL);
    assert!(state.quiet_mode_active);
    assert_eq!(state.time_text.as_str(), "13:07:10");
}

#[test]
fn drawing_paints_time_band_and_status() {
    let face = WatchFace::new(Variant::Classic);
    let mut state = face.initial_state();
    let mut haptics = HapticQueue::new();
    populate(&mut state, &startup(100, false, true), &mut haptics);

    let mut fb = Framebuffer::new();
    face.draw(&state, &mut fb).unwrap();

    // Cleared to background first
    assert_eq!(fb.count(Rgb565::new(1, 2, 3)), 0);
    // Time band background
    assert_eq!(fb.pixel(2, 22), colors::RED);
    // Connected disc
    assert_eq!(fb.pixel(39, 145), colors::BLUE);
    assert!(fb.count(colors::GREEN) > 0);
}

#[test]
fn redrawing_same_state_is_pixel_identical() {
    let face = WatchFace::new(Variant::QuietDated);
    let mut state = face.initial_state();
    let mut haptics = HapticQueue::new();
    populate(&mut state, &startup(42, true, false), &mut haptics);

    let mut first = Framebuffer::new();
    let mut second = Framebuffer::new();
    face.draw(&state, &mut first).unwrap();
    face.draw(&state, &mut second).unwrap();

    assert_eq!(first.pixels, second.pixels);
}

#[test]
fn gauge_feeds_battery_events() {
    let mut gauge = BatteryGauge::new();
    let mut state = WatchFace::new(Variant::Classic).initial_state();
    let mut haptics = HapticQueue::new();

    // Full-scale 12 bit reading is well above a full cell
    let info = gauge.update(4095, false).unwrap().expect("first reading reports");
    dispatch(&mut state, Event::Battery(info), &mut haptics);
    assert_eq!(state.battery_percent(), 100);

    // Same reading again: nothing new to report
    assert_eq!(gauge.update(4095, false).unwrap(), None);

    let info = gauge.update(4095, true).unwrap().expect("charger change reports");
    dispatch(&mut state, Event::Battery(info), &mut haptics);
    assert_eq!(state.battery_text.as_str(), "charging");
}

#[test]
fn phone_time_sync_drives_the_clock_label() {
    let bytes = clock::to_cts_bytes(&friday_afternoon());
    let synced = clock::from_cts_bytes(&bytes).unwrap();

    let mut state = WatchFace::new(Variant::Dated).initial_state();
    let mut haptics = HapticQueue::new();
    dispatch(&mut state, Event::Tick(synced), &mut haptics);

    assert_eq!(state.time_text.as_str(), "13:07:09");
    assert_eq!(state.date_text.as_str(), "05.01.2024");
    assert!(clock::from_cts_bytes(&bytes[..4]).is_err());
}
