//! Per-variant pixel layout.
//!
//! Every position here is a hand-tuned constant for the 144x168 face, not
//! computed geometry.

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

use crate::clock::{DateStyle, DayStyle};

/// Face canvas width in pixels
pub const FACE_WIDTH: u32 = 144;

/// Face canvas height in pixels
pub const FACE_HEIGHT: u32 = 168;

/// The four watchface variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Time, connection and battery labels, filled Bluetooth marker
    #[default]
    Classic,
    /// Time, numeric date and short weekday, Bluetooth icon
    Dated,
    /// Time and battery label, Bluetooth and quiet-mode icons
    Quiet,
    /// Time, month/day date and full weekday, Bluetooth and quiet-mode icons
    QuietDated,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Dated,
        Variant::Quiet,
        Variant::QuietDated,
    ];

    pub const fn date_style(self) -> Option<DateStyle> {
        match self {
            Variant::Dated => Some(DateStyle::Numeric),
            Variant::QuietDated => Some(DateStyle::MonthDay),
            Variant::Classic | Variant::Quiet => None,
        }
    }

    pub const fn day_style(self) -> Option<DayStyle> {
        match self {
            Variant::Dated => Some(DayStyle::Short),
            Variant::QuietDated => Some(DayStyle::Long),
            Variant::Classic | Variant::Quiet => None,
        }
    }

    pub const fn layout(self) -> &'static Layout {
        match self {
            Variant::Classic => &CLASSIC,
            Variant::Dated => &DATED,
            Variant::Quiet => &QUIET,
            Variant::QuietDated => &QUIET_DATED,
        }
    }
}

/// How the Bluetooth state is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BluetoothMarker {
    /// Filled circle, blue when connected and red otherwise
    Disc { center: Point, radius: u32 },
    /// Connected/disconnected icon
    Icon { top_left: Point },
}

/// Text band positions. `None` means the variant has no such label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelLayout {
    pub time: Rectangle,
    pub date: Option<Rectangle>,
    pub day: Option<Rectangle>,
    pub connection: Option<Rectangle>,
    pub battery: Option<Rectangle>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Centres of the two decorative ring outlines
    pub ring_centers: [Point; 2],
    pub ring_radius: u32,
    /// Bounds of the battery radial
    pub battery_bounds: Rectangle,
    pub battery_outline_radius: u32,
    /// Bounds of the static device radial
    pub device_bounds: Rectangle,
    pub device_outline_radius: u32,
    /// Radial thickness, measured inward from the bounds
    pub radial_inset: u32,
    /// Sweep of the device radial in degrees
    pub device_sweep_deg: f32,
    pub bluetooth: BluetoothMarker,
    pub quiet_icon: Option<Point>,
    pub labels: LabelLayout,
}

/// Centre of `rect` as origin plus half the size.
///
/// `Rectangle::center` rounds the other way for even sizes, which puts the
/// battery rings a pixel up and left.
pub const fn rect_center(rect: &Rectangle) -> Point {
    Point::new(
        rect.top_left.x + (rect.size.width / 2) as i32,
        rect.top_left.y + (rect.size.height / 2) as i32,
    )
}

const fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

pub const CLASSIC: Layout = Layout {
    ring_centers: [Point::new(72, 295), Point::new(72, 298)],
    ring_radius: 180,
    battery_bounds: rect(90, 130, 30, 30),
    battery_outline_radius: 16,
    device_bounds: rect(95, 135, 20, 20),
    device_outline_radius: 10,
    radial_inset: 5,
    device_sweep_deg: 270.0,
    bluetooth: BluetoothMarker::Disc {
        center: Point::new(39, 145),
        radius: 15,
    },
    quiet_icon: None,
    labels: LabelLayout {
        time: rect(0, 20, FACE_WIDTH, 54),
        date: None,
        day: None,
        connection: Some(rect(0, 70, FACE_WIDTH, 34)),
        battery: Some(rect(0, 90, FACE_WIDTH, 34)),
    },
};

pub const DATED: Layout = Layout {
    ring_centers: [Point::new(72, 300), Point::new(72, 303)],
    ring_radius: 180,
    battery_bounds: rect(90, 132, 30, 30),
    battery_outline_radius: 16,
    device_bounds: rect(95, 137, 20, 20),
    device_outline_radius: 10,
    radial_inset: 5,
    device_sweep_deg: 270.0,
    bluetooth: BluetoothMarker::Icon {
        top_left: Point::new(31, 139),
    },
    quiet_icon: None,
    labels: LabelLayout {
        time: rect(0, 16, FACE_WIDTH, 40),
        date: Some(rect(0, 62, FACE_WIDTH, 24)),
        day: Some(rect(0, 86, FACE_WIDTH, 24)),
        connection: None,
        battery: None,
    },
};

pub const QUIET: Layout = Layout {
    ring_centers: [Point::new(72, 295), Point::new(72, 298)],
    ring_radius: 180,
    battery_bounds: rect(94, 130, 30, 30),
    battery_outline_radius: 16,
    device_bounds: rect(99, 135, 20, 20),
    device_outline_radius: 10,
    radial_inset: 5,
    device_sweep_deg: 270.0,
    bluetooth: BluetoothMarker::Icon {
        top_left: Point::new(20, 137),
    },
    quiet_icon: Some(Point::new(56, 137)),
    labels: LabelLayout {
        time: rect(0, 20, FACE_WIDTH, 54),
        date: None,
        day: None,
        connection: None,
        battery: Some(rect(0, 80, FACE_WIDTH, 34)),
    },
};

pub const QUIET_DATED: Layout = Layout {
    ring_centers: [Point::new(72, 300), Point::new(72, 303)],
    ring_radius: 180,
    battery_bounds: rect(94, 132, 30, 30),
    battery_outline_radius: 16,
    device_bounds: rect(99, 137, 20, 20),
    device_outline_radius: 10,
    radial_inset: 5,
    device_sweep_deg: 270.0,
    bluetooth: BluetoothMarker::Icon {
        top_left: Point::new(20, 139),
    },
    quiet_icon: Some(Point::new(56, 139)),
    labels: LabelLayout {
        time: rect(0, 16, FACE_WIDTH, 40),
        date: Some(rect(0, 62, FACE_WIDTH, 24)),
        day: Some(rect(0, 86, FACE_WIDTH, 24)),
        connection: None,
        battery: None,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_layout_matches_formats() {
        for variant in Variant::ALL {
            let labels = variant.layout().labels;
            assert_eq!(labels.date.is_some(), variant.date_style().is_some());
            assert_eq!(labels.day.is_some(), variant.day_style().is_some());
        }
    }

    #[test]
    fn test_quiet_icon_only_on_quiet_variants() {
        assert!(CLASSIC.quiet_icon.is_none());
        assert!(DATED.quiet_icon.is_none());
        assert!(QUIET.quiet_icon.is_some());
        assert!(QUIET_DATED.quiet_icon.is_some());
    }

    #[test]
    fn test_rect_center_rounds_down_right() {
        assert_eq!(rect_center(&CLASSIC.battery_bounds), Point::new(105, 145));
        assert_eq!(rect_center(&CLASSIC.device_bounds), Point::new(105, 145));
        assert_eq!(rect_center(&rect(0, 0, 5, 5)), Point::new(2, 2));
    }

    #[test]
    fn test_indicators_inside_face() {
        let face = Rectangle::new(Point::zero(), Size::new(FACE_WIDTH, FACE_HEIGHT));
        for variant in Variant::ALL {
            let layout = variant.layout();
            assert!(face.contains(layout.battery_bounds.top_left));
            assert!(face.contains(layout.battery_bounds.bottom_right().unwrap()));
            assert!(face.contains(layout.device_bounds.bottom_right().unwrap()));
        }
    }
}
