//! Display state to draw commands.
//!
//! Rendering is pure: the command list depends only on the state and layout
//! passed in, so the same state always produces the same frame.

use embedded_graphics::{geometry::Point, pixelcolor::Rgb565, primitives::Rectangle};
use heapless::Vec;

use super::{
    colors,
    icons::Icon,
    layout::{rect_center, BluetoothMarker, Layout},
};
use crate::state::DisplayState;

/// Upper bound on commands in one frame.
pub const MAX_COMMANDS: usize = 16;

/// Font sizes available to text bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Clock digits
    Large,
    /// Date line
    Medium,
    /// Status labels
    Small,
}

/// One drawing primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand<'a> {
    CircleOutline {
        center: Point,
        radius: u32,
        color: Rgb565,
    },
    FilledCircle {
        center: Point,
        radius: u32,
        color: Rgb565,
    },
    /// Ring segment filling `inset` pixels inward from `bounds`.
    /// Angles are in degrees, 0° at 12 o'clock, increasing clockwise.
    Radial {
        bounds: Rectangle,
        inset: u32,
        start_deg: f32,
        sweep_deg: f32,
        color: Rgb565,
    },
    Icon {
        icon: Icon,
        top_left: Point,
        color: Rgb565,
    },
    /// Text centred horizontally in `bounds`, top aligned.
    Text {
        text: &'a str,
        bounds: Rectangle,
        font: Font,
        color: Rgb565,
        background: Option<Rgb565>,
    },
}

pub type Frame<'a> = Vec<DrawCommand<'a>, MAX_COMMANDS>;

/// Sweep of the battery radial for `percent`, clamped to 0–100.
pub fn battery_sweep_deg(percent: u8) -> f32 {
    f32::from(percent.min(100)) * 360.0 / 100.0
}

/// Build the full frame: canvas primitives first, text bands on top.
pub fn render<'a>(state: &'a DisplayState, layout: &Layout) -> Frame<'a> {
    let mut frame = Frame::new();
    render_status(state, layout, &mut frame);
    render_labels(state, layout, &mut frame);
    frame
}

fn emit<'a>(frame: &mut Frame<'a>, command: DrawCommand<'a>) {
    // MAX_COMMANDS covers the busiest layout; see `test_frame_fits_every_variant`
    if frame.push(command).is_err() {
        debug_assert!(false, "frame overflow");
    }
}

/// Rings, battery and device radials, Bluetooth and quiet-mode indicators.
pub fn render_status(state: &DisplayState, layout: &Layout, frame: &mut Frame<'_>) {
    // Decorative rings
    for center in layout.ring_centers {
        emit(
            frame,
            DrawCommand::CircleOutline {
                center,
                radius: layout.ring_radius,
                color: colors::WHITE,
            },
        );
    }

    // Battery: outline plus a radial proportional to the charge
    let battery_center = rect_center(&layout.battery_bounds);
    emit(
        frame,
        DrawCommand::CircleOutline {
            center: battery_center,
            radius: layout.battery_outline_radius,
            color: colors::DARK_GREEN,
        },
    );
    emit(
        frame,
        DrawCommand::Radial {
            bounds: layout.battery_bounds,
            inset: layout.radial_inset,
            start_deg: 0.0,
            sweep_deg: battery_sweep_deg(state.battery_percent()),
            color: if state.battery_alert() {
                colors::RED
            } else {
                colors::GREEN
            },
        },
    );

    // Device: fixed partial ring inside the battery ring
    emit(
        frame,
        DrawCommand::CircleOutline {
            center: battery_center,
            radius: layout.device_outline_radius,
            color: colors::DARK_GREEN,
        },
    );
    emit(
        frame,
        DrawCommand::Radial {
            bounds: layout.device_bounds,
            inset: layout.radial_inset,
            start_deg: 0.0,
            sweep_deg: layout.device_sweep_deg,
            color: colors::YELLOW,
        },
    );

    match layout.bluetooth {
        BluetoothMarker::Disc { center, radius } => emit(
            frame,
            DrawCommand::FilledCircle {
                center,
                radius,
                color: if state.bluetooth_connected {
                    colors::BLUE
                } else {
                    colors::RED
                },
            },
        ),
        BluetoothMarker::Icon { top_left } => emit(
            frame,
            DrawCommand::Icon {
                icon: Icon::for_bluetooth(state.bluetooth_connected),
                top_left,
                color: if state.bluetooth_connected {
                    colors::BLUE
                } else {
                    colors::RED
                },
            },
        ),
    }

    if let Some(top_left) = layout.quiet_icon {
        emit(
            frame,
            DrawCommand::Icon {
                icon: Icon::for_quiet_mode(state.quiet_mode_active),
                top_left,
                color: colors::WHITE,
            },
        );
    }
}

/// Text bands, in stacking order.
pub fn render_labels<'a>(state: &'a DisplayState, layout: &Layout, frame: &mut Frame<'a>) {
    let labels = &layout.labels;

    emit(
        frame,
        DrawCommand::Text {
            text: state.time_text.as_str(),
            bounds: labels.time,
            font: Font::Large,
            color: colors::WHITE,
            background: Some(colors::RED),
        },
    );

    let small = [
        (labels.date, state.date_text.as_str(), Font::Medium),
        (labels.day, state.day_text.as_str(), Font::Small),
        (labels.connection, state.connection_text(), Font::Small),
        (labels.battery, state.battery_text.as_str(), Font::Small),
    ];
    for (bounds, text, font) in small {
        if let Some(bounds) = bounds {
            emit(
                frame,
                DrawCommand::Text {
                    text,
                    bounds,
                    font,
                    color: colors::WHITE,
                    background: None,
                },
            );
        }
    }
}
