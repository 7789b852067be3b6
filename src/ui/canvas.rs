//! Plays draw commands onto an `embedded-graphics` target.

use embedded_graphics::{
    geometry::{Angle, Point},
    mono_font::{
        ascii::{FONT_10X20, FONT_9X18},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use super::{
    colors,
    icons::IconSet,
    layout::rect_center,
    render::{DrawCommand, Font},
};

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Large => &PROFONT_24_POINT,
        Font::Medium => &FONT_10X20,
        Font::Small => &FONT_9X18,
    }
}

/// Clear `target` and draw every command in order.
pub fn draw_frame<D>(
    target: &mut D,
    commands: &[DrawCommand<'_>],
    icons: &IconSet,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(colors::BACKGROUND)?;
    for command in commands {
        draw_command(target, command, icons)?;
    }
    Ok(())
}

pub fn draw_command<D>(
    target: &mut D,
    command: &DrawCommand<'_>,
    icons: &IconSet,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match *command {
        DrawCommand::CircleOutline {
            center,
            radius,
            color,
        } => Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(target),
        DrawCommand::FilledCircle {
            center,
            radius,
            color,
        } => Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target),
        DrawCommand::Radial {
            bounds,
            inset,
            start_deg,
            sweep_deg,
            color,
        } => draw_radial(target, bounds, inset, start_deg, sweep_deg, color),
        DrawCommand::Icon {
            icon,
            top_left,
            color,
        } => icons.get(icon).draw(target, top_left, color),
        DrawCommand::Text {
            text,
            bounds,
            font,
            color,
            background,
        } => {
            if let Some(background) = background {
                bounds
                    .into_styled(PrimitiveStyle::with_fill(background))
                    .draw(target)?;
            }
            let character_style = MonoTextStyle::new(mono_font(font), color);
            let text_style = TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Top)
                .build();
            let position = Point::new(bounds.center().x, bounds.top_left.y);
            Text::with_text_style(text, position, character_style, text_style).draw(target)?;
            Ok(())
        }
    }
}

/// Fill a ring segment `inset` pixels thick just inside `bounds`.
///
/// `embedded-graphics` measures angles from 3 o'clock; radials start at
/// 12 o'clock, hence the quarter-turn offset.
fn draw_radial<D>(
    target: &mut D,
    bounds: Rectangle,
    inset: u32,
    start_deg: f32,
    sweep_deg: f32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let outer = bounds.size.width.min(bounds.size.height);
    if sweep_deg <= 0.0 || inset == 0 || outer <= inset {
        return Ok(());
    }

    // Stroke is centred on the arc, so shrink it by the thickness to keep
    // the band inside `bounds`, concentric with the outline circles
    Arc::with_center(
        rect_center(&bounds),
        outer - inset,
        Angle::from_degrees(start_deg - 90.0),
        Angle::from_degrees(sweep_deg),
    )
    .into_styled(PrimitiveStyle::with_stroke(color, inset))
    .draw(target)
}
