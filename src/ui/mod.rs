//! UI definitions module
//!
//! A watchface is a [`Layout`] plus the icon assets it blits. Rendering goes
//! state → [`Frame`] of draw commands → any `embedded-graphics` target.

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

use crate::state::DisplayState;

pub mod canvas;
pub mod colors;
pub mod icons;
pub mod layout;
pub mod render;

pub use icons::{Icon, IconSet};
pub use layout::{Layout, Variant, FACE_HEIGHT, FACE_WIDTH};
pub use render::{render, DrawCommand, Font, Frame};

/// A watchface variant with its assets loaded.
pub struct WatchFace {
    variant: Variant,
    layout: &'static Layout,
    icons: IconSet,
}

impl WatchFace {
    /// Create new watchface
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            layout: variant.layout(),
            icons: IconSet::load(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn layout(&self) -> &Layout {
        self.layout
    }

    /// Fresh display state matching this face.
    pub fn initial_state(&self) -> DisplayState {
        DisplayState::new(self.variant)
    }

    /// Draw commands for `state`.
    pub fn frame<'a>(&self, state: &'a DisplayState) -> Frame<'a> {
        render(state, self.layout)
    }

    /// Render `state` and paint it onto `target`.
    pub fn draw<D>(&self, state: &DisplayState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        canvas::draw_frame(target, &self.frame(state), &self.icons)
    }
}
