//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{Point, Size},
    primitives::Rectangle,
};
use mipidsi::{models::ST7789, Builder, Orientation};
use ringface::{
    config::{FACE_OFFSET, LCD_HEIGHT, LCD_WIDTH},
    ui::{colors, FACE_HEIGHT, FACE_WIDTH},
    DisplayState, WatchFace,
};

type Lcd<'a, SPI> =
    mipidsi::Display<SPIInterface<Spim<'a, SPI>, Output<'a>, Output<'a>>, ST7789, Output<'a>>;

/// Backlight pins, active low.
///
/// Each pin drives a FET through a different resistor; the face runs on
/// the mid one.
pub struct BacklightPins<'a> {
    /// Pin P0.14: 2.2 kΩ
    pub low: Output<'a>,
    /// Pin P0.22: 100 Ω
    pub mid: Output<'a>,
    /// Pin P0.23: 30 Ω
    pub high: Output<'a>,
}

pub struct Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// ST7789 driver
    lcd: Lcd<'a, SPI>,
    /// Kept to hold the backlight level
    _backlight: BacklightPins<'a>,
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Controller didn't come up
    Init,
    /// SPI write failed while drawing
    Draw,
}

impl<'a, SPI> Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'a, SPI>,
        cs_pin: Output<'a>,
        dc_pin: Output<'a>,
        rst_pin: Output<'a>,
        mut backlight: BacklightPins<'a>,
    ) -> Result<Self, Error> {
        let mut lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_WIDTH, LCD_HEIGHT)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;
        lcd.clear(colors::BACKGROUND).map_err(|_| Error::Draw)?;

        backlight.low.set_high();
        backlight.mid.set_low();
        backlight.high.set_high();

        Ok(Self {
            lcd,
            _backlight: backlight,
        })
    }

    /// Repaint the face area of the LCD.
    pub fn update(&mut self, face: &WatchFace, state: &DisplayState) -> Result<(), Error> {
        let area = Rectangle::new(
            Point::new(FACE_OFFSET.0, FACE_OFFSET.1),
            Size::new(FACE_WIDTH, FACE_HEIGHT),
        );
        face.draw(state, &mut self.lcd.cropped(&area))
            .map_err(|_| Error::Draw)
    }
}
