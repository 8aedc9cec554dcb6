//! Internal drawing helpers shared across screens.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

/// Character style in the given font and color.
pub(crate) fn char_style(
    font: &'static MonoFont<'static>,
    color: BinaryColor,
) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(font, color)
}

/// Draw one line of text, top-anchored at (x, y).
pub(crate) fn draw_text<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    text: &str,
    x: i32,
    y: i32,
    font: &'static MonoFont<'static>,
) -> Result<(), D::Error> {
    draw_text_color(display, text, x, y, font, BinaryColor::On)
}

/// Draw one line of text in an explicit color, top-anchored at (x, y).
pub(crate) fn draw_text_color<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    text: &str,
    x: i32,
    y: i32,
    font: &'static MonoFont<'static>,
    color: BinaryColor,
) -> Result<(), D::Error> {
    Text::with_baseline(text, Point::new(x, y), char_style(font, color), Baseline::Top)
        .draw(display)?;
    Ok(())
}

/// Draw one line of text right-aligned against `right_x`, top-anchored.
pub(crate) fn draw_text_right<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    text: &str,
    right_x: i32,
    y: i32,
    font: &'static MonoFont<'static>,
) -> Result<(), D::Error> {
    let width = text.chars().count() as i32 * font.character_size.width as i32;
    draw_text(display, text, right_x - width, y, font)
}

/// Draw a 1px horizontal rule from x0 to x1 at y.
pub(crate) fn draw_hline<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    x0: i32,
    x1: i32,
    y: i32,
) -> Result<(), D::Error> {
    Line::new(Point::new(x0, y), Point::new(x1, y))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)
}

/// Fill a rectangle solid.
pub(crate) fn fill_rect<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    rect: Rectangle,
    color: BinaryColor,
) -> Result<(), D::Error> {
    rect.into_styled(PrimitiveStyle::with_fill(color)).draw(display)
}

/// Stroke a 1px rectangle outline.
pub(crate) fn outline_rect<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    rect: Rectangle,
) -> Result<(), D::Error> {
    rect.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)
}
