//! Logo generation.
//!
//! The logo is a filled rectangle with the text "DVD" centered on it. The
//! text is drawn twice: a darkened copy one pixel down and right, then the
//! white text on top, giving a simple drop shadow.
//!
//! # Text Placement
//!
//! ```text
//! text_x = (width - advance) / 2
//! text_y = height / 2 + ascent / 2      (alphabetic baseline)
//! ```
//!
//! `advance` comes from the font's text renderer (`measure_string`) and
//! `ascent` from the font's baseline offset, so another mono font can be
//! swapped in without touching the math.
//!
//! `text_y` is where the alphabetic baseline goes, not the top of the text
//! box. Placing the box top there instead would push the glyphs about half a
//! line below center; with the baseline the capitals sit on the middle row
//! within a pixel.
//!
//! # Shadow
//!
//! The shadow is black at alpha 128. It only ever lands on the fill color,
//! so its final color is resolved up front with [`blend`].

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};

use crate::bitmap::{Bitmap, Canvas};
use crate::colors::{BLACK, SHADOW_ALPHA, blend};
use crate::styles::{LOGO_FONT, LOGO_TEXT_STYLE};

/// Text drawn on the logo.
pub const LOGO_TEXT: &str = "DVD";

/// Offset of the shadow copy relative to the text.
pub const SHADOW_OFFSET: Point = Point::new(1, 1);

/// Creates logo bitmaps.
///
/// The screensaver owns one renderer and calls it every time the logo color
/// changes.
pub trait LogoRenderer {
    /// Render a `size` logo on a `fill` background.
    fn create_logo(&self, size: Size, fill: Rgb888) -> Bitmap;
}

/// Renderer for the classic "DVD" logo.
#[derive(Clone, Copy, Debug, Default)]
pub struct DvdLogoRenderer;

impl LogoRenderer for DvdLogoRenderer {
    fn create_logo(&self, size: Size, fill: Rgb888) -> Bitmap {
        create_dvd_logo(size, fill)
    }
}

/// Horizontal advance of `text` in `font`.
pub fn text_advance(font: &MonoFont, text: &str) -> i32 {
    MonoTextStyle::new(font, BLACK)
        .measure_string(text, Point::zero(), Baseline::Alphabetic)
        .next_position
        .x
}

/// Distance from the top of a glyph cell to its baseline.
#[inline]
pub fn font_ascent(font: &MonoFont) -> i32 {
    font.baseline as i32
}

/// Baseline origin that centers [`LOGO_TEXT`] on a `size` logo.
pub fn text_origin(size: Size, font: &MonoFont) -> Point {
    let width = size.width as i32;
    let height = size.height as i32;
    Point::new(
        (width - text_advance(font, LOGO_TEXT)) / 2,
        height / 2 + font_ascent(font) / 2,
    )
}

/// Final shadow color over a `fill` background.
#[inline]
pub fn shadow_color(fill: Rgb888) -> Rgb888 {
    blend(BLACK, fill, SHADOW_ALPHA)
}

/// Render the "DVD" logo.
///
/// Zero-sized logos are a caller error; they produce an empty bitmap.
pub fn create_dvd_logo(size: Size, fill: Rgb888) -> Bitmap {
    let mut canvas = Canvas::new(size, fill);
    let origin = text_origin(size, LOGO_FONT);

    let shadow_style = MonoTextStyle::new(LOGO_FONT, shadow_color(fill));
    Text::new(LOGO_TEXT, origin + SHADOW_OFFSET, shadow_style)
        .draw(&mut canvas)
        .ok();
    Text::new(LOGO_TEXT, origin, LOGO_TEXT_STYLE)
        .draw(&mut canvas)
        .ok();

    canvas.into_bitmap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{PALETTE, WHITE};
    use crate::config::{LOGO_HEIGHT, LOGO_WIDTH};

    const LOGO_SIZE: Size = Size::new(LOGO_WIDTH, LOGO_HEIGHT);

    /// Bounding box (min, max inclusive) of all pixels with `color`.
    fn bounds_of(bitmap: &Bitmap, color: Rgb888) -> Option<(Point, Point)> {
        bitmap
            .pixels()
            .filter(|Pixel(_, c)| *c == color)
            .fold(None, |acc, Pixel(p, _)| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((min.component_min(p), max.component_max(p))),
            })
    }

    #[test]
    fn test_logo_size_and_background() {
        let fill = PALETTE[0].color;
        let logo = create_dvd_logo(LOGO_SIZE, fill);
        assert_eq!(logo.size(), LOGO_SIZE);
        assert_eq!(logo.pixel(Point::new(0, 0)), Some(fill));
        assert_eq!(logo.pixel(Point::new(119, 59)), Some(fill));
        assert_eq!(logo.pixel(Point::new(120, 0)), None);
    }

    #[test]
    fn test_text_origin_formula() {
        let advance = text_advance(LOGO_FONT, LOGO_TEXT);
        // Three 7px wide glyphs with no extra spacing.
        assert_eq!(advance, 21);

        let origin = text_origin(Size::new(200, 100), LOGO_FONT);
        assert_eq!(origin.x, (200 - 21) / 2);
        assert_eq!(origin.y, 50 + font_ascent(LOGO_FONT) / 2);
    }

    #[test]
    fn test_text_centered_horizontally() {
        let logo = create_dvd_logo(LOGO_SIZE, PALETTE[2].color);
        let (min, max) = bounds_of(&logo, WHITE).expect("no white text pixels");
        // Doubled to stay in integers: ink center within 1px of the logo center.
        assert!((min.x + max.x + 1 - LOGO_WIDTH as i32).abs() <= 2, "text spans {min:?}..{max:?}");
    }

    #[test]
    fn test_text_centered_on_200x100() {
        let size = Size::new(200, 100);
        assert_eq!(text_origin(size, LOGO_FONT), Point::new(89, 55));

        let logo = create_dvd_logo(size, PALETTE[0].color);
        let (min, max) = bounds_of(&logo, WHITE).expect("no white text pixels");
        assert_eq!((min, max), (Point::new(89, 47), Point::new(108, 55)));
        assert!((min.x + max.x + 1 - 200).abs() <= 2);
    }

    #[test]
    fn test_text_inside_glyph_cells() {
        let logo = create_dvd_logo(LOGO_SIZE, PALETTE[3].color);
        let origin = text_origin(LOGO_SIZE, LOGO_FONT);
        let top = origin.y - font_ascent(LOGO_FONT);
        let bottom = top + LOGO_FONT.character_size.height as i32;
        let right = origin.x + text_advance(LOGO_FONT, LOGO_TEXT);

        let (min, max) = bounds_of(&logo, WHITE).expect("no white text pixels");
        assert!(min.x >= origin.x && max.x < right);
        assert!(min.y >= top && max.y < bottom);
    }

    #[test]
    fn test_shadow_offset_behind_text() {
        let fill = PALETTE[1].color;
        let shadow = shadow_color(fill);
        let logo = create_dvd_logo(LOGO_SIZE, fill);

        let (text_min, text_max) = bounds_of(&logo, WHITE).expect("no white text pixels");
        let (shadow_min, shadow_max) = bounds_of(&logo, shadow).expect("no shadow pixels");

        // The shadow's bottom-right edge is never covered by the text.
        assert_eq!(shadow_max, text_max + SHADOW_OFFSET);
        assert!(shadow_min.x >= text_min.x && shadow_min.y >= text_min.y);

        // Every white pixel casts a shadow unless the shadow is hidden under text.
        for Pixel(p, _) in logo.pixels().filter(|Pixel(_, c)| *c == WHITE) {
            let cast = logo.pixel(p + SHADOW_OFFSET);
            assert!(cast == Some(shadow) || cast == Some(WHITE), "missing shadow at {p:?}");
        }
    }

    #[test]
    fn test_only_three_colors() {
        let fill = PALETTE[6].color;
        let logo = create_dvd_logo(LOGO_SIZE, fill);
        let shadow = shadow_color(fill);
        assert!(logo.pixels().all(|Pixel(_, c)| c == fill || c == shadow || c == WHITE));
    }

    #[test]
    fn test_renderer_is_pure() {
        let renderer = DvdLogoRenderer;
        let a = renderer.create_logo(LOGO_SIZE, PALETTE[4].color);
        let b = renderer.create_logo(LOGO_SIZE, PALETTE[4].color);
        assert_eq!(a, b);
        assert_ne!(a, renderer.create_logo(LOGO_SIZE, PALETTE[5].color));
    }
}
