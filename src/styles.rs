//! Pre-computed static text styles.
//!
//! `MonoTextStyle::new` and `TextStyleBuilder::build` are `const fn` in
//! embedded-graphics 0.8, so every fixed-color style lives in read-only data
//! instead of being rebuilt each frame.
//!
//! The logo text needs a per-bounce shadow color, so only its font is exposed
//! here ([`LOGO_FONT`]) and the logo renderer builds that one style itself.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_7X13},
    },
    pixelcolor::Rgb888,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_12_POINT;

use crate::colors::WHITE;

/// Fixed 7x13 monospace font for the "DVD" text.
pub const LOGO_FONT: &MonoFont = &FONT_7X13;

/// White logo text.
pub const LOGO_TEXT_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&FONT_7X13, WHITE);

/// Small white text for the log panel.
pub const LOG_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Status line (FPS, speed, key bindings).
pub const STATUS_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_12_POINT, WHITE);

/// Left-aligned text positioned by its top edge, so `y` is the top of the
/// glyph cell like a terminal print.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();
