//! Color constants and the bounce palette.
//!
//! # Rgb888
//!
//! All drawing uses 24-bit `Rgb888` so the palette keeps its exact 8-bit
//! channel values (orange is `(255, 165, 0)`, purple `(128, 0, 128)`).
//!
//! # Alpha
//!
//! `embedded-graphics` colors carry no alpha channel. Translucent draws are
//! resolved up front with [`blend`], which composites a source color over a
//! known destination color.

use core::fmt;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Screen background and logo shadow tint.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Logo text and overlay text.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Screen clear color.
pub const BACKGROUND: Rgb888 = BLACK;

/// Alpha of the logo text shadow (about half opaque).
pub const SHADOW_ALPHA: u8 = 128;

/// Alpha of the log panel background.
pub const LOG_PANEL_ALPHA: u8 = 120;

// =============================================================================
// Palette
// =============================================================================

/// A named palette color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub color: Rgb888,
}

impl PaletteEntry {
    const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name,
            color: Rgb888::new(r, g, b),
        }
    }
}

impl fmt::Display for PaletteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.name,
            self.color.r(),
            self.color.g(),
            self.color.b()
        )
    }
}

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 8;

/// Logo colors in the order they are cycled through on each bounce.
pub const PALETTE: [PaletteEntry; PALETTE_SIZE] = [
    PaletteEntry::new("Red", 255, 0, 0),
    PaletteEntry::new("Green", 0, 255, 0),
    PaletteEntry::new("Blue", 0, 0, 255),
    PaletteEntry::new("Yellow", 255, 255, 0),
    PaletteEntry::new("Magenta", 255, 0, 255),
    PaletteEntry::new("Cyan", 0, 255, 255),
    PaletteEntry::new("Orange", 255, 165, 0),
    PaletteEntry::new("Purple", 128, 0, 128),
];

/// Index of the color that follows `index`, wrapping after the last entry.
#[inline]
pub const fn next_index(index: usize) -> usize {
    (index + 1) % PALETTE_SIZE
}

// =============================================================================
// Blending
// =============================================================================

/// Composite `src` with coverage `alpha` over an opaque `dst`.
///
/// Each channel is `(src * alpha + dst * (255 - alpha)) / 255`, rounded.
pub fn blend(src: Rgb888, dst: Rgb888, alpha: u8) -> Rgb888 {
    let mix = |s: u8, d: u8| -> u8 {
        let a = u32::from(alpha);
        let v = u32::from(s) * a + u32::from(d) * (255 - a);
        ((v + 127) / 255) as u8
    };
    Rgb888::new(mix(src.r(), dst.r()), mix(src.g(), dst.g()), mix(src.b(), dst.b()))
}
