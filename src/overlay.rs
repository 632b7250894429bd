//! Per-frame drawing.
//!
//! Everything is redrawn every frame, back to front:
//!
//! 1. Clear to the background color.
//! 2. Log panel: the last [`MAX_LOG_LINES`] log lines in a strip at the
//!    bottom of the screen (only when enabled and non-empty).
//! 3. The logo at its rounded position, on top of the log text.
//! 4. Status line with FPS, speed and key bindings, on top of everything.
//!
//! Drawing is generic over `DrawTarget<Color = Rgb888>` so the same code
//! paints the simulator display and the in-memory [`Canvas`](crate::bitmap::Canvas)
//! used by the tests.
//!
//! ```text
//! +--------------------------------------------------+
//! | FPS: 60.0 | Speed: 3.0 | [F] fullscreen | ...     |
//! |                                                  |
//! |              +-------+                           |
//! |              |  DVD  |                           |
//! |              +-------+                           |
//! |--------------------------------------------------|  SCREEN_HEIGHT - 200
//! | [1.2s] BOUNCE: Left edge hit at ...              |  one line per 20px
//! | ...                                              |
//! +--------------------------------------------------+
//! ```

use core::fmt::Write;

use embedded_graphics::{
    image::Image,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    bitmap::Bitmap,
    colors::{BACKGROUND, BLACK, LOG_PANEL_ALPHA, blend},
    config::{
        LOG_LINE_LENGTH, LOG_LINE_SPACING, LOG_PANEL_HEIGHT, MAX_LOG_LINES, OVERLAY_LINE_CHARS, SCREEN_HEIGHT,
        SCREEN_WIDTH, SHOW_LOGS_IN_APP,
    },
    log::LogBuffer,
    motion::Vec2,
    styles::{LOG_STYLE, STATUS_STYLE, TOP_LEFT},
};

// =============================================================================
// Layout Constants
// =============================================================================

/// Top-left corner of the log panel.
const LOG_PANEL_POS: Point = Point::new(0, (SCREEN_HEIGHT - LOG_PANEL_HEIGHT) as i32);

/// Size of the log panel (full width).
const LOG_PANEL_SIZE: Size = Size::new(SCREEN_WIDTH, LOG_PANEL_HEIGHT);

/// Left margin of log lines.
const LOG_TEXT_X: i32 = 10;

/// Top-left corner of the status line.
const STATUS_POS: Point = Point::zero();

/// Marker appended to shortened log lines.
const ELLIPSIS: &str = "...";

// =============================================================================
// Frame Data
// =============================================================================

/// Everything the overlay needs to draw one frame.
pub struct FrameView<'a> {
    pub logo: &'a Bitmap,
    /// Top-left corner of the logo.
    pub position: Vec2,
    pub speed: f64,
    pub fps: f32,
    pub log: &'a LogBuffer,
}

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw a complete frame.
pub fn draw_frame<D>(display: &mut D, frame: &FrameView<'_>)
where
    D: DrawTarget<Color = Rgb888>,
{
    display.clear(BACKGROUND).ok();

    if SHOW_LOGS_IN_APP && !frame.log.is_empty() {
        draw_log_panel(display, frame.log);
    }

    draw_logo(display, frame.logo, frame.position);
    draw_status(display, frame.fps, frame.speed);
}

/// Y coordinate (top of glyph cell) of log line `index`.
#[inline]
pub const fn log_line_y(index: usize) -> i32 {
    SCREEN_HEIGHT as i32 - (LOG_LINE_SPACING * (MAX_LOG_LINES - index) as u32) as i32
}

/// Shorten lines longer than [`OVERLAY_LINE_CHARS`] characters to fit the
/// panel, marking the cut with `...`.
pub fn truncate_line(line: &str) -> String<LOG_LINE_LENGTH> {
    let mut out: String<LOG_LINE_LENGTH> = String::new();
    if line.chars().count() <= OVERLAY_LINE_CHARS {
        for c in line.chars() {
            if out.push(c).is_err() {
                break;
            }
        }
        return out;
    }

    let keep = OVERLAY_LINE_CHARS - ELLIPSIS.len();
    for c in line.chars().take(keep) {
        if out.len() + c.len_utf8() + ELLIPSIS.len() > LOG_LINE_LENGTH {
            break;
        }
        out.push(c).ok();
    }
    out.push_str(ELLIPSIS).ok();
    out
}

fn draw_log_panel<D>(display: &mut D, log: &LogBuffer)
where
    D: DrawTarget<Color = Rgb888>,
{
    let panel_fill = PrimitiveStyle::with_fill(blend(BLACK, BACKGROUND, LOG_PANEL_ALPHA));
    Rectangle::new(LOG_PANEL_POS, LOG_PANEL_SIZE)
        .into_styled(panel_fill)
        .draw(display)
        .ok();

    for (i, line) in log.iter().enumerate() {
        let text = truncate_line(line);
        Text::with_text_style(&text, Point::new(LOG_TEXT_X, log_line_y(i)), LOG_STYLE, TOP_LEFT)
            .draw(display)
            .ok();
    }
}

fn draw_logo<D>(display: &mut D, logo: &Bitmap, position: Vec2)
where
    D: DrawTarget<Color = Rgb888>,
{
    let top_left = Point::new(position.x.round() as i32, position.y.round() as i32);
    Image::new(logo, top_left).draw(display).ok();
}

fn draw_status<D>(display: &mut D, fps: f32, speed: f64)
where
    D: DrawTarget<Color = Rgb888>,
{
    let mut status: String<128> = String::new();
    let _ = write!(
        status,
        "FPS: {fps:.1} | Speed: {speed:.1} | [F] fullscreen | [ESC] exit fullscreen | [J] slower | [L] faster"
    );
    Text::with_text_style(&status, STATUS_POS, STATUS_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
}
