//! Application configuration constants.
//!
//! Window and logo geometry are fixed at compile time. The only structured
//! configuration is [`SpeedConfig`], which bounds the logo speed and sets the
//! step applied by the speed keys.
//!
//! Layout values derived from the screen size (log panel position, line
//! spacing) are also `const` so the overlay never recomputes them per frame.

use core::fmt;
use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: u32 = 800;

/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 600;

/// Logo bitmap width in pixels.
pub const LOGO_WIDTH: u32 = 120;

/// Logo bitmap height in pixels.
pub const LOGO_HEIGHT: u32 = 60;

/// Title of the desktop window.
pub const WINDOW_TITLE: &str = "DVD Screensaver";

// =============================================================================
// Motion Configuration
// =============================================================================

/// Speed the logo starts with, before any key presses.
pub const INITIAL_SPEED: f64 = 3.0;

/// Target frame time (60 ticks per second). The main loop sleeps if a frame
/// completes early.
pub const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

// =============================================================================
// Logging Configuration
// =============================================================================

/// File the event log is written to. Created fresh on every run.
pub const LOG_FILE_NAME: &str = "dvd_screensaver.log";

/// Draw the most recent log lines behind the logo.
pub const SHOW_LOGS_IN_APP: bool = true;

/// Number of log lines kept for the on-screen panel.
pub const MAX_LOG_LINES: usize = 10;

/// Maximum bytes stored per on-screen log line.
pub const LOG_LINE_LENGTH: usize = 160;

/// Lines longer than this are drawn shortened with a trailing `...`.
pub const OVERLAY_LINE_CHARS: usize = 100;

/// Vertical distance between two on-screen log lines.
pub const LOG_LINE_SPACING: u32 = 20;

/// Height of the log panel at the bottom of the screen.
pub const LOG_PANEL_HEIGHT: u32 = LOG_LINE_SPACING * MAX_LOG_LINES as u32;

// =============================================================================
// Speed Limits
// =============================================================================

/// Bounds for the logo speed and the step used by the speed keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedConfig {
    /// Lowest allowed speed; keeps the logo from stopping.
    pub min_speed: f64,
    /// Highest allowed speed.
    pub max_speed: f64,
    /// Amount added or removed per key press.
    pub speed_step: f64,
}

impl SpeedConfig {
    /// Build a validated speed configuration.
    pub fn new(min_speed: f64, max_speed: f64, speed_step: f64) -> Result<Self, ConfigError> {
        if !(min_speed.is_finite() && max_speed.is_finite() && speed_step.is_finite()) {
            return Err(ConfigError::NonFinite);
        }
        if min_speed <= 0.0 {
            return Err(ConfigError::NonPositiveMinSpeed);
        }
        if min_speed > max_speed {
            return Err(ConfigError::InvertedRange);
        }
        if speed_step <= 0.0 {
            return Err(ConfigError::NonPositiveStep);
        }
        Ok(Self {
            min_speed,
            max_speed,
            speed_step,
        })
    }

    /// Clamp `speed` into `[min_speed, max_speed]`.
    #[inline]
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.clamp(self.min_speed, self.max_speed)
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            min_speed: 0.5,
            max_speed: 10.0,
            speed_step: 0.5,
        }
    }
}

/// Rejected [`SpeedConfig`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonFinite,
    NonPositiveMinSpeed,
    InvertedRange,
    NonPositiveStep,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite => fmt::Display::fmt("speed limits must be finite", f),
            ConfigError::NonPositiveMinSpeed => fmt::Display::fmt("minimum speed must be positive", f),
            ConfigError::InvertedRange => {
                fmt::Display::fmt("minimum speed is larger than maximum speed", f)
            }
            ConfigError::NonPositiveStep => fmt::Display::fmt("speed step must be positive", f),
        }
    }
}

impl std::error::Error for ConfigError {}
