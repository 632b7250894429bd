//! Desktop window backed by `embedded-graphics-simulator` (SDL2).
//!
//! Owns the logical 800x600 display, the SDL window and the set of keys
//! currently held.
//!
//! # Key Bindings
//!
//! | Key      | Action            |
//! |----------|-------------------|
//! | `F`      | Toggle fullscreen |
//! | `Escape` | Exit fullscreen   |
//! | `J`      | Slower            |
//! | `L`      | Faster            |
//!
//! # Fullscreen
//!
//! The simulator cannot switch an SDL window to native fullscreen. Instead the
//! window is rebuilt with a larger output scale; the logical display size never
//! changes, so nothing else has to know.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use dvd_screensaver::colors::BACKGROUND;
use dvd_screensaver::config::{SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_TITLE};
use dvd_screensaver::input::Keys;

/// Output scale in windowed mode.
const WINDOWED_SCALE: u32 = 1;

/// Output scale standing in for fullscreen.
const FULLSCREEN_SCALE: u32 = 2;

pub struct SimulatorHost {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
    held: Keys,
    fullscreen: bool,
}

impl SimulatorHost {
    /// Create the display and open a windowed SDL window.
    pub fn open() -> Self {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        display.clear(BACKGROUND).ok();
        let mut window = new_window(WINDOWED_SCALE);
        window.update(&display);
        Self {
            display,
            window,
            held: Keys::NONE,
            fullscreen: false,
        }
    }

    /// Drain pending window events.
    ///
    /// Returns `false` once the window has been closed.
    pub fn poll_events(&mut self) -> bool {
        for event in self.window.events() {
            match event {
                SimulatorEvent::Quit => return false,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // OS key repeat is not a new press
                    if !repeat {
                        set_key(&mut self.held, keycode, true);
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => set_key(&mut self.held, keycode, false),
                _ => {}
            }
        }
        true
    }

    /// Keys held after the last [`poll_events`](Self::poll_events).
    #[inline]
    pub const fn held_keys(&self) -> Keys {
        self.held
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut SimulatorDisplay<Rgb888> {
        &mut self.display
    }

    /// Show the display contents in the window.
    pub fn present(&mut self) {
        self.window.update(&self.display);
    }

    /// Switch between windowed and (scaled) fullscreen mode.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        let scale = if fullscreen { FULLSCREEN_SCALE } else { WINDOWED_SCALE };
        replace_window(&mut self.window, new_window(scale), |window| window.update(&self.display));
        // The new window never sees the release of keys held during the switch.
        self.held = Keys::NONE;
    }
}

/// Create a window. The SDL window is only opened by its first `update`.
fn new_window(scale: u32) -> Window {
    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    Window::new(WINDOW_TITLE, &output_settings)
}

/// Store `next` in `slot`, then show it.
///
/// SDL allows a single event pump per process, so the old window (and its
/// pump) must be dropped before the new one opens its own.
fn replace_window<W>(slot: &mut W, next: W, show: impl FnOnce(&mut W)) {
    *slot = next;
    show(slot);
}

/// Record a key press or release.
fn set_key(held: &mut Keys, keycode: Keycode, pressed: bool) {
    match keycode {
        Keycode::F => held.toggle_fullscreen = pressed,
        Keycode::Escape => held.exit_fullscreen = pressed,
        Keycode::J => held.slower = pressed,
        Keycode::L => held.faster = pressed,
        _ => {}
    }
}
