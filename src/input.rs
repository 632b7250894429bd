//! Edge-triggered keyboard input.
//!
//! The host reports which keys are currently held once per frame. Toggles
//! must fire once per press, not every frame while a key is held, so each
//! key keeps its state from the previous frame in a [`KeyLatch`].

/// The four keys the screensaver reacts to.
///
/// Used both for "currently held" (host input) and "just pressed" (latch
/// output).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    /// Toggle fullscreen (`F`).
    pub toggle_fullscreen: bool,
    /// Leave fullscreen (`Escape`).
    pub exit_fullscreen: bool,
    /// Decrease speed (`J`).
    pub slower: bool,
    /// Increase speed (`L`).
    pub faster: bool,
}

impl Keys {
    /// No key held.
    pub const NONE: Self = Self {
        toggle_fullscreen: false,
        exit_fullscreen: false,
        slower: false,
        faster: false,
    };

    #[inline]
    pub const fn any(&self) -> bool {
        self.toggle_fullscreen || self.exit_fullscreen || self.slower || self.faster
    }
}

/// Press detection for a single key.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyLatch {
    was_pressed: bool,
}

impl KeyLatch {
    /// Create a latch for a key that is not pressed.
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Returns true only on the frame the key goes from released to held.
    #[inline]
    pub fn just_pressed(&mut self, is_pressed: bool) -> bool {
        let pressed = is_pressed && !self.was_pressed;
        self.was_pressed = is_pressed;
        pressed
    }
}

/// One latch per monitored key.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyLatches {
    toggle_fullscreen: KeyLatch,
    exit_fullscreen: KeyLatch,
    slower: KeyLatch,
    faster: KeyLatch,
}

impl KeyLatches {
    pub const fn new() -> Self {
        Self {
            toggle_fullscreen: KeyLatch::new(),
            exit_fullscreen: KeyLatch::new(),
            slower: KeyLatch::new(),
            faster: KeyLatch::new(),
        }
    }

    /// Feed this frame's held keys, get the keys pressed this frame.
    pub fn sample(&mut self, held: Keys) -> Keys {
        Keys {
            toggle_fullscreen: self.toggle_fullscreen.just_pressed(held.toggle_fullscreen),
            exit_fullscreen: self.exit_fullscreen.just_pressed(held.exit_fullscreen),
            slower: self.slower.just_pressed(held.slower),
            faster: self.faster.just_pressed(held.faster),
        }
    }
}
