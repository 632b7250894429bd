//! The screensaver state machine.
//!
//! [`Screensaver`] owns everything that changes from frame to frame: the
//! logo's motion, the palette index, the current logo bitmap, the fullscreen
//! flag and the key latches. The host calls [`Screensaver::update`] once per
//! frame with the keys currently held, then draws.
//!
//! # Tick Order
//!
//! 1. Integrate position.
//! 2. Keys, edge-triggered: fullscreen toggle, exit fullscreen (only while
//!    fullscreen), slower, faster. Speed changes are only logged when the
//!    clamped speed actually changed.
//! 3. Horizontal edge check. A hit advances the color, regenerates the logo
//!    and logs a bounce.
//! 4. Vertical edge check, same as above. A corner hit therefore advances the
//!    color twice and logs two bounces in one tick.
//!
//! A speed change and a bounce in the same tick log the speed change first,
//! and the bounce line shows the rescaled velocity.
//!
//! Logging goes to the [`LogSink`] passed to `update`; the state machine
//! never reads it back.

use std::time::Duration;

use embedded_graphics::prelude::Size;

use crate::bitmap::Bitmap;
use crate::colors::{PALETTE, PaletteEntry, next_index};
use crate::config::SpeedConfig;
use crate::input::{KeyLatches, Keys};
use crate::log::{FullscreenCause, LogEvent, LogSink};
use crate::logo::{DvdLogoRenderer, LogoRenderer};
use crate::motion::{Arena, Edge, MotionState};

/// What the host has to act on after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// New fullscreen state, if it changed this tick.
    pub fullscreen: Option<bool>,
    /// Number of edges hit this tick (0, 1 or 2).
    pub bounces: u8,
}

/// Bouncing logo plus its controls.
pub struct Screensaver<R: LogoRenderer = DvdLogoRenderer> {
    motion: MotionState,
    config: SpeedConfig,
    arena: Arena,
    logo_size: Size,
    color_index: usize,
    logo: Bitmap,
    renderer: R,
    latches: KeyLatches,
    fullscreen: bool,
}

impl<R: LogoRenderer> Screensaver<R> {
    /// Screensaver in the default arena, starting with the first palette color.
    pub fn new(motion: MotionState, config: SpeedConfig, renderer: R) -> Self {
        Self::with_arena(motion, config, renderer, Arena::DEFAULT)
    }

    /// Screensaver bouncing inside a custom arena.
    pub fn with_arena(motion: MotionState, config: SpeedConfig, renderer: R, arena: Arena) -> Self {
        let logo_size = Size::new(arena.logo_width as u32, arena.logo_height as u32);
        let logo = renderer.create_logo(logo_size, PALETTE[0].color);
        Self {
            motion,
            config,
            arena,
            logo_size,
            color_index: 0,
            logo,
            renderer,
            latches: KeyLatches::new(),
            fullscreen: false,
        }
    }

    /// Advance one frame.
    ///
    /// `held` is the set of keys held right now, `elapsed` the time since
    /// start (used only to timestamp log entries).
    pub fn update<L: LogSink + ?Sized>(&mut self, held: Keys, elapsed: Duration, log: &mut L) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        self.motion.integrate();

        let pressed = self.latches.sample(held);
        if pressed.toggle_fullscreen {
            self.fullscreen = !self.fullscreen;
            outcome.fullscreen = Some(self.fullscreen);
            log.log(
                elapsed,
                LogEvent::Fullscreen {
                    cause: FullscreenCause::Toggled,
                    enabled: self.fullscreen,
                },
            );
        }
        if pressed.exit_fullscreen && self.fullscreen {
            self.fullscreen = false;
            outcome.fullscreen = Some(false);
            log.log(
                elapsed,
                LogEvent::Fullscreen {
                    cause: FullscreenCause::Exited,
                    enabled: false,
                },
            );
        }
        if pressed.slower
            && let Some(change) = self.motion.slow_down(&self.config)
        {
            log.log(elapsed, LogEvent::SpeedChanged(change));
        }
        if pressed.faster
            && let Some(change) = self.motion.speed_up(&self.config)
        {
            log.log(elapsed, LogEvent::SpeedChanged(change));
        }

        if let Some(edge) = self.motion.bounce_horizontal(&self.arena) {
            self.on_bounce(edge, elapsed, log);
            outcome.bounces += 1;
        }
        if let Some(edge) = self.motion.bounce_vertical(&self.arena) {
            self.on_bounce(edge, elapsed, log);
            outcome.bounces += 1;
        }

        outcome
    }

    fn on_bounce<L: LogSink + ?Sized>(&mut self, edge: Edge, elapsed: Duration, log: &mut L) {
        self.color_index = next_index(self.color_index);
        let color = self.color();
        self.logo = self.renderer.create_logo(self.logo_size, color.color);
        log.log(
            elapsed,
            LogEvent::Bounce {
                edge,
                position: self.motion.position,
                velocity: self.motion.velocity,
                color,
            },
        );
    }

    /// Startup snapshot for the log.
    pub fn initial_state_event(&self) -> LogEvent {
        LogEvent::InitialState {
            position: self.motion.position,
            velocity: self.motion.velocity,
            speed: self.motion.speed(),
            color: self.color(),
        }
    }

    #[inline]
    pub const fn motion(&self) -> &MotionState {
        &self.motion
    }

    #[inline]
    pub const fn speed(&self) -> f64 {
        self.motion.speed()
    }

    #[inline]
    pub const fn color_index(&self) -> usize {
        self.color_index
    }

    /// Current logo color.
    #[inline]
    pub const fn color(&self) -> PaletteEntry {
        PALETTE[self.color_index]
    }

    /// Logo bitmap for the current color.
    #[inline]
    pub const fn logo(&self) -> &Bitmap {
        &self.logo
    }

    #[inline]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embedded_graphics::pixelcolor::Rgb888;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::colors::PALETTE_SIZE;
    use crate::config::{LOGO_HEIGHT, LOGO_WIDTH};
    use crate::log::LogEntry;
    use crate::logo::create_dvd_logo;
    use crate::motion::{SpeedChange, Vec2};

    const TICK: Duration = Duration::from_millis(16);
    const LOGO_SIZE: Size = Size::new(LOGO_WIDTH, LOGO_HEIGHT);

    fn screensaver_at(x: f64, y: f64, vx: f64, vy: f64, speed: f64) -> Screensaver {
        let motion = MotionState::new(Vec2::new(x, y), Vec2::new(vx, vy), speed);
        Screensaver::new(motion, SpeedConfig::default(), DvdLogoRenderer)
    }

    fn press(keys: Keys) -> [Keys; 2] {
        [keys, Keys::NONE]
    }

    const F: Keys = Keys {
        toggle_fullscreen: true,
        ..Keys::NONE
    };
    const ESC: Keys = Keys {
        exit_fullscreen: true,
        ..Keys::NONE
    };
    const J: Keys = Keys {
        slower: true,
        ..Keys::NONE
    };
    const L: Keys = Keys {
        faster: true,
        ..Keys::NONE
    };

    /// Renderer that counts how often it is asked for a logo.
    struct CountingRenderer {
        calls: Cell<usize>,
    }

    impl LogoRenderer for CountingRenderer {
        fn create_logo(&self, size: Size, fill: Rgb888) -> Bitmap {
            self.calls.set(self.calls.get() + 1);
            create_dvd_logo(size, fill)
        }
    }

    #[test]
    fn test_initial_state() {
        let saver = screensaver_at(100.0, 100.0, 2.0, 2.0, 3.0);
        assert_eq!(saver.color_index(), 0);
        assert_eq!(saver.color(), PALETTE[0]);
        assert_eq!(saver.logo(), &create_dvd_logo(LOGO_SIZE, PALETTE[0].color));
        assert!(!saver.is_fullscreen());
        assert_eq!(saver.speed(), 3.0);
    }

    #[test]
    fn test_open_space_tick() {
        let mut saver = screensaver_at(100.0, 100.0, 2.0, -1.5, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();
        let outcome = saver.update(Keys::NONE, TICK, &mut log);
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(saver.motion().position, Vec2::new(102.0, 98.5));
        assert!(log.is_empty());
    }

    #[test]
    fn test_corner_hit_counts_twice() {
        let mut saver = screensaver_at(0.0, 0.0, -1.0, -1.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();
        let outcome = saver.update(Keys::NONE, TICK, &mut log);

        assert_eq!(outcome.bounces, 2);
        assert_eq!(saver.motion().velocity, Vec2::new(1.0, 1.0));
        assert_eq!(saver.color_index(), 2);
        assert_eq!(saver.logo(), &create_dvd_logo(LOGO_SIZE, PALETTE[2].color));

        let edges: Vec<_> = log
            .iter()
            .map(|entry| match &entry.event {
                LogEvent::Bounce { edge, .. } => *edge,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(edges, [Edge::Left, Edge::Top]);
    }

    #[test]
    fn test_bounce_log_has_new_state() {
        let mut saver = screensaver_at(679.0, 300.0, 2.0, 1.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();
        saver.update(Keys::NONE, Duration::from_millis(1_500), &mut log);

        assert_eq!(
            log,
            [LogEntry::new(
                Duration::from_millis(1_500),
                LogEvent::Bounce {
                    edge: Edge::Right,
                    position: Vec2::new(681.0, 301.0),
                    velocity: Vec2::new(-2.0, 1.0),
                    color: PALETTE[1],
                },
            )]
        );
    }

    #[test]
    fn test_speed_change_logged_before_bounce() {
        let mut saver = screensaver_at(679.0, 300.0, 2.0, 0.0, 2.0);
        let mut log: Vec<LogEntry> = Vec::new();
        let outcome = saver.update(L, TICK, &mut log);

        assert_eq!(outcome.bounces, 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event, LogEvent::SpeedChanged(SpeedChange { from: 2.0, to: 2.5 }));
        assert_eq!(
            log[1].event,
            LogEvent::Bounce {
                edge: Edge::Right,
                position: Vec2::new(681.0, 300.0),
                velocity: Vec2::new(-2.5, 0.0),
                color: PALETTE[1],
            }
        );
    }

    #[test]
    fn test_logo_regenerated_per_bounce() {
        let renderer = CountingRenderer { calls: Cell::new(0) };
        let motion = MotionState::new(Vec2::new(0.0, 0.0), Vec2::new(-1.0, -1.0), 3.0);
        let mut saver = Screensaver::new(motion, SpeedConfig::default(), renderer);
        assert_eq!(saver.renderer.calls.get(), 1);

        saver.update(Keys::NONE, TICK, &mut Vec::<LogEntry>::new());
        assert_eq!(saver.renderer.calls.get(), 3);
    }

    #[test]
    fn test_palette_wraps_after_eight_bounces() {
        // Narrow arena: the logo hits a side wall every other tick.
        let arena = Arena {
            width: 10.0,
            height: 1000.0,
            logo_width: 8.0,
            logo_height: 10.0,
        };
        let motion = MotionState::new(Vec2::new(1.0, 500.0), Vec2::new(1.0, 0.0), 1.0);
        let mut saver = Screensaver::with_arena(motion, SpeedConfig::default(), DvdLogoRenderer, arena);

        let mut seen = vec![saver.color_index()];
        let mut bounces = 0;
        for _ in 0..100 {
            bounces += saver.update(Keys::NONE, TICK, &mut Vec::<LogEntry>::new()).bounces as usize;
            if bounces > seen.len() - 1 {
                seen.push(saver.color_index());
            }
            if bounces == PALETTE_SIZE {
                break;
            }
        }
        assert_eq!(bounces, PALETTE_SIZE);
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn test_slower_at_min_speed_is_silent() {
        let mut saver = screensaver_at(300.0, 300.0, 0.3, 0.4, 0.5);
        let mut log: Vec<LogEntry> = Vec::new();
        saver.update(J, TICK, &mut log);
        assert_eq!(saver.speed(), 0.5);
        assert!(log.is_empty());
    }

    #[test]
    fn test_speed_keys_log_changes() {
        let mut saver = screensaver_at(300.0, 300.0, 3.0, 0.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();
        for keys in press(L).into_iter().chain(press(L)).chain(press(J)) {
            saver.update(keys, TICK, &mut log);
        }
        assert_eq!(saver.speed(), 3.5);
        let lines: Vec<_> = log.iter().map(|e| e.event.to_string()).collect();
        assert_eq!(
            lines,
            [
                "Speed increased from 3.0 to 3.5",
                "Speed increased from 3.5 to 4.0",
                "Speed decreased from 4.0 to 3.5",
            ]
        );
        assert!((saver.motion().velocity.x - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_held_key_acts_once() {
        let mut saver = screensaver_at(300.0, 300.0, 1.0, 1.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();
        for _ in 0..10 {
            saver.update(L, TICK, &mut log);
        }
        assert_eq!(saver.speed(), 3.5);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_fullscreen_toggle() {
        let mut saver = screensaver_at(300.0, 300.0, 1.0, 1.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();

        assert_eq!(saver.update(F, TICK, &mut log).fullscreen, Some(true));
        assert_eq!(saver.update(F, TICK, &mut log).fullscreen, None);
        assert!(saver.is_fullscreen());
        assert_eq!(saver.update(Keys::NONE, TICK, &mut log).fullscreen, None);
        assert_eq!(saver.update(F, TICK, &mut log).fullscreen, Some(false));
        assert!(!saver.is_fullscreen());

        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event.to_string(), "Fullscreen toggled: true");
        assert_eq!(log[1].event.to_string(), "Fullscreen toggled: false");
    }

    #[test]
    fn test_escape_only_when_fullscreen() {
        let mut saver = screensaver_at(300.0, 300.0, 1.0, 1.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();

        for keys in press(ESC) {
            assert_eq!(saver.update(keys, TICK, &mut log).fullscreen, None);
        }
        assert!(log.is_empty());

        saver.update(F, TICK, &mut log);
        saver.update(Keys::NONE, TICK, &mut log);
        assert_eq!(saver.update(ESC, TICK, &mut log).fullscreen, Some(false));
        assert!(!saver.is_fullscreen());
        assert_eq!(
            log.last().map(|e| &e.event),
            Some(&LogEvent::Fullscreen {
                cause: FullscreenCause::Exited,
                enabled: false,
            })
        );
    }

    #[test]
    fn test_toggle_and_escape_same_tick() {
        let mut saver = screensaver_at(300.0, 300.0, 1.0, 1.0, 3.0);
        let mut log: Vec<LogEntry> = Vec::new();
        let both = Keys {
            toggle_fullscreen: true,
            exit_fullscreen: true,
            ..Keys::NONE
        };
        assert_eq!(saver.update(both, TICK, &mut log).fullscreen, Some(false));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_initial_state_event() {
        let saver = screensaver_at(10.0, 20.0, 1.0, -2.0, 3.0);
        assert_eq!(
            saver.initial_state_event().to_string(),
            "Initial position: (10.00, 20.00), velocity: (1.00, -2.00), speed: 3.0, color: Red (255, 0, 0)"
        );
    }

    proptest! {
        #[test]
        fn color_tracks_bounce_count(seed in any::<u64>(), ticks in 1usize..2_000) {
            let mut rng = StdRng::seed_from_u64(seed);
            let motion = MotionState::random(&mut rng, 7.5, &Arena::DEFAULT);
            let mut saver = Screensaver::new(motion, SpeedConfig::default(), DvdLogoRenderer);
            let mut log: Vec<LogEntry> = Vec::new();

            let mut bounces = 0usize;
            for _ in 0..ticks {
                bounces += saver.update(Keys::NONE, TICK, &mut log).bounces as usize;
            }
            prop_assert_eq!(saver.color_index(), bounces % PALETTE_SIZE);
            prop_assert_eq!(log.len(), bounces);
        }

        #[test]
        fn overshoot_is_bounded(seed in any::<u64>(), ticks in 1usize..2_000) {
            let mut rng = StdRng::seed_from_u64(seed);
            let arena = Arena::DEFAULT;
            let motion = MotionState::random(&mut rng, 10.0, &arena);
            let mut saver = Screensaver::new(motion, SpeedConfig::default(), DvdLogoRenderer);

            for _ in 0..ticks {
                saver.update(Keys::NONE, TICK, &mut Vec::<LogEntry>::new());
                let m = saver.motion();
                let (vx, vy) = (m.velocity.x.abs(), m.velocity.y.abs());
                prop_assert!(m.position.x >= -vx - 1e-9);
                prop_assert!(m.position.y >= -vy - 1e-9);
                prop_assert!(m.position.x + arena.logo_width <= arena.width + vx + 1e-9);
                prop_assert!(m.position.y + arena.logo_height <= arena.height + vy + 1e-9);
            }
        }
    }
}
