//! Logo motion: position, velocity and speed.
//!
//! One call to [`MotionState::integrate`] is one tick (one frame). After
//! integrating, each axis is checked on its own:
//!
//! | Condition                         | Edge     |
//! |-----------------------------------|----------|
//! | `x <= 0`                          | `Left`   |
//! | `x + logo_width >= width`         | `Right`  |
//! | `y <= 0`                          | `Top`    |
//! | `y + logo_height >= height`       | `Bottom` |
//!
//! A hit flips the sign of that axis' velocity. Position is never clamped;
//! the logo can overshoot an edge by at most one tick's displacement before
//! the reversed velocity brings it back.
//!
//! # Speed
//!
//! `speed` is the magnitude the speed keys adjust. Changing it rescales both
//! velocity components by `new / old`, so the direction is unchanged.

use core::f64::consts::TAU;
use core::fmt;

use rand::Rng;

use crate::config::{LOGO_HEIGHT, LOGO_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, SpeedConfig};

/// A 2D vector in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Angle of the vector in radians.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Screen edge hit by the logo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        };
        fmt::Display::fmt(name, f)
    }
}

/// Area the logo bounces in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub logo_width: f64,
    pub logo_height: f64,
}

impl Arena {
    /// The configured screen with the configured logo.
    pub const DEFAULT: Self = Self {
        width: SCREEN_WIDTH as f64,
        height: SCREEN_HEIGHT as f64,
        logo_width: LOGO_WIDTH as f64,
        logo_height: LOGO_HEIGHT as f64,
    };
}

impl Default for Arena {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Speed before and after a speed key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedChange {
    pub from: f64,
    pub to: f64,
}

impl SpeedChange {
    #[inline]
    pub fn is_increase(&self) -> bool {
        self.to > self.from
    }
}

/// Position, velocity and speed of the logo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Top-left corner of the logo.
    pub position: Vec2,
    /// Displacement per tick.
    pub velocity: Vec2,
    speed: f64,
}

impl MotionState {
    pub const fn new(position: Vec2, velocity: Vec2, speed: f64) -> Self {
        Self {
            position,
            velocity,
            speed,
        }
    }

    /// Random start inside the arena, heading in a random direction.
    ///
    /// Velocity components slower than one pixel per tick are raised to
    /// exactly one (keeping their sign) so the logo never crawls along an
    /// edge.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, speed: f64, arena: &Arena) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let mut velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
        if velocity.x.abs() < 1.0 {
            velocity.x = 1.0f64.copysign(velocity.x);
        }
        if velocity.y.abs() < 1.0 {
            velocity.y = 1.0f64.copysign(velocity.y);
        }

        let max_x = (arena.width - arena.logo_width).max(1.0) as u32;
        let max_y = (arena.height - arena.logo_height).max(1.0) as u32;
        let position = Vec2::new(
            f64::from(rng.gen_range(0..max_x)),
            f64::from(rng.gen_range(0..max_y)),
        );

        Self::new(position, velocity, speed)
    }

    /// Current speed scalar.
    #[inline]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Advance position by one tick of velocity.
    #[inline]
    pub fn integrate(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
    }

    /// Reflect off the left or right edge if the logo touches it.
    pub fn bounce_horizontal(&mut self, arena: &Arena) -> Option<Edge> {
        let edge = if self.position.x <= 0.0 {
            Edge::Left
        } else if self.position.x + arena.logo_width >= arena.width {
            Edge::Right
        } else {
            return None;
        };
        self.velocity.x = -self.velocity.x;
        Some(edge)
    }

    /// Reflect off the top or bottom edge if the logo touches it.
    pub fn bounce_vertical(&mut self, arena: &Arena) -> Option<Edge> {
        let edge = if self.position.y <= 0.0 {
            Edge::Top
        } else if self.position.y + arena.logo_height >= arena.height {
            Edge::Bottom
        } else {
            return None;
        };
        self.velocity.y = -self.velocity.y;
        Some(edge)
    }

    /// Add `delta` to the speed, clamped to the configured range.
    ///
    /// Returns `None` when the clamped speed equals the old one. Velocity is
    /// rescaled only when the old speed was positive.
    pub fn adjust_speed(&mut self, delta: f64, config: &SpeedConfig) -> Option<SpeedChange> {
        let from = self.speed;
        let to = config.clamp(from + delta);
        if to == from {
            return None;
        }
        self.speed = to;
        if from > 0.0 {
            let ratio = to / from;
            self.velocity.x *= ratio;
            self.velocity.y *= ratio;
        }
        Some(SpeedChange { from, to })
    }

    /// Lower the speed by one step.
    #[inline]
    pub fn slow_down(&mut self, config: &SpeedConfig) -> Option<SpeedChange> {
        self.adjust_speed(-config.speed_step, config)
    }

    /// Raise the speed by one step.
    #[inline]
    pub fn speed_up(&mut self, config: &SpeedConfig) -> Option<SpeedChange> {
        self.adjust_speed(config.speed_step, config)
    }
}
