//! DVD screensaver library - everything except the window.
//!
//! This library contains the animation, logging and drawing logic. The binary
//! (`main.rs`) owns the simulator window and the frame loop and drives this
//! library once per frame, so everything here can be tested on the host
//! without opening a window.
//!
//! # Testing
//!
//! ```bash
//! cargo test --lib
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Configuration ===
pub mod config;

// === Graphics ===
pub mod bitmap;
pub mod colors;
pub mod logo;
pub mod overlay;
pub mod styles;

// === Animation and input ===
pub mod input;
pub mod motion;
pub mod screensaver;

// === Diagnostics ===
pub mod fps;
pub mod log;

pub use screensaver::{Screensaver, TickOutcome};
