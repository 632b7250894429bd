// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // f64->i32 pixel positions
#![allow(clippy::cast_precision_loss)] // u32->f32 in FPS calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 for screen coordinates

//! DVD logo screensaver.
//!
//! A colored "DVD" logo bounces around an 800x600 window. Every edge hit
//! reverses the logo's direction on that axis and switches it to the next
//! color of an 8-color palette.
//!
//! # Controls
//!
//! | Key      | Action            |
//! |----------|-------------------|
//! | `F`      | Toggle fullscreen |
//! | `Escape` | Exit fullscreen   |
//! | `J`      | Slower            |
//! | `L`      | Faster            |
//!
//! # Logging
//!
//! Bounces, fullscreen changes and speed changes are logged with the time
//! since start to:
//! - `dvd_screensaver.log` in the working directory (recreated every run)
//! - the console, through `tracing`
//! - a panel at the bottom of the window showing the last 10 lines
//!
//! Failing to create the log file is the only fatal error.
//!
//! # Frame Loop
//!
//! ```text
//! poll events -> update -> FPS -> draw -> present -> sleep (rest of 1/60 s)
//! ```

mod host;

use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use dvd_screensaver::Screensaver;
use dvd_screensaver::config::{FRAME_TIME, INITIAL_SPEED, LOG_FILE_NAME, SCREEN_HEIGHT, SCREEN_WIDTH, SpeedConfig};
use dvd_screensaver::fps::FpsCounter;
use dvd_screensaver::log::{EventLog, LogEvent, LogSink};
use dvd_screensaver::logo::DvdLogoRenderer;
use dvd_screensaver::motion::{Arena, MotionState};
use dvd_screensaver::overlay::{FrameView, draw_frame};
use host::SimulatorHost;
use tracing::{Level, error};
use tracing_subscriber::util::SubscriberInitExt;

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .compact()
        .finish()
        .init();
}

fn main() {
    setup_logging();

    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let start = Instant::now();

    let mut log = EventLog::create(LOG_FILE_NAME)
        .with_context(|| format!("failed to create log file {LOG_FILE_NAME}"))?;
    log.log(start.elapsed(), LogEvent::started_now());

    // ==========================================================================
    // Initial State
    // ==========================================================================

    let motion = MotionState::random(&mut rand::thread_rng(), INITIAL_SPEED, &Arena::DEFAULT);
    let mut saver = Screensaver::new(motion, SpeedConfig::default(), DvdLogoRenderer);
    log.log(start.elapsed(), saver.initial_state_event());

    let mut host = SimulatorHost::open();
    log.log(
        start.elapsed(),
        LogEvent::WindowCreated {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        },
    );

    let mut fps = FpsCounter::new(Instant::now());

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    log.log(start.elapsed(), LogEvent::LoopStarted);

    while host.poll_events() {
        let frame_start = Instant::now();

        let outcome = saver.update(host.held_keys(), start.elapsed(), &mut log);
        if let Some(fullscreen) = outcome.fullscreen {
            host.set_fullscreen(fullscreen);
        }

        let current_fps = fps.tick(frame_start);

        let frame = FrameView {
            logo: saver.logo(),
            position: saver.motion().position,
            speed: saver.speed(),
            fps: current_fps,
            log: log.overlay(),
        };
        draw_frame(host.display_mut(), &frame);
        host.present();

        // Frame rate limiting
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    log.log(start.elapsed(), LogEvent::LoopEnded);
    Ok(())
}
