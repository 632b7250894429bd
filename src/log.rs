//! Event log with timestamps for the file, the console and the on-screen panel.
//!
//! Every notable event (bounce, fullscreen change, speed change, startup and
//! shutdown) becomes a [`LogEntry`]: the time since start plus a structured
//! [`LogEvent`]. Entries render as one line:
//!
//! ```text
//! [1.234s] BOUNCE: Left edge hit at position (-0.42, 311.80), new velocity: (2.12, 2.12), new color: Green (0, 255, 0)
//! ```
//!
//! # Sinks
//!
//! Anything implementing [`LogSink`] can receive entries. The screensaver only
//! sees the trait, so tests capture entries in a `Vec<LogEntry>` while the
//! application passes an [`EventLog`], which fans each entry out to:
//!
//! - [`WriterSink`]: the log file, one line per entry
//! - [`ConsoleSink`]: `tracing` events printed by the console subscriber
//! - [`LogBuffer`]: the last [`MAX_LOG_LINES`] lines for the on-screen panel
//!
//! # Elapsed Time Format
//!
//! Durations are rounded to the millisecond and printed with the largest
//! units first, dropping trailing zero decimals: `0s`, `15ms`, `1.5s`,
//! `2m3.25s`, `1h0m7s`.

use core::fmt::{self, Write as _};
use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::time::Duration;

use heapless::{Deque, String};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

use crate::colors::PaletteEntry;
use crate::config::{LOG_LINE_LENGTH, MAX_LOG_LINES};
use crate::motion::{Edge, SpeedChange, Vec2};

// =============================================================================
// Elapsed Time
// =============================================================================

/// Display wrapper for a duration rounded to milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

impl Elapsed {
    /// Milliseconds, rounded to nearest.
    #[inline]
    pub fn as_millis_rounded(&self) -> u128 {
        (self.0.as_nanos() + 500_000) / 1_000_000
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.as_millis_rounded();
        if total_ms == 0 {
            return f.write_str("0s");
        }
        if total_ms < 1000 {
            return write!(f, "{total_ms}ms");
        }

        let ms = total_ms % 1000;
        let total_secs = total_ms / 1000;
        let (hours, mins, secs) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);

        if hours > 0 {
            write!(f, "{hours}h{mins}m")?;
        } else if mins > 0 {
            write!(f, "{mins}m")?;
        }
        write!(f, "{secs}")?;
        if ms > 0 {
            let mut frac: String<4> = String::new();
            let _ = write!(frac, "{ms:03}");
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        f.write_str("s")
    }
}

// =============================================================================
// Events
// =============================================================================

/// What triggered a fullscreen change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenCause {
    /// The fullscreen toggle key.
    Toggled,
    /// The exit key while in fullscreen.
    Exited,
}

/// Something worth logging.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    /// Wall-clock start time, printed as RFC 3339.
    Started {
        at: OffsetDateTime,
    },
    InitialState {
        position: Vec2,
        velocity: Vec2,
        speed: f64,
        color: PaletteEntry,
    },
    WindowCreated {
        width: u32,
        height: u32,
    },
    LoopStarted,
    Bounce {
        edge: Edge,
        position: Vec2,
        velocity: Vec2,
        color: PaletteEntry,
    },
    Fullscreen {
        cause: FullscreenCause,
        enabled: bool,
    },
    SpeedChanged(SpeedChange),
    LoopEnded,
}

impl LogEvent {
    /// Startup event stamped with the current UTC time, whole seconds.
    pub fn started_now() -> Self {
        let now = OffsetDateTime::now_utc();
        Self::Started {
            at: now.replace_nanosecond(0).unwrap_or(now),
        }
    }

    /// Short machine-friendly name, used as a structured field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::InitialState { .. } => "initial_state",
            Self::WindowCreated { .. } => "window_created",
            Self::LoopStarted => "loop_started",
            Self::Bounce { .. } => "bounce",
            Self::Fullscreen { .. } => "fullscreen",
            Self::SpeedChanged(_) => "speed_changed",
            Self::LoopEnded => "loop_ended",
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { at } => {
                let at = at.format(&Rfc3339).map_err(|_| fmt::Error)?;
                write!(f, "DVD Screensaver started at {at}")
            }
            Self::InitialState {
                position,
                velocity,
                speed,
                color,
            } => write!(
                f,
                "Initial position: {position}, velocity: {velocity}, speed: {speed:.1}, color: {color}"
            ),
            Self::WindowCreated { width, height } => {
                write!(f, "Window created with size {width}x{height}")
            }
            Self::LoopStarted => f.write_str("Starting frame loop"),
            Self::Bounce {
                edge,
                position,
                velocity,
                color,
            } => write!(
                f,
                "BOUNCE: {edge} edge hit at position {position}, new velocity: {velocity}, new color: {color}"
            ),
            Self::Fullscreen {
                cause: FullscreenCause::Toggled,
                enabled,
            } => write!(f, "Fullscreen toggled: {enabled}"),
            Self::Fullscreen {
                cause: FullscreenCause::Exited,
                enabled,
            } => write!(f, "Fullscreen exited with ESC key: {enabled}"),
            Self::SpeedChanged(change) => {
                let verb = if change.is_increase() { "increased" } else { "decreased" };
                write!(f, "Speed {verb} from {:.1} to {:.1}", change.from, change.to)
            }
            Self::LoopEnded => f.write_str("Window closed, shutting down"),
        }
    }
}

/// A timestamped event.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Time since the screensaver started.
    pub elapsed: Duration,
    pub event: LogEvent,
}

impl LogEntry {
    pub const fn new(elapsed: Duration, event: LogEvent) -> Self {
        Self { elapsed, event }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", Elapsed(self.elapsed), self.event)
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for log entries.
pub trait LogSink {
    fn write_entry(&mut self, entry: &LogEntry);

    /// Build and write an entry.
    fn log(&mut self, elapsed: Duration, event: LogEvent) {
        self.write_entry(&LogEntry::new(elapsed, event));
    }
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn write_entry(&mut self, entry: &LogEntry) {
        (**self).write_entry(entry);
    }
}

/// Collects entries in memory.
impl LogSink for Vec<LogEntry> {
    fn write_entry(&mut self, entry: &LogEntry) {
        self.push(entry.clone());
    }
}

/// Writes each entry as a line to an `io::Write`.
///
/// The first write error is reported through `tracing` and disables the sink;
/// the animation keeps running without file logging.
pub struct WriterSink<W: Write> {
    writer: W,
    failed: bool,
}

impl WriterSink<LineWriter<File>> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        File::create(path).map(|file| Self::new(LineWriter::new(file)))
    }
}

impl<W: Write> WriterSink<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    /// True once a write has failed.
    #[inline]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    pub const fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn write_entry(&mut self, entry: &LogEntry) {
        if self.failed {
            return;
        }
        if let Err(err) = writeln!(self.writer, "{entry}").and_then(|()| self.writer.flush()) {
            warn!(%err, "log file write failed, file logging disabled");
            self.failed = true;
        }
    }
}

/// Emits entries as `tracing` events for the console subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_entry(&mut self, entry: &LogEntry) {
        info!(
            kind = entry.event.kind(),
            elapsed_ms = entry.elapsed.as_millis() as u64,
            "{entry}"
        );
    }
}

// =============================================================================
// On-screen Log Buffer
// =============================================================================

/// `fmt::Write` adapter that keeps whole characters until the line is full.
struct Truncating<'a> {
    line: &'a mut String<LOG_LINE_LENGTH>,
    full: bool,
}

impl fmt::Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.full {
                break;
            }
            if self.line.push(c).is_err() {
                self.full = true;
            }
        }
        Ok(())
    }
}

/// Ring buffer of the most recent log lines.
///
/// Stores the last [`MAX_LOG_LINES`] lines. When full, the oldest line is
/// dropped before the new one is added.
pub struct LogBuffer {
    lines: Deque<String<LOG_LINE_LENGTH>, MAX_LOG_LINES>,
}

impl LogBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self { lines: Deque::new() }
    }

    /// Push a line, truncated to [`LOG_LINE_LENGTH`] bytes.
    pub fn push(&mut self, msg: &str) {
        self.push_fmt(format_args!("{msg}"));
    }

    fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        let _ = Truncating {
            line: &mut line,
            full: false,
        }
        .write_fmt(args);
        self.lines.push_back(line).ok();
    }

    /// Iterate over lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for LogBuffer {
    fn write_entry(&mut self, entry: &LogEntry) {
        self.push_fmt(format_args!("{entry}"));
    }
}

// =============================================================================
// Multi-destination Log
// =============================================================================

/// File, console and on-screen logging behind one [`LogSink`].
pub struct EventLog<W: Write> {
    file: WriterSink<W>,
    console: ConsoleSink,
    overlay: LogBuffer,
}

impl EventLog<LineWriter<File>> {
    /// Log to a freshly created file at `path`, the console and the overlay.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        WriterSink::create(path).map(Self::with_file)
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(writer: W) -> Self {
        Self::with_file(WriterSink::new(writer))
    }

    fn with_file(file: WriterSink<W>) -> Self {
        Self {
            file,
            console: ConsoleSink,
            overlay: LogBuffer::new(),
        }
    }

    /// Lines for the on-screen panel.
    #[inline]
    pub const fn overlay(&self) -> &LogBuffer {
        &self.overlay
    }

    #[inline]
    pub const fn file(&self) -> &WriterSink<W> {
        &self.file
    }
}

impl<W: Write> LogSink for EventLog<W> {
    fn write_entry(&mut self, entry: &LogEntry) {
        self.file.write_entry(entry);
        self.console.write_entry(entry);
        self.overlay.write_entry(entry);
    }
}

// =============================================================================
// Tests
// =============================================================================
