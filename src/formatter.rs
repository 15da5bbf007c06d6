//! Log line layout: wall time, round and frame stamps, level, target and fields.
//!
//! ```text
//! 14:02:11.48213 R03 F01A4  INFO distortus::systems::state: Target reached, round won eaten=30
//! ```
//!
//! Round and frame numbers live in process-wide counters so lines written from
//! any system can be tied back to the frame that produced them.

use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);
static ROUND_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Only the low 16 bits of the frame number are shown.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Stamps every event with the current round and frame.
pub struct FrameFormatter;

impl<S, N> FormatEvent<S, N> for FrameFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let ansi = writer.has_ansi_escapes();
        let meta = event.metadata();

        let now = OffsetDateTime::now_utc()
            .format(&TIMESTAMP_FORMAT)
            .map_err(|_| fmt::Error)?;
        let stamp = Stamp::current();

        if ansi {
            write!(writer, "{DIM}{now} {stamp}{RESET} ")?;
        } else {
            write!(writer, "{now} {stamp} ")?;
        }

        let (color, label) = level_style(meta.level());
        if ansi {
            write!(writer, "{color}{label}{RESET} {DIM}{}:{RESET} ", meta.target())?;
        } else {
            write!(writer, "{label} {}: ", meta.target())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Round and frame numbers as printed at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub round: u32,
    pub frame: u64,
}

impl Stamp {
    pub fn current() -> Self {
        Self {
            round: round_number(),
            frame: frame_count(),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{:02} F{:04X}", self.round, self.frame & FRAME_DISPLAY_MASK)
    }
}

/// ANSI color and a right-aligned, five-column label.
fn level_style(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    }
}

/// Advances the frame number shown in log lines. Called once per host frame.
pub fn increment_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}

/// Marks the start of a new round; called on every start and restart.
pub fn begin_round() {
    ROUND_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn round_number() -> u32 {
    ROUND_COUNTER.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn test_stamp_layout() {
        let stamp = Stamp { round: 3, frame: 0x1_01A4 };
        assert_that(&stamp.to_string()).is_equal_to("R03 F01A4".to_string());
    }

    #[test]
    fn test_counters_only_move_forward() {
        let before = Stamp::current();
        increment_frame();
        begin_round();
        let after = Stamp::current();
        assert_that(&(after.frame - before.frame)).is_greater_than_or_equal_to(1);
        assert_that(&(after.round - before.round)).is_greater_than_or_equal_to(1);
    }

    #[test]
    fn test_level_labels_share_a_width() {
        for level in [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR] {
            assert_that(&level_style(&level).1.len()).is_equal_to(5);
        }
    }
}
