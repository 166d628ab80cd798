//! Wall-clock and cycle-count timestamp rendering with delta tracking.

use std::fmt::Write as _;

use time::{OffsetDateTime, UtcOffset, macros::format_description};
use trace_ir::{ClockSnapshot, NSEC_PER_SEC};
use tracing::{debug, warn};

use crate::{ClockFormat, Error, Result};

/// Placeholder for a wall-clock time that cannot be determined.
pub const WALL_PLACEHOLDER: &str = "??:??:??.?????????";
/// Placeholder for a cycle count that cannot be determined.
pub const CYCLES_PLACEHOLDER: &str = "????????????????????";
/// Placeholder for a wall-clock delta with no previous sample.
pub const WALL_DELTA_PLACEHOLDER: &str = "+?.?????????";
/// Placeholder for a cycle delta with no previous sample.
pub const CYCLES_DELTA_PLACEHOLDER: &str = "+????????????";
/// Rendered when a snapshot cannot be converted to nanoseconds.
const CONVERSION_ERROR: &str = "Error";

/// A sign-normalized split of nanoseconds from origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// Whether the time lies before the origin.
    pub negative: bool,
    /// Absolute whole seconds.
    pub seconds: u64,
    /// Absolute sub-second nanoseconds, below one billion.
    pub nanoseconds: u64,
}

impl WallTime {
    /// Split nanoseconds from origin into sign, seconds and nanoseconds.
    pub fn from_ns(ns: i64) -> Self {
        normalize(ns / NSEC_PER_SEC, ns % NSEC_PER_SEC)
    }
}

/// Sign-normalize a truncating `(seconds, nanoseconds)` split.
///
/// The remainder of a truncating division carries the dividend's sign, so the
/// two parts may disagree; the result always has non-negative magnitudes and
/// an explicit sign.
pub fn normalize(ts_sec: i64, ts_nsec: i64) -> WallTime {
    let nsec = NSEC_PER_SEC.unsigned_abs();
    let (negative, seconds, nanoseconds) = match (ts_sec.signum(), ts_nsec.signum()) {
        (0 | 1, 0 | 1) => (false, ts_sec.unsigned_abs(), ts_nsec.unsigned_abs()),
        (1, _) => (false, ts_sec.unsigned_abs() - 1, nsec - ts_nsec.unsigned_abs()),
        (0, _) => (true, 0, ts_nsec.unsigned_abs()),
        (_, 1) => (
            true,
            ts_sec.unsigned_abs() - 1,
            nsec - ts_nsec.unsigned_abs(),
        ),
        (_, _) => (true, ts_sec.unsigned_abs(), ts_nsec.unsigned_abs()),
    };
    WallTime {
        negative,
        seconds,
        nanoseconds,
    }
}

/// Renders clock snapshots and remembers the previous sample of each mode.
///
/// Cycle and wall-clock tracking are independent; a printer switching between
/// them keeps both deltas coherent. The warning flags live as long as the
/// renderer, so a stream of negative timestamps logs once.
#[derive(Debug, Clone, Default)]
pub struct TimestampRenderer {
    /// Wall-clock rendering options.
    format: ClockFormat,
    /// Previous tracked wall-clock sample, in nanoseconds from origin.
    last_wall_ns: Option<i64>,
    /// Previous tracked cycle count.
    last_cycles: Option<u64>,
    /// Difference between the two latest tracked wall-clock samples.
    wall_delta: Option<u64>,
    /// Difference between the two latest tracked cycle counts.
    cycles_delta: Option<u64>,
    /// Whether the negative calendar time warning was emitted.
    negative_warning_done: bool,
    /// Whether a calendar conversion failure was logged at warning level.
    calendar_warning_done: bool,
}

impl TimestampRenderer {
    /// A renderer with no previous samples.
    pub fn new(format: ClockFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Delta between the two latest tracked wall-clock samples.
    pub const fn wall_delta(&self) -> Option<u64> {
        self.wall_delta
    }

    /// Delta between the two latest tracked cycle counts.
    pub const fn cycles_delta(&self) -> Option<u64> {
        self.cycles_delta
    }

    /// Whether the negative calendar time warning has been emitted.
    pub const fn negative_warning_done(&self) -> bool {
        self.negative_warning_done
    }

    /// Append a raw cycle count, zero-padded to 20 digits.
    ///
    /// With `track`, the sample becomes the previous cycle value and the
    /// wrapping difference to the former one becomes the cycle delta.
    pub fn push_cycles(&mut self, buf: &mut String, snapshot: Option<&ClockSnapshot>, track: bool) {
        let Some(snapshot) = snapshot else {
            buf.push_str(CYCLES_PLACEHOLDER);
            return;
        };
        let cycles = snapshot.cycles();
        let _ignored = write!(buf, "{cycles:020}");
        if track {
            if let Some(last) = self.last_cycles {
                self.cycles_delta = Some(cycles.wrapping_sub(last));
            }
            self.last_cycles = Some(cycles);
        }
    }

    /// Append a wall-clock time.
    ///
    /// Calendar form is used unless seconds were asked for or the time
    /// cannot be expressed as a calendar time, in which case the
    /// `[-]seconds.nanoseconds` form is used. With `track`, the sample feeds
    /// the wall-clock delta.
    pub fn push_wall(&mut self, buf: &mut String, snapshot: Option<&ClockSnapshot>, track: bool) {
        let Some(snapshot) = snapshot else {
            buf.push_str(WALL_PLACEHOLDER);
            return;
        };
        let ns = match snapshot.ns_from_origin() {
            Ok(ns) => ns,
            Err(e) => {
                debug!(
                    error = %Error::from(e),
                    cycles = snapshot.cycles(),
                    "clock snapshot conversion failed"
                );
                buf.push_str(CONVERSION_ERROR);
                return;
            }
        };
        if track {
            if let Some(last) = self.last_wall_ns {
                self.wall_delta = Some(ns.wrapping_sub(last) as u64);
            }
            self.last_wall_ns = Some(ns);
        }

        let wall = WallTime::from_ns(ns);
        if !self.format.seconds {
            match self.calendar(wall) {
                Ok(text) => {
                    buf.push_str(&text);
                    return;
                }
                Err(e) => self.note_calendar_fallback(&e),
            }
        }
        push_seconds(buf, wall);
    }

    /// Append the cycle delta, or its placeholder before a second sample.
    pub fn push_cycles_delta(&self, buf: &mut String) {
        match self.cycles_delta {
            Some(delta) => {
                let _ignored = write!(buf, "+{delta:012}");
            }
            None => buf.push_str(CYCLES_DELTA_PLACEHOLDER),
        }
    }

    /// Append the wall-clock delta, or its placeholder before a second
    /// sample.
    pub fn push_wall_delta(&self, buf: &mut String) {
        match self.wall_delta {
            Some(delta) => {
                let nsec = NSEC_PER_SEC.unsigned_abs();
                let _ignored = write!(buf, "+{}.{:09}", delta / nsec, delta % nsec);
            }
            None => buf.push_str(WALL_DELTA_PLACEHOLDER),
        }
    }

    /// Render `wall` as a calendar time in the configured zone.
    fn calendar(&self, wall: WallTime) -> Result<String> {
        if wall.negative {
            return Err(Error::UnsupportedNegativeCalendarTime);
        }
        let secs = i64::try_from(wall.seconds)
            .map_err(|_| Error::CalendarConversion(format!("{} s out of range", wall.seconds)))?;
        let utc = OffsetDateTime::from_unix_timestamp(secs)
            .map_err(|e| Error::CalendarConversion(e.to_string()))?;
        let shown = if self.format.gmt {
            utc
        } else {
            let offset = UtcOffset::local_offset_at(utc)
                .map_err(|e| Error::CalendarConversion(format!("unable to get local time: {e}")))?;
            // Shift the instant so its UTC fields read as local time.
            secs.checked_add(i64::from(offset.whole_seconds()))
                .and_then(|local| OffsetDateTime::from_unix_timestamp(local).ok())
                .ok_or_else(|| Error::CalendarConversion("local time out of range".into()))?
        };

        let mut out = String::with_capacity(30);
        if self.format.date {
            let date = shown
                .format(format_description!("[year]-[month]-[day] "))
                .map_err(|e| Error::CalendarConversion(e.to_string()))?;
            out.push_str(&date);
        }
        let clock = shown
            .format(format_description!("[hour]:[minute]:[second]"))
            .map_err(|e| Error::CalendarConversion(e.to_string()))?;
        let _ignored = write!(out, "{clock}.{:09}", wall.nanoseconds);
        Ok(out)
    }

    /// Log why calendar rendering was abandoned, loudly only the first time.
    fn note_calendar_fallback(&mut self, err: &Error) {
        match err {
            Error::UnsupportedNegativeCalendarTime => {
                if !self.negative_warning_done {
                    warn!("fallback to [sec.ns] to print negative time value; use --clock-seconds");
                    self.negative_warning_done = true;
                }
            }
            other => {
                if self.calendar_warning_done {
                    debug!(error = %other, "calendar rendering failed");
                } else {
                    warn!(error = %other, "calendar rendering failed; using [sec.ns]");
                    self.calendar_warning_done = true;
                }
            }
        }
    }
}

/// Append the `[-]seconds.nanoseconds` form.
fn push_seconds(buf: &mut String, wall: WallTime) {
    let sign = if wall.negative { "-" } else { "" };
    let _ignored = write!(buf, "{sign}{}.{:09}", wall.seconds, wall.nanoseconds);
}

#[cfg(test)]
mod tests {
    use trace_ir::ClockClass;

    use super::*;

    fn snap(cycles: u64) -> ClockSnapshot {
        ClockClass::default().snapshot(cycles)
    }

    fn seconds() -> TimestampRenderer {
        TimestampRenderer::new(ClockFormat {
            seconds: true,
            ..ClockFormat::default()
        })
    }

    #[test]
    fn normalization_table() {
        let w = |negative, seconds, nanoseconds| WallTime {
            negative,
            seconds,
            nanoseconds,
        };
        assert_eq!(normalize(3, 5), w(false, 3, 5));
        assert_eq!(normalize(0, 0), w(false, 0, 0));
        assert_eq!(normalize(3, -5), w(false, 2, 999_999_995));
        assert_eq!(normalize(0, -500_000_000), w(true, 0, 500_000_000));
        assert_eq!(normalize(-3, 5), w(true, 2, 999_999_995));
        assert_eq!(normalize(-3, 0), w(true, 3, 0));
        assert_eq!(normalize(-3, -5), w(true, 3, 5));
    }

    #[test]
    fn truncating_split() {
        assert_eq!(
            WallTime::from_ns(-1_500_000_000),
            WallTime {
                negative: true,
                seconds: 1,
                nanoseconds: 500_000_000
            }
        );
        assert_eq!(
            WallTime::from_ns(i64::MIN),
            WallTime {
                negative: true,
                seconds: 9_223_372_036,
                nanoseconds: 854_775_808
            }
        );
    }

    #[test]
    fn seconds_form() {
        let mut r = seconds();
        let mut buf = String::new();
        r.push_wall(&mut buf, Some(&snap(1_500_000_001)), false);
        assert_eq!(buf, "1.500000001");
    }

    #[test]
    fn gmt_calendar_form() {
        let mut r = TimestampRenderer::new(ClockFormat {
            gmt: true,
            date: true,
            ..ClockFormat::default()
        });
        let mut buf = String::new();
        // 2009-02-13 23:31:30 UTC
        r.push_wall(&mut buf, Some(&snap(1_234_567_890_000_000_123)), false);
        assert_eq!(buf, "2009-02-13 23:31:30.000000123");

        let mut r = TimestampRenderer::new(ClockFormat {
            gmt: true,
            ..ClockFormat::default()
        });
        buf.clear();
        r.push_wall(&mut buf, Some(&snap(0)), false);
        assert_eq!(buf, "00:00:00.000000000");
    }

    #[test]
    fn local_calendar_form() {
        // 2009-02-13 23:31:30 UTC; every zone offset of that date is a whole
        // number of minutes, so the seconds field survives the shift
        let mut r = TimestampRenderer::new(ClockFormat::default());
        let mut buf = String::new();
        r.push_wall(&mut buf, Some(&snap(1_234_567_890_000_000_123)), true);

        if buf == "1234567890.000000123" {
            // the local offset was unavailable; the seconds form stands in
            return;
        }
        assert_eq!(buf.len(), "HH:MM:SS.nnnnnnnnn".len(), "{buf}");
        assert!(buf.ends_with(":30.000000123"), "{buf}");
        let hour: u8 = buf[..2].parse().unwrap();
        let minute: u8 = buf[3..5].parse().unwrap();
        assert!(hour < 24 && minute < 60, "{buf}");
        assert_eq!(&buf[2..3], ":");

        let utc = OffsetDateTime::from_unix_timestamp(1_234_567_890).unwrap();
        if let Ok(offset) = UtcOffset::local_offset_at(utc) {
            let local = utc.to_offset(offset);
            assert_eq!(&buf[..5], format!("{:02}:{:02}", local.hour(), local.minute()));
        }

        // the date prefix uses the same shifted instant
        let mut r = TimestampRenderer::new(ClockFormat {
            date: true,
            ..ClockFormat::default()
        });
        let mut dated = String::new();
        r.push_wall(&mut dated, Some(&snap(1_234_567_890_000_000_123)), false);
        if dated != "1234567890.000000123" {
            assert!(dated.starts_with("2009-02-1"), "{dated}");
            assert!(dated.ends_with(":30.000000123"), "{dated}");
        }
    }

    #[test]
    fn negative_time_falls_back_to_seconds() {
        let clock = ClockClass::nanoseconds(-1);
        let mut r = TimestampRenderer::new(ClockFormat {
            gmt: true,
            ..ClockFormat::default()
        });
        let mut buf = String::new();
        r.push_wall(&mut buf, Some(&clock.snapshot(500_000_000)), false);
        assert_eq!(buf, "-0.500000000");
        assert!(r.negative_warning_done());
        buf.clear();
        r.push_wall(&mut buf, Some(&clock.snapshot(0)), false);
        assert_eq!(buf, "-1.000000000");
    }

    #[test]
    fn missing_snapshot_and_conversion_failure() {
        let mut r = seconds();
        let mut buf = String::new();
        r.push_wall(&mut buf, None, true);
        assert_eq!(buf, WALL_PLACEHOLDER);
        buf.clear();
        r.push_cycles(&mut buf, None, true);
        assert_eq!(buf, CYCLES_PLACEHOLDER);

        let broken = ClockClass {
            frequency: 0,
            ..ClockClass::default()
        };
        buf.clear();
        r.push_wall(&mut buf, Some(&broken.snapshot(1)), true);
        assert_eq!(buf, "Error");
        assert_eq!(r.wall_delta(), None);
    }

    #[test]
    fn wall_delta_tracks_consecutive_samples() {
        let mut r = seconds();
        let mut buf = String::new();
        r.push_wall(&mut buf, Some(&snap(1_000)), true);
        r.push_wall_delta(&mut buf);
        assert!(buf.ends_with(WALL_DELTA_PLACEHOLDER));
        buf.clear();
        r.push_wall(&mut buf, Some(&snap(2_000_001_000)), true);
        buf.clear();
        r.push_wall_delta(&mut buf);
        assert_eq!(buf, "+2.000000000");
        // untracked samples leave the delta alone
        r.push_wall(&mut buf, Some(&snap(9)), false);
        assert_eq!(r.wall_delta(), Some(2_000_000_000));
    }

    #[test]
    fn cycle_delta_wraps() {
        let mut r = seconds();
        let mut buf = String::new();
        r.push_cycles(&mut buf, Some(&snap(42)), true);
        assert_eq!(buf, "00000000000000000042");
        buf.clear();
        r.push_cycles_delta(&mut buf);
        assert_eq!(buf, CYCLES_DELTA_PLACEHOLDER);
        r.push_cycles(&mut buf, Some(&snap(40)), true);
        assert_eq!(r.cycles_delta(), Some(u64::MAX - 1));
        r.push_cycles(&mut buf, Some(&snap(1040)), true);
        buf.clear();
        r.push_cycles_delta(&mut buf);
        assert_eq!(buf, "+000000001000");
    }

    #[test]
    fn modes_track_independently() {
        let mut r = seconds();
        let mut buf = String::new();
        r.push_cycles(&mut buf, Some(&snap(10)), true);
        r.push_wall(&mut buf, Some(&snap(100)), true);
        r.push_cycles(&mut buf, Some(&snap(15)), true);
        assert_eq!(r.cycles_delta(), Some(5));
        assert_eq!(r.wall_delta(), None);
    }
}
