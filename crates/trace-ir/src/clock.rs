//! Clock classes and snapshots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nanoseconds per second.
pub const NSEC_PER_SEC: i64 = 1_000_000_000;

/// Errors converting a clock snapshot to nanoseconds from origin.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The clock class declares a frequency of zero.
    #[error("clock class has a zero frequency")]
    ZeroFrequency,
    /// The result does not fit a signed 64-bit nanosecond count.
    #[error("nanoseconds from origin overflow a signed 64-bit integer")]
    Overflow,
}

/// Description of a trace clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockClass {
    /// Optional clock name.
    #[serde(default)]
    pub name: Option<String>,
    /// Frequency in Hz.
    pub frequency: u64,
    /// Offset from origin, whole seconds part.
    #[serde(default)]
    pub offset_seconds: i64,
    /// Offset from origin, additional cycles part.
    #[serde(default)]
    pub offset_cycles: u64,
}

impl Default for ClockClass {
    fn default() -> Self {
        Self {
            name: None,
            frequency: NSEC_PER_SEC.unsigned_abs(),
            offset_seconds: 0,
            offset_cycles: 0,
        }
    }
}

impl ClockClass {
    /// A 1 GHz clock whose origin is offset by `offset_seconds`.
    pub fn nanoseconds(offset_seconds: i64) -> Self {
        Self {
            offset_seconds,
            ..Self::default()
        }
    }

    /// Capture a snapshot of this clock at `cycles`.
    pub fn snapshot(&self, cycles: u64) -> ClockSnapshot {
        ClockSnapshot {
            class: self.clone(),
            cycles,
        }
    }
}

/// A reading of a clock, in cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockSnapshot {
    /// Clock the reading was taken from.
    pub class: ClockClass,
    /// Raw reading.
    pub cycles: u64,
}

impl ClockSnapshot {
    /// Raw cycle count.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Nanoseconds elapsed since the clock's origin (may be negative).
    pub fn ns_from_origin(&self) -> Result<i64, ClockError> {
        let class = &self.class;
        if class.frequency == 0 {
            return Err(ClockError::ZeroFrequency);
        }
        let nsec = i128::from(NSEC_PER_SEC);
        let cycles = i128::from(class.offset_cycles) + i128::from(self.cycles);
        let freq = i128::from(class.frequency);
        let cycles_ns = if freq == nsec {
            cycles
        } else {
            cycles * nsec / freq
        };
        let total = i128::from(class.offset_seconds) * nsec + cycles_ns;
        i64::try_from(total).map_err(|_| ClockError::Overflow)
    }
}
