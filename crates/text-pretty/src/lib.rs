//! Human-readable text rendering of decoded trace events.
//!
//! A [`Printer`] turns [`trace_ir::Message`] values into one line of text
//! each: event lines on the primary stream, warnings about discarded events
//! and packets on the diagnostic stream. Rendering is deterministic and
//! optionally colorized with ANSI sequences.
//!
//! The pieces are usable on their own:
//! - [`FieldPrinter`] renders a field tree.
//! - [`labels_for`] resolves enumeration labels, inferring bit flags when no
//!   mapping matches directly.
//! - [`TimestampRenderer`] renders clock snapshots and tracks deltas.
//! - [`push_header`] and [`push_discarded`] build the header of an event line
//!   and the discarded-items warning.
#![warn(missing_docs)]

mod color;
mod config;
mod discarded;
mod enums;
mod error;
mod escape;
mod field;
mod header;
mod integer;
mod printer;
mod real;
mod sink;
mod timestamp;

#[cfg(test)]
mod property_tests;

pub use color::{ColorTheme, TerminalColors};
pub use config::{ClockFormat, Config};
pub use discarded::{DiscardedKind, format_uuid, push_discarded};
pub use enums::{EnumValue, Labels, labels_for, push_labels};
pub use error::{Error, Result};
pub use escape::{escape, push_escaped};
pub use field::FieldPrinter;
pub use header::{push_header, push_name_equal};
pub use integer::{IntValue, push_integer};
pub use printer::Printer;
pub use real::push_general;
pub use sink::OutputSink;
pub use timestamp::{
    CYCLES_DELTA_PLACEHOLDER, CYCLES_PLACEHOLDER, TimestampRenderer, WALL_DELTA_PLACEHOLDER,
    WALL_PLACEHOLDER, WallTime, normalize,
};
