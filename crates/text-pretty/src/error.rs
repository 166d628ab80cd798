//! Error types for rendering.
use std::{io, result::Result as StdResult};

use thiserror::Error;
use trace_ir::ClockError;

/// Crate-local `Result` alias.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced while rendering a message.
///
/// Fatal kinds abort the current message; nothing of it reaches the output
/// stream. Non-fatal kinds are absorbed where they occur and replaced by a
/// placeholder or an alternate format, so they never escape a [`crate::Printer`].
#[derive(Debug, Error)]
pub enum Error {
    /// The field's class type has no rendering.
    #[error("unknown field class type: {0}")]
    UnsupportedFieldClass(u64),
    /// A value required to render the message is missing.
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    /// The integer class asks for a display base with no rendering.
    #[error("unsupported integer display base: {0}")]
    UnsupportedDisplayBase(u32),
    /// A clock snapshot could not be converted to nanoseconds from origin.
    #[error("clock conversion failed: {0}")]
    ClockConversionFailed(#[from] ClockError),
    /// Calendar rendering was asked for a negative time value.
    #[error("calendar rendering of negative time values is unsupported")]
    UnsupportedNegativeCalendarTime,
    /// Calendar conversion of a time value failed.
    #[error("calendar conversion failed: {0}")]
    CalendarConversion(String),
    /// Writing the rendered text to an output stream failed.
    #[error("write error: {0}")]
    Write(#[from] io::Error),
}

impl Error {
    /// Whether this error aborts the message being rendered.
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::UnsupportedFieldClass(_)
            | Self::MissingValue(_)
            | Self::UnsupportedDisplayBase(_)
            | Self::Write(_) => true,
            Self::ClockConversionFailed(_)
            | Self::UnsupportedNegativeCalendarTime
            | Self::CalendarConversion(_) => false,
        }
    }
}
