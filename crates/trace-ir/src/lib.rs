//! In-memory representation of decoded trace data.
//!
//! Decoders produce these values; sinks such as the text pretty-printer
//! consume them. Every type is serde-serializable so value trees can also be
//! exchanged as JSON.
#![warn(missing_docs)]

mod clock;
mod field;
mod message;

pub use clock::{ClockClass, ClockError, ClockSnapshot, NSEC_PER_SEC};
pub use field::{
    BitArray, DisplayBase, Enumeration, EnumerationClass, Field, Integer, IntegerClass,
    IntegerRange, Mapping, Member,
};
pub use message::{
    DiscardedItems, EnvValue, Event, EventClass, EventMessage, LogLevel, Message, MessageKind,
    Packet, Stream, StreamClass, Trace,
};
