//! Traces, streams, events and the messages that carry them.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{ClockClass, ClockSnapshot, Field};

/// Value of a trace environment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// Signed integer entry.
    Integer(i64),
    /// String entry.
    String(String),
}

/// A trace: name, UUID and environment shared by its streams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trace {
    /// Trace name.
    #[serde(default)]
    pub name: Option<String>,
    /// Trace UUID.
    #[serde(default)]
    pub uuid: Option<[u8; 16]>,
    /// Environment entries by name.
    #[serde(default)]
    pub environment: BTreeMap<String, EnvValue>,
}

impl Trace {
    /// Look up a string environment entry.
    ///
    /// Returns `None` when the entry is absent or is not a string.
    pub fn env_str(&self, name: &str) -> Option<&str> {
        match self.environment.get(name)? {
            EnvValue::String(s) => Some(s),
            EnvValue::Integer(_) => None,
        }
    }

    /// Look up an integer environment entry.
    ///
    /// Returns `None` when the entry is absent or is not an integer.
    pub fn env_int(&self, name: &str) -> Option<i64> {
        match self.environment.get(name)? {
            EnvValue::Integer(v) => Some(*v),
            EnvValue::String(_) => None,
        }
    }
}

/// Class shared by the streams of one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamClass {
    /// Stream class identifier.
    #[serde(default)]
    pub id: u64,
    /// Stream class name.
    #[serde(default)]
    pub name: Option<String>,
    /// Default clock of the streams of this class.
    #[serde(default)]
    pub default_clock_class: Option<ClockClass>,
    /// Whether discarded-events messages carry begin/end snapshots.
    #[serde(default)]
    pub discarded_events_have_default_clock_snapshots: bool,
    /// Whether discarded-packets messages carry begin/end snapshots.
    #[serde(default)]
    pub discarded_packets_have_default_clock_snapshots: bool,
}

/// A stream of a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stream {
    /// Stream identifier, when the trace assigns one.
    #[serde(default)]
    pub id: Option<u64>,
    /// Stream name.
    #[serde(default)]
    pub name: Option<String>,
    /// Class of this stream.
    pub class: Arc<StreamClass>,
    /// Trace containing this stream.
    pub trace: Arc<Trace>,
}

/// Log level attached to an event class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    DebugSystem,
    DebugProgram,
    DebugProcess,
    DebugModule,
    DebugUnit,
    DebugFunction,
    DebugLine,
    Debug,
}

impl LogLevel {
    /// Every level in ascending numeric order.
    pub const ALL: [Self; 15] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::DebugSystem,
        Self::DebugProgram,
        Self::DebugProcess,
        Self::DebugModule,
        Self::DebugUnit,
        Self::DebugFunction,
        Self::DebugLine,
        Self::Debug,
    ];

    /// Numeric value of the level (0 for `Emergency` through 14 for `Debug`).
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Tracer-style name of the level, e.g. `TRACE_WARNING`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Emergency => "TRACE_EMERG",
            Self::Alert => "TRACE_ALERT",
            Self::Critical => "TRACE_CRIT",
            Self::Error => "TRACE_ERR",
            Self::Warning => "TRACE_WARNING",
            Self::Notice => "TRACE_NOTICE",
            Self::Info => "TRACE_INFO",
            Self::DebugSystem => "TRACE_DEBUG_SYSTEM",
            Self::DebugProgram => "TRACE_DEBUG_PROGRAM",
            Self::DebugProcess => "TRACE_DEBUG_PROCESS",
            Self::DebugModule => "TRACE_DEBUG_MODULE",
            Self::DebugUnit => "TRACE_DEBUG_UNIT",
            Self::DebugFunction => "TRACE_DEBUG_FUNCTION",
            Self::DebugLine => "TRACE_DEBUG_LINE",
            Self::Debug => "TRACE_DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Class of an event: name and optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventClass {
    /// Event class identifier.
    #[serde(default)]
    pub id: u64,
    /// Event name.
    #[serde(default)]
    pub name: Option<String>,
    /// Log level.
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    /// EMF URI.
    #[serde(default)]
    pub emf_uri: Option<String>,
}

/// A packet; only its context is of interest when rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Packet {
    /// Packet context field.
    #[serde(default)]
    pub context: Option<Field>,
}

/// A decoded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    /// Class of the event.
    pub class: Arc<EventClass>,
    /// Stream the event belongs to.
    pub stream: Arc<Stream>,
    /// Packet the event belongs to.
    #[serde(default)]
    pub packet: Option<Arc<Packet>>,
    /// Context common to every event of the stream.
    #[serde(default)]
    pub common_context: Option<Field>,
    /// Context specific to this event class.
    #[serde(default)]
    pub specific_context: Option<Field>,
    /// Payload.
    #[serde(default)]
    pub payload: Option<Field>,
}

impl Event {
    /// Construct an event with no packet and no fields.
    pub fn new(class: Arc<EventClass>, stream: Arc<Stream>) -> Self {
        Self {
            class,
            stream,
            packet: None,
            common_context: None,
            specific_context: None,
            payload: None,
        }
    }

    /// Packet context field, if the event has a packet with a context.
    pub fn packet_context(&self) -> Option<&Field> {
        self.packet.as_deref().and_then(|p| p.context.as_ref())
    }

    /// Trace owning the event's stream.
    pub fn trace(&self) -> &Trace {
        &self.stream.trace
    }
}

/// An event together with its default clock snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventMessage {
    /// The event.
    pub event: Event,
    /// Default clock snapshot; absent when the stream class has no default clock.
    #[serde(default)]
    pub default_clock_snapshot: Option<ClockSnapshot>,
}

impl EventMessage {
    /// Default clock class of the event's stream class, if any.
    pub fn default_clock_class(&self) -> Option<&ClockClass> {
        self.event.stream.class.default_clock_class.as_ref()
    }
}

/// A run of events or packets lost by the tracer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscardedItems {
    /// Stream the items were discarded from.
    pub stream: Arc<Stream>,
    /// Beginning of the discarded range.
    #[serde(default)]
    pub beginning_clock_snapshot: Option<ClockSnapshot>,
    /// End of the discarded range.
    #[serde(default)]
    pub end_clock_snapshot: Option<ClockSnapshot>,
    /// Number of discarded items; `None` when unknown (distinct from zero).
    #[serde(default)]
    pub count: Option<u64>,
}

/// Message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// An event.
    Event,
    /// Discarded events.
    DiscardedEvents,
    /// Discarded packets.
    DiscardedPackets,
}

/// A message flowing out of the decoding layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// An event.
    Event(EventMessage),
    /// Events lost by the tracer.
    DiscardedEvents(DiscardedItems),
    /// Packets lost by the tracer.
    DiscardedPackets(DiscardedItems),
}

impl Message {
    /// Message type tag.
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Event(_) => MessageKind::Event,
            Self::DiscardedEvents(_) => MessageKind::DiscardedEvents,
            Self::DiscardedPackets(_) => MessageKind::DiscardedPackets,
        }
    }
}
