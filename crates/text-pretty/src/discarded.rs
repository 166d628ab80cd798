//! Warning lines for events and packets lost by the tracer.

use std::fmt::{self, Write as _};

use trace_ir::DiscardedItems;

use crate::{TerminalColors, TimestampRenderer};

/// What was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardedKind {
    /// Events.
    Event,
    /// Packets.
    Packet,
}

impl DiscardedKind {
    /// Singular noun for the kind.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Packet => "packet",
        }
    }
}

impl fmt::Display for DiscardedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Format a UUID as `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
pub fn format_uuid(uuid: &[u8; 16]) -> String {
    let mut out = String::with_capacity(36);
    for (i, byte) in uuid.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        let _ignored = write!(out, "{byte:02x}");
    }
    out
}

/// Append the one-line warning for a run of discarded items.
///
/// The time range is rendered with `clock` in wall-clock mode without
/// touching its delta tracking, and only when the stream class declares
/// that discarded items of this kind carry clock snapshots.
pub fn push_discarded(
    buf: &mut String,
    colors: TerminalColors,
    clock: &mut TimestampRenderer,
    kind: DiscardedKind,
    items: &DiscardedItems,
) {
    let stream = &items.stream;
    let class = &stream.class;
    let trace = &stream.trace;
    let has_snapshots = match kind {
        DiscardedKind::Event => class.discarded_events_have_default_clock_snapshots,
        DiscardedKind::Packet => class.discarded_packets_have_default_clock_snapshots,
    };
    let range = if has_snapshots {
        items
            .beginning_clock_snapshot
            .as_ref()
            .zip(items.end_clock_snapshot.as_ref())
    } else {
        None
    };

    let yellow = colors.fg_yellow();
    let _ignored = write!(
        buf,
        "{yellow}{}WARNING{}{yellow}: ",
        colors.bold(),
        colors.reset()
    );
    let _ignored = match items.count {
        Some(count) => write!(
            buf,
            "Tracer discarded {count} {kind}{} ",
            if count == 1 { "" } else { "s" }
        ),
        None => write!(buf, "Tracer may have discarded {kind}s "),
    };

    match range {
        Some((begin, end)) => {
            buf.push_str("between [");
            clock.push_wall(buf, Some(begin), false);
            buf.push_str("] and [");
            clock.push_wall(buf, Some(end), false);
            buf.push(']');
        }
        None => buf.push_str("(unknown time range)"),
    }

    let trace_name = trace.name.as_deref().unwrap_or("(unknown)");
    let _ignored = write!(buf, " in trace \"{trace_name}\" ");
    match &trace.uuid {
        Some(uuid) => {
            let _ignored = write!(buf, "(UUID: {}) ", format_uuid(uuid));
        }
        None => buf.push_str("(no UUID) "),
    }

    let stream_name = stream.name.as_deref().unwrap_or("(unknown)");
    let _ignored = write!(
        buf,
        "within stream \"{stream_name}\" (stream class ID: {}, ",
        class.id
    );
    let _ignored = match stream.id {
        Some(id) => write!(buf, "stream ID: {id}"),
        None => write!(buf, "no stream ID"),
    };
    let _ignored = writeln!(buf, ").{}", colors.reset());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use trace_ir::{ClockClass, Stream, StreamClass, Trace};

    use super::*;
    use crate::ClockFormat;

    fn items(snapshots: bool, count: Option<u64>) -> DiscardedItems {
        let stream = Stream {
            id: Some(3),
            name: Some("chan_0".into()),
            class: Arc::new(StreamClass {
                id: 7,
                default_clock_class: Some(ClockClass::default()),
                discarded_events_have_default_clock_snapshots: snapshots,
                ..StreamClass::default()
            }),
            trace: Arc::new(Trace {
                name: Some("kernel".into()),
                uuid: Some([
                    0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0, 0x01, 0x23, 0x45, 0x67, 0x89,
                    0xab, 0xcd, 0xef,
                ]),
                ..Trace::default()
            }),
        };
        DiscardedItems {
            stream: Arc::new(stream),
            beginning_clock_snapshot: Some(ClockClass::default().snapshot(1_000_000_000)),
            end_clock_snapshot: Some(ClockClass::default().snapshot(2_500_000_000)),
            count,
        }
    }

    fn render(kind: DiscardedKind, items: &DiscardedItems) -> String {
        let mut buf = String::new();
        let mut clock = TimestampRenderer::new(ClockFormat {
            seconds: true,
            ..ClockFormat::default()
        });
        push_discarded(&mut buf, TerminalColors::new(false), &mut clock, kind, items);
        assert_eq!(clock.wall_delta(), None);
        buf
    }

    #[test]
    fn counted_events_with_range() {
        assert_eq!(
            render(DiscardedKind::Event, &items(true, Some(3))),
            "WARNING: Tracer discarded 3 events between [1.000000000] and [2.500000000] \
             in trace \"kernel\" (UUID: 12345678-9abc-def0-0123-456789abcdef) \
             within stream \"chan_0\" (stream class ID: 7, stream ID: 3).\n"
        );
    }

    #[test]
    fn singular_noun_for_one_item() {
        let out = render(DiscardedKind::Event, &items(false, Some(1)));
        assert!(out.contains("Tracer discarded 1 event (unknown time range)"), "{out}");
    }

    #[test]
    fn unknown_count_and_missing_metadata() {
        let mut it = items(true, None);
        let mut stream = (*it.stream).clone();
        stream.id = None;
        stream.name = None;
        stream.trace = Arc::new(Trace::default());
        it.stream = Arc::new(stream);
        // snapshots are declared for events only
        let out = render(DiscardedKind::Packet, &it);
        assert_eq!(
            out,
            "WARNING: Tracer may have discarded packets (unknown time range) in trace \
             \"(unknown)\" (no UUID) within stream \"(unknown)\" (stream class ID: 7, \
             no stream ID).\n"
        );
    }

    #[test]
    fn zero_count_is_not_unknown() {
        let out = render(DiscardedKind::Event, &items(false, Some(0)));
        assert!(out.contains("Tracer discarded 0 events"), "{out}");
    }

    #[test]
    fn colored_prefix() {
        let mut buf = String::new();
        let mut clock = TimestampRenderer::default();
        let colors = TerminalColors::new(true);
        push_discarded(
            &mut buf,
            colors,
            &mut clock,
            DiscardedKind::Event,
            &items(false, None),
        );
        let expected = format!(
            "{y}{b}WARNING{r}{y}: Tracer may have discarded events",
            y = colors.fg_yellow(),
            b = colors.bold(),
            r = colors.reset()
        );
        assert!(buf.starts_with(&expected));
        assert!(buf.ends_with(&format!(").{}\n", colors.reset())));
    }
}
