//! Event header: timestamp, trace metadata and event name.

use std::fmt::Write as _;

use trace_ir::EventMessage;

use crate::{ColorTheme, Config, TimestampRenderer, color::push_styled};

/// Append `name = ` with the name in the name color.
pub fn push_name_equal(buf: &mut String, theme: &ColorTheme, name: &str) {
    push_styled(buf, theme, &theme.name, name);
    buf.push_str(" = ");
}

/// Tracks separators between header items.
struct HeaderLine<'a> {
    /// Destination buffer.
    buf: &'a mut String,
    /// Styles.
    theme: &'a ColorTheme,
    /// Whether items carry `name = ` prefixes.
    names: bool,
    /// Whether no named item has been written yet.
    first: bool,
    /// Whether a compact domain item has been written.
    domain_open: bool,
}

impl HeaderLine<'_> {
    /// Start a `name = value` item; only used in names mode.
    fn named(&mut self, name: &str) {
        if !self.first {
            self.buf.push_str(", ");
        }
        self.first = false;
        push_name_equal(self.buf, self.theme, name);
    }

    /// Start a domain-ish item: named, or colon-joined in compact mode.
    fn domain(&mut self, name: &str) {
        if self.names {
            self.named(name);
        } else {
            if self.domain_open {
                self.buf.push(':');
            }
            self.domain_open = true;
        }
    }
}

/// Append the header of an event line.
///
/// Items appear in a fixed order, each only when enabled and present:
/// timestamp and delta, trace name, hostname, domain, process name, VPID,
/// log level, EMF URI, then the event name. With header field names every
/// item reads `name = value` and items are joined by `, `. Without them
/// the timestamp is bracketed, the delta parenthesized, and the domain-ish
/// items are joined by `:`.
pub fn push_header(
    buf: &mut String,
    theme: &ColorTheme,
    config: &Config,
    clock: &mut TimestampRenderer,
    msg: &EventMessage,
) {
    let mut line = HeaderLine {
        buf,
        theme,
        names: config.print_header_field_names,
        first: true,
        domain_open: false,
    };
    push_timestamp(&mut line, config, clock, msg);

    let event = &msg.event;
    let trace = event.trace();
    if config.print_trace_field
        && let Some(name) = &trace.name
    {
        if line.names {
            line.named("trace");
            line.buf.push_str(name);
        } else {
            line.buf.push_str(name);
            line.buf.push(' ');
        }
    }
    let env_items = [
        (config.print_trace_hostname_field, "trace:hostname", "hostname"),
        (config.print_trace_domain_field, "trace:domain", "domain"),
        (config.print_trace_procname_field, "trace:procname", "procname"),
    ];
    for (enabled, label, key) in env_items {
        if enabled && let Some(value) = trace.env_str(key) {
            line.domain(label);
            line.buf.push_str(value);
        }
    }
    if config.print_trace_vpid_field
        && let Some(vpid) = trace.env_int("vpid")
    {
        line.domain("trace:vpid");
        let _ignored = write!(line.buf, "({vpid})");
    }
    if config.print_loglevel_field
        && let Some(level) = event.class.log_level
    {
        line.domain("loglevel");
        let _ignored = write!(line.buf, "{} ({})", level.name(), level.value());
    }
    if config.print_emf_field
        && let Some(uri) = &event.class.emf_uri
    {
        line.domain("model.emf.uri");
        line.buf.push_str(uri);
    }
    if line.domain_open {
        line.buf.push(' ');
    }

    if line.names {
        line.named("name");
    }
    match &event.class.name {
        Some(name) => push_styled(line.buf, theme, &theme.event_name, name),
        None => push_styled(line.buf, theme, &theme.unknown, "<unknown>"),
    }
    line.buf.push_str(if line.names { ", " } else { ": " });
}

/// Append the timestamp and delta items when the stream has a default clock.
fn push_timestamp(
    line: &mut HeaderLine<'_>,
    config: &Config,
    clock: &mut TimestampRenderer,
    msg: &EventMessage,
) {
    if msg.default_clock_class().is_none() {
        return;
    }
    let snapshot = msg.default_clock_snapshot.as_ref();
    if line.names {
        line.named("timestamp");
    } else {
        line.buf.push('[');
    }
    line.buf.push_str(&line.theme.timestamp);
    if config.print_timestamp_cycles {
        clock.push_cycles(line.buf, snapshot, true);
    } else {
        clock.push_wall(line.buf, snapshot, true);
    }
    line.buf.push_str(&line.theme.reset);
    if !line.names {
        line.buf.push_str("] ");
    }

    if config.print_delta_field {
        if line.names {
            line.named("delta");
        } else {
            line.buf.push('(');
        }
        if config.print_timestamp_cycles {
            clock.push_cycles_delta(line.buf);
        } else {
            clock.push_wall_delta(line.buf);
        }
        if !line.names {
            line.buf.push_str(") ");
        }
    }
}
