//! Per-stream printer state and message entry points.

use std::io::Write;

use trace_ir::{DiscardedItems, EventMessage, Message};
use tracing::{debug, trace};

use crate::{
    ColorTheme, Config, FieldPrinter, OutputSink, Result, TerminalColors, TimestampRenderer,
    discarded::{DiscardedKind, push_discarded},
    header::{push_header, push_name_equal},
};

/// Renders the messages of one stream.
///
/// A printer carries state across messages (previous timestamps for deltas,
/// one-shot warnings), so each stream needs its own instance. Event lines go
/// to the primary stream and discarded-items warnings to the diagnostic
/// stream. A message that fails to render leaves no output.
#[derive(Debug)]
pub struct Printer<O, E> {
    /// Options, fixed for the printer's lifetime.
    config: Config,
    /// Styles for event lines.
    theme: ColorTheme,
    /// Color source for discarded-items warnings on the diagnostic stream.
    diag_colors: TerminalColors,
    /// Line buffer and output streams.
    sink: OutputSink<O, E>,
    /// Timestamp rendering and delta state.
    clock: TimestampRenderer,
}

impl<O: Write, E: Write> Printer<O, E> {
    /// A printer whose colors follow the capabilities of standard output
    /// (event lines) and standard error (warnings).
    pub fn new(config: Config, out: O, err: E) -> Self {
        Self::with_terminal(config, TerminalColors::detect_stdout(), out, err)
            .with_diagnostic_colors(TerminalColors::detect_stderr())
    }

    /// A printer with one explicit color source for both streams.
    ///
    /// Event lines are styled only when `config.use_colors` is set; warnings
    /// use `colors` directly.
    pub fn with_terminal(config: Config, colors: TerminalColors, out: O, err: E) -> Self {
        let theme = if config.use_colors {
            ColorTheme::from_terminal(colors)
        } else {
            ColorTheme::plain()
        };
        Self {
            config,
            theme,
            diag_colors: colors,
            sink: OutputSink::new(out, err),
            clock: TimestampRenderer::new(config.clock_format()),
        }
    }

    /// Replace the color source of the diagnostic stream.
    #[must_use]
    pub fn with_diagnostic_colors(mut self, colors: TerminalColors) -> Self {
        self.diag_colors = colors;
        self
    }

    /// Render one message.
    pub fn print_message(&mut self, msg: &Message) -> Result<()> {
        match msg {
            Message::Event(event) => self.print_event(event),
            Message::DiscardedEvents(items) => self.print_discarded(DiscardedKind::Event, items),
            Message::DiscardedPackets(items) => self.print_discarded(DiscardedKind::Packet, items),
        }
    }

    /// Render an event line to the primary stream.
    pub fn print_event(&mut self, msg: &EventMessage) -> Result<()> {
        self.sink.clear();
        if let Err(e) = self.render_event(msg) {
            debug!(error = %e, event = ?msg.event.class.name, "dropping event");
            self.sink.clear();
            return Err(e);
        }
        trace!(line = self.sink.as_str().trim_end(), "event rendered");
        self.sink.flush_out()
    }

    /// Render a discarded-items warning to the diagnostic stream.
    pub fn print_discarded(&mut self, kind: DiscardedKind, items: &DiscardedItems) -> Result<()> {
        self.sink.clear();
        push_discarded(
            self.sink.buf_mut(),
            self.diag_colors,
            &mut self.clock,
            kind,
            items,
        );
        self.sink.flush_err()
    }

    /// Build the event line in the buffer.
    fn render_event(&mut self, msg: &EventMessage) -> Result<()> {
        let Self {
            config,
            theme,
            sink,
            clock,
            ..
        } = self;
        let buf = sink.buf_mut();
        push_header(buf, theme, config, clock, msg);

        let event = &msg.event;
        let scopes = [
            (
                "stream.packet.context",
                event.packet_context(),
                config.print_context_field_names,
            ),
            (
                "stream.event.context",
                event.common_context.as_ref(),
                config.print_context_field_names,
            ),
            (
                "event.context",
                event.specific_context.as_ref(),
                config.print_context_field_names,
            ),
            (
                "event.fields",
                event.payload.as_ref(),
                config.print_payload_field_names,
            ),
        ];
        let mut first = true;
        for (scope, field, print_names) in scopes {
            let Some(field) = field else { continue };
            if !first {
                buf.push_str(", ");
            }
            first = false;
            if config.print_scope_field_names {
                push_name_equal(buf, theme, scope);
            }
            FieldPrinter::new(buf, theme).render(field, print_names)?;
        }
        buf.push('\n');
        Ok(())
    }

    /// Options in effect.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Styles applied to event lines.
    pub const fn theme(&self) -> &ColorTheme {
        &self.theme
    }

    /// Color source of discarded-items warnings.
    pub const fn diagnostic_colors(&self) -> TerminalColors {
        self.diag_colors
    }

    /// Timestamp state, including the previous samples.
    pub const fn timestamps(&self) -> &TimestampRenderer {
        &self.clock
    }

    /// Borrow the primary stream.
    pub const fn out(&self) -> &O {
        self.sink.out()
    }

    /// Borrow the diagnostic stream.
    pub const fn err(&self) -> &E {
        self.sink.err()
    }

    /// Take back both streams.
    pub fn into_parts(self) -> (O, E) {
        self.sink.into_parts()
    }
}
