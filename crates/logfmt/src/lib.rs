//! Utilities to render `tracing` events into concise logfmt strings.
//!
//! This crate extracts level, target, message and the remaining fields from
//! `tracing::Event` records. The in-memory capture used by tests, and
//! anything else that wants a flat view of a diagnostic, goes through
//! [`render_event`].

use std::fmt::{self, Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// Human‑readable message, or the rendered `key=value` pairs when the
    /// event has no message.
    pub message: String,
    /// Non-message fields as `(name, value)` pairs, in recording order.
    pub fields: Vec<(String, String)>,
}

impl RenderedLog {
    /// Value of the field `name`, if recorded.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for RenderedLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level={} target={} msg={:?}",
            self.level, self.target, self.message
        )?;
        for (k, v) in &self.fields {
            write!(f, " {k}={v}")?;
        }
        Ok(())
    }
}

/// Extract level, target, message and fields from a tracing Event.
///
/// Behavior:
/// - If the event contains a `message` field, use it.
/// - Otherwise, concatenate `key=value` pairs from remaining fields.
/// - String fields are quoted; everything else uses its `Debug` form.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    struct MsgVisitor {
        /// Captured `message` field, if present.
        msg: Option<String>,
        /// Non‑message fields.
        fields: Vec<(String, String)>,
    }
    impl Visit for MsgVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.msg = Some(value.to_string());
            } else {
                self.fields
                    .push((field.name().to_string(), format!("\"{value}\"")));
            }
        }
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.msg = Some(format!("{value:?}"));
            } else {
                self.fields
                    .push((field.name().to_string(), format!("{value:?}")));
            }
        }
    }
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: Vec::new(),
    };
    event.record(&mut vis);
    let message = vis.msg.unwrap_or_else(|| {
        let mut joined = String::new();
        for (k, v) in &vis.fields {
            if !joined.is_empty() {
                joined.push(' ');
            }
            let _ignored = write!(joined, "{k}={v}");
        }
        joined
    });
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message,
        fields: vis.fields,
    }
}
