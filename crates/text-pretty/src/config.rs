//! Printer configuration.

use serde::{Deserialize, Serialize};

/// Options controlling what a [`crate::Printer`] renders and how.
///
/// Every option is an independent switch. The configuration is fixed for the
/// lifetime of a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix header items with `name = ` instead of using the compact form.
    pub print_header_field_names: bool,
    /// Render timestamps as raw cycle counts rather than wall-clock time.
    pub print_timestamp_cycles: bool,
    /// Render the time elapsed since the previous event.
    pub print_delta_field: bool,
    /// Render wall-clock time as `seconds.nanoseconds` since origin.
    pub clock_seconds: bool,
    /// Use UTC rather than local time for calendar rendering.
    pub clock_gmt: bool,
    /// Prefix calendar times with `YYYY-MM-DD`.
    pub clock_date: bool,
    /// Render the trace name.
    pub print_trace_field: bool,
    /// Render the `hostname` environment entry.
    pub print_trace_hostname_field: bool,
    /// Render the `domain` environment entry.
    pub print_trace_domain_field: bool,
    /// Render the `procname` environment entry.
    pub print_trace_procname_field: bool,
    /// Render the `vpid` environment entry.
    pub print_trace_vpid_field: bool,
    /// Render the event class log level.
    pub print_loglevel_field: bool,
    /// Render the event class EMF URI.
    pub print_emf_field: bool,
    /// Prefix each scope (`event.fields`, ...) with its name.
    pub print_scope_field_names: bool,
    /// Prefix context members with their names.
    pub print_context_field_names: bool,
    /// Prefix payload members with their names.
    pub print_payload_field_names: bool,
    /// Embed ANSI color sequences in the output.
    pub use_colors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            print_header_field_names: false,
            print_timestamp_cycles: false,
            print_delta_field: true,
            clock_seconds: false,
            clock_gmt: false,
            clock_date: false,
            print_trace_field: false,
            print_trace_hostname_field: true,
            print_trace_domain_field: true,
            print_trace_procname_field: true,
            print_trace_vpid_field: true,
            print_loglevel_field: false,
            print_emf_field: false,
            print_scope_field_names: false,
            print_context_field_names: true,
            print_payload_field_names: true,
            use_colors: false,
        }
    }
}

impl Config {
    /// Clock rendering options derived from this configuration.
    pub const fn clock_format(&self) -> ClockFormat {
        ClockFormat {
            seconds: self.clock_seconds,
            gmt: self.clock_gmt,
            date: self.clock_date,
        }
    }
}

/// Options for wall-clock rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockFormat {
    /// Render `seconds.nanoseconds` rather than a calendar time.
    pub seconds: bool,
    /// Use UTC rather than local time.
    pub gmt: bool,
    /// Prefix the calendar date.
    pub date: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"clock_seconds": true, "print_delta_field": false}"#).unwrap();
        assert!(cfg.clock_seconds);
        assert!(!cfg.print_delta_field);
        assert!(cfg.print_payload_field_names);
        assert!(cfg.print_trace_hostname_field);
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"colour": true}"#).is_err());
    }
}
