//! Command-line interface definitions for trace-pretty.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use logging::LogArgs;
use text_pretty::{Config, TerminalColors};

/// Command-line interface for the `trace-pretty` binary.
#[derive(Parser, Debug)]
#[command(
    name = "trace-pretty",
    about = "Pretty-print JSON-encoded trace messages as text",
    version
)]
pub struct Cli {
    /// Logging controls shared across our binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Input file with one JSON message per line; `-` or nothing reads stdin.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// JSON file with printer options; flags below are applied on top.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field names to print: none, all, header, scope, context, payload.
    #[arg(short, long, value_delimiter = ',', value_name = "NAME")]
    pub names: Vec<NameOpt>,

    /// Additional fields to print: none, all, trace, trace:hostname,
    /// trace:domain, trace:procname, trace:vpid, loglevel, emf.
    #[arg(short, long, value_delimiter = ',', value_name = "FIELD")]
    pub fields: Vec<FieldOpt>,

    /// Print timestamps as raw clock cycles.
    #[arg(long)]
    pub clock_cycles: bool,

    /// Print timestamps as seconds since the clock origin.
    #[arg(long)]
    pub clock_seconds: bool,

    /// Prefix calendar timestamps with the date.
    #[arg(long)]
    pub clock_date: bool,

    /// Print calendar timestamps in UTC rather than local time.
    #[arg(long)]
    pub clock_gmt: bool,

    /// Do not print the time elapsed since the previous event.
    #[arg(long)]
    pub no_delta: bool,

    /// When to emit ANSI color sequences.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Skip messages that fail to render instead of stopping.
    #[arg(long)]
    pub keep_going: bool,
}

/// Values accepted by `--names`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NameOpt {
    /// Hide every field name.
    None,
    /// Show every field name.
    All,
    /// Names of header items.
    Header,
    /// Names of scopes such as `event.fields`.
    Scope,
    /// Names of context members.
    #[value(alias = "ctx")]
    Context,
    /// Names of payload members.
    #[value(alias = "arg")]
    Payload,
}

/// Values accepted by `--fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldOpt {
    /// Hide every optional header item.
    None,
    /// Show every optional header item.
    All,
    /// Trace name.
    Trace,
    /// `hostname` environment entry.
    #[value(name = "trace:hostname")]
    Hostname,
    /// `domain` environment entry.
    #[value(name = "trace:domain")]
    Domain,
    /// `procname` environment entry.
    #[value(name = "trace:procname")]
    Procname,
    /// `vpid` environment entry.
    #[value(name = "trace:vpid")]
    Vpid,
    /// Event class log level.
    Loglevel,
    /// Event class EMF URI.
    Emf,
}

/// Color policy for the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when standard output is a capable terminal.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl Cli {
    /// Apply the command-line options on top of `base`.
    ///
    /// `--names` and `--fields` values apply in order, so `none,payload`
    /// shows only payload names.
    pub fn apply(&self, base: Config) -> Config {
        let mut cfg = base;
        for name in &self.names {
            match name {
                NameOpt::None | NameOpt::All => {
                    let on = *name == NameOpt::All;
                    cfg.print_header_field_names = on;
                    cfg.print_scope_field_names = on;
                    cfg.print_context_field_names = on;
                    cfg.print_payload_field_names = on;
                }
                NameOpt::Header => cfg.print_header_field_names = true,
                NameOpt::Scope => cfg.print_scope_field_names = true,
                NameOpt::Context => cfg.print_context_field_names = true,
                NameOpt::Payload => cfg.print_payload_field_names = true,
            }
        }
        for field in &self.fields {
            match field {
                FieldOpt::None | FieldOpt::All => {
                    let on = *field == FieldOpt::All;
                    cfg.print_trace_field = on;
                    cfg.print_trace_hostname_field = on;
                    cfg.print_trace_domain_field = on;
                    cfg.print_trace_procname_field = on;
                    cfg.print_trace_vpid_field = on;
                    cfg.print_loglevel_field = on;
                    cfg.print_emf_field = on;
                }
                FieldOpt::Trace => cfg.print_trace_field = true,
                FieldOpt::Hostname => cfg.print_trace_hostname_field = true,
                FieldOpt::Domain => cfg.print_trace_domain_field = true,
                FieldOpt::Procname => cfg.print_trace_procname_field = true,
                FieldOpt::Vpid => cfg.print_trace_vpid_field = true,
                FieldOpt::Loglevel => cfg.print_loglevel_field = true,
                FieldOpt::Emf => cfg.print_emf_field = true,
            }
        }
        cfg.print_timestamp_cycles |= self.clock_cycles;
        cfg.clock_seconds |= self.clock_seconds;
        cfg.clock_date |= self.clock_date;
        cfg.clock_gmt |= self.clock_gmt;
        if self.no_delta {
            cfg.print_delta_field = false;
        }
        cfg
    }

    /// Resolve the color policy against each stream's capabilities.
    ///
    /// Returns the final configuration with the color sources of the
    /// primary stream and of the diagnostic stream.
    pub fn resolve_colors(
        &self,
        mut cfg: Config,
        stdout: TerminalColors,
        stderr: TerminalColors,
    ) -> (Config, TerminalColors, TerminalColors) {
        let (out, err) = match self.color {
            ColorChoice::Auto => (stdout, stderr),
            ColorChoice::Always => (TerminalColors::new(true), TerminalColors::new(true)),
            ColorChoice::Never => (TerminalColors::new(false), TerminalColors::new(false)),
        };
        cfg.use_colors = out.enabled();
        (cfg, out, err)
    }

    /// Input path, or `None` for standard input.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(iter::once("trace-pretty").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_keep_the_base() {
        let cli = parse(&[]);
        assert_eq!(cli.apply(Config::default()), Config::default());
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(cli.input_path().is_none());
    }

    #[test]
    fn names_apply_in_order() {
        let cfg = parse(&["--names", "none,payload"]).apply(Config::default());
        assert!(cfg.print_payload_field_names);
        assert!(!cfg.print_context_field_names);
        assert!(!cfg.print_header_field_names);

        let cfg = parse(&["-n", "all"]).apply(Config::default());
        assert!(cfg.print_scope_field_names && cfg.print_header_field_names);

        let cfg = parse(&["-n", "ctx"]).apply(Config {
            print_context_field_names: false,
            ..Config::default()
        });
        assert!(cfg.print_context_field_names);
    }

    #[test]
    fn fields_accept_trace_prefixed_names() {
        let cfg = parse(&["-f", "none,trace:procname,loglevel"]).apply(Config::default());
        assert!(cfg.print_trace_procname_field);
        assert!(cfg.print_loglevel_field);
        assert!(!cfg.print_trace_hostname_field);
        assert!(!cfg.print_trace_vpid_field);
        assert!(!cfg.print_emf_field);

        assert!(Cli::try_parse_from(["trace-pretty", "-f", "hostname"]).is_err());
    }

    #[test]
    fn clock_flags() {
        let cfg = parse(&["--clock-gmt", "--clock-date", "--no-delta", "--clock-cycles"])
            .apply(Config::default());
        assert!(cfg.clock_gmt && cfg.clock_date && cfg.print_timestamp_cycles);
        assert!(!cfg.print_delta_field);
        assert!(!cfg.clock_seconds);
    }

    #[test]
    fn color_policy() {
        let on = TerminalColors::new(true);
        let off = TerminalColors::new(false);

        let always = parse(&["--color", "always"]);
        let (cfg, out, err) = always.resolve_colors(Config::default(), off, off);
        assert!(cfg.use_colors && out.enabled() && err.enabled());

        let never = parse(&["--color", "never"]);
        let (cfg, out, err) = never.resolve_colors(Config::default(), on, on);
        assert!(!cfg.use_colors && !out.enabled() && !err.enabled());
    }

    #[test]
    fn auto_colors_each_stream_independently() {
        let no_env = |_: &str| None;
        let tty = TerminalColors::detect_from(true, no_env);
        let file = TerminalColors::detect_from(false, no_env);

        let (cfg, out, err) = parse(&[]).resolve_colors(Config::default(), tty, file);
        assert!(cfg.use_colors && out.enabled());
        assert!(!err.enabled());

        let (cfg, out, err) = parse(&[]).resolve_colors(Config::default(), file, tty);
        assert!(!cfg.use_colors && !out.enabled());
        assert!(err.enabled());
    }

    #[test]
    fn dash_means_stdin() {
        assert!(parse(&["-"]).input_path().is_none());
        assert_eq!(
            parse(&["trace.jsonl"]).input_path(),
            Some(&PathBuf::from("trace.jsonl"))
        );
    }
}
