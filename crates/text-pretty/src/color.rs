//! Terminal color capability and the printer's color theme.

use std::{
    env,
    io::{self, IsTerminal},
};

use tracing::debug;

/// SGR reset.
const RESET: &str = "\x1b[0m";
/// SGR bold.
const BOLD: &str = "\x1b[1m";
/// SGR yellow foreground.
const FG_YELLOW: &str = "\x1b[33m";
/// SGR cyan foreground.
const FG_CYAN: &str = "\x1b[36m";
/// SGR bright red foreground.
const FG_BRIGHT_RED: &str = "\x1b[91m";
/// SGR bright yellow foreground.
const FG_BRIGHT_YELLOW: &str = "\x1b[93m";
/// SGR bright magenta foreground.
const FG_BRIGHT_MAGENTA: &str = "\x1b[95m";

/// Source of ANSI SGR sequences that knows whether the terminal wants them.
///
/// Every accessor returns an empty string when colors are unsupported, so
/// callers can append the result unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalColors {
    /// Whether SGR sequences are emitted.
    enabled: bool,
}

impl TerminalColors {
    /// Colors forced on or off.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Detect color support for standard output.
    pub fn detect_stdout() -> Self {
        Self::detect_from(io::stdout().is_terminal(), |k| env::var(k).ok())
    }

    /// Detect color support for standard error.
    pub fn detect_stderr() -> Self {
        Self::detect_from(io::stderr().is_terminal(), |k| env::var(k).ok())
    }

    /// Detect color support from explicit inputs.
    ///
    /// `NO_COLOR` disables colors, a truthy `FORCE_COLOR` enables them even
    /// without a terminal, and `TERM=dumb` disables them.
    pub fn detect_from(is_tty: bool, var: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            false
        } else if var("FORCE_COLOR").is_some_and(|v| is_truthy(&v)) {
            true
        } else if !is_tty {
            false
        } else {
            !var("TERM").is_some_and(|t| t == "dumb")
        };
        debug!(is_tty, enabled, "terminal color support");
        Self { enabled }
    }

    /// Whether colors are emitted.
    pub const fn enabled(self) -> bool {
        self.enabled
    }

    /// Pick `code` when enabled.
    const fn pick(self, code: &'static str) -> &'static str {
        if self.enabled { code } else { "" }
    }

    /// Reset all attributes.
    pub const fn reset(self) -> &'static str {
        self.pick(RESET)
    }

    /// Bold.
    pub const fn bold(self) -> &'static str {
        self.pick(BOLD)
    }

    /// Yellow foreground.
    pub const fn fg_yellow(self) -> &'static str {
        self.pick(FG_YELLOW)
    }

    /// Cyan foreground.
    pub const fn fg_cyan(self) -> &'static str {
        self.pick(FG_CYAN)
    }

    /// Bright red foreground.
    pub const fn fg_bright_red(self) -> &'static str {
        self.pick(FG_BRIGHT_RED)
    }

    /// Bright yellow foreground.
    pub const fn fg_bright_yellow(self) -> &'static str {
        self.pick(FG_BRIGHT_YELLOW)
    }

    /// Bright magenta foreground.
    pub const fn fg_bright_magenta(self) -> &'static str {
        self.pick(FG_BRIGHT_MAGENTA)
    }
}

/// Interpret an environment flag value.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "always"
    )
}

/// Named text styles used by the printer.
///
/// Built once per printer; a plain theme holds only empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorTheme {
    /// Header and scope names (`timestamp = `, `event.fields = `).
    pub name: String,
    /// Structure member names.
    pub field_name: String,
    /// Reset sequence closing every styled span.
    pub reset: String,
    /// String values.
    pub string: String,
    /// Numeric and boolean values.
    pub number: String,
    /// Enumeration labels.
    pub enum_label: String,
    /// `<unknown>` placeholders.
    pub unknown: String,
    /// Event names.
    pub event_name: String,
    /// Timestamps.
    pub timestamp: String,
}

impl ColorTheme {
    /// A theme that emits no escape sequences.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Resolve the theme from a terminal color source.
    pub fn from_terminal(colors: TerminalColors) -> Self {
        let bold = colors.bold();
        Self {
            name: bold.to_string(),
            field_name: colors.fg_cyan().to_string(),
            reset: colors.reset().to_string(),
            string: bold.to_string(),
            number: bold.to_string(),
            enum_label: bold.to_string(),
            unknown: format!("{bold}{}", colors.fg_bright_red()),
            event_name: format!("{bold}{}", colors.fg_bright_magenta()),
            timestamp: format!("{bold}{}", colors.fg_bright_yellow()),
        }
    }
}

/// Append `text` wrapped in `color` and the theme's reset.
pub(crate) fn push_styled(buf: &mut String, theme: &ColorTheme, color: &str, text: &str) {
    buf.push_str(color);
    buf.push_str(text);
    buf.push_str(&theme.reset);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |k| {
            pairs
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn detection_rules() {
        assert!(TerminalColors::detect_from(true, env_of(&[])).enabled());
        assert!(!TerminalColors::detect_from(false, env_of(&[])).enabled());
        assert!(!TerminalColors::detect_from(true, env_of(&[("NO_COLOR", "1")])).enabled());
        assert!(!TerminalColors::detect_from(true, env_of(&[("TERM", "dumb")])).enabled());
        assert!(TerminalColors::detect_from(false, env_of(&[("FORCE_COLOR", "1")])).enabled());
        assert!(
            !TerminalColors::detect_from(true, env_of(&[("NO_COLOR", "1"), ("FORCE_COLOR", "1")]))
                .enabled()
        );
    }

    #[test]
    fn disabled_source_yields_plain_theme() {
        assert_eq!(
            ColorTheme::from_terminal(TerminalColors::new(false)),
            ColorTheme::plain()
        );
    }

    #[test]
    fn enabled_theme_composes_sequences() {
        let theme = ColorTheme::from_terminal(TerminalColors::new(true));
        assert_eq!(theme.unknown, "\x1b[1m\x1b[91m");
        assert_eq!(theme.field_name, "\x1b[36m");
        assert_eq!(theme.reset, "\x1b[0m");
    }
}
