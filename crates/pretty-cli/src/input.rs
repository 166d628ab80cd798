//! Reading JSON-lines input and feeding it to a printer.

use std::io::{BufRead, Write};

use text_pretty::Printer;
use trace_ir::Message;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Messages rendered.
    pub printed: usize,
    /// Messages skipped because they failed to render.
    pub skipped: usize,
}

/// Render every message read from `reader`, one JSON document per line.
///
/// Blank lines are ignored. Malformed JSON always stops the run. A message
/// that fails to render stops the run unless `keep_going` is set and the
/// failure is not a write error, in which case it is logged and skipped.
pub fn pretty_print<R, O, E>(
    reader: R,
    printer: &mut Printer<O, E>,
    keep_going: bool,
) -> Result<Summary>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut summary = Summary::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let msg: Message = serde_json::from_str(&line).map_err(|source| Error::Json {
            line: lineno,
            source,
        })?;
        match printer.print_message(&msg) {
            Ok(()) => summary.printed += 1,
            Err(e) if keep_going && !matches!(e, text_pretty::Error::Write(_)) => {
                warn!(line = lineno, error = %e, "skipping message");
                summary.skipped += 1;
            }
            Err(source) => {
                return Err(Error::Render {
                    line: lineno,
                    source,
                });
            }
        }
    }
    debug!(printed = summary.printed, skipped = summary.skipped, "input exhausted");
    Ok(summary)
}
