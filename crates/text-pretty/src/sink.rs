//! Reusable line buffer and its two destinations.

use std::io::Write;

use crate::Result;

/// A growable text buffer plus the primary and diagnostic output streams.
///
/// The buffer is cleared, never reallocated, between messages. Text only
/// reaches a stream through [`OutputSink::flush_out`] or
/// [`OutputSink::flush_err`].
#[derive(Debug)]
pub struct OutputSink<O, E> {
    /// Text of the message being rendered.
    buf: String,
    /// Primary stream, for event lines.
    out: O,
    /// Diagnostic stream, for discarded-items warnings.
    err: E,
}

impl<O: Write, E: Write> OutputSink<O, E> {
    /// Create a sink over the given streams.
    pub const fn new(out: O, err: E) -> Self {
        Self {
            buf: String::new(),
            out,
            err,
        }
    }

    /// Empty the buffer, keeping its allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Text accumulated since the last clear.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Mutable access to the buffer.
    pub fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    /// Write the buffer to the primary stream.
    pub fn flush_out(&mut self) -> Result<()> {
        write_all(&mut self.out, &self.buf)
    }

    /// Write the buffer to the diagnostic stream.
    pub fn flush_err(&mut self) -> Result<()> {
        write_all(&mut self.err, &self.buf)
    }

    /// Borrow the primary stream.
    pub const fn out(&self) -> &O {
        &self.out
    }

    /// Borrow the diagnostic stream.
    pub const fn err(&self) -> &E {
        &self.err
    }

    /// Take back both streams.
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// Write `text` to `stream` and flush it; empty text is a no-op.
fn write_all<W: Write>(stream: &mut W, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    stream.write_all(text.as_bytes())?;
    stream.flush()?;
    Ok(())
}
