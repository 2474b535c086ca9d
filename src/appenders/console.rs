//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result};
use std::io::{IsTerminal, Write};

/// Prints rendered lines to the terminal.
///
/// WARN and ERROR go to stderr, everything else to stdout. Coloring
/// happens in the formatters; escape sequences are stripped from lines
/// whose target stream is not a terminal.
pub struct ConsoleAppender {
    stderr_from: LogLevel,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            stderr_from: LogLevel::Warn,
        }
    }

    /// Send every level at or above `level` to stderr instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use rust_named_logger::appenders::ConsoleAppender;
    /// use rust_named_logger::LogLevel;
    ///
    /// // Everything on stderr
    /// let appender = ConsoleAppender::new().with_stderr_from(LogLevel::Trace);
    /// ```
    #[must_use]
    pub fn with_stderr_from(mut self, level: LogLevel) -> Self {
        self.stderr_from = level;
        self
    }

    fn uses_stderr(&self, level: LogLevel) -> bool {
        level >= self.stderr_from
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove ANSI escape sequences (`ESC [ ... final-byte`) from a line
fn strip_ansi(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        if chars.clone().next() == Some('[') {
            chars.next();
            // Parameters and intermediates run until a byte in '@'..='~'
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        }
    }

    out
}

fn write_line<W: Write + IsTerminal>(mut stream: W, line: &str) -> Result<()> {
    if stream.is_terminal() {
        writeln!(stream, "{}", line)?;
    } else {
        writeln!(stream, "{}", strip_ansi(line))?;
    }
    Ok(())
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if self.uses_stderr(entry.level) {
            write_line(std::io::stderr().lock(), &entry.line)
        } else {
            write_line(std::io::stdout().lock(), &entry.line)
        }
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
