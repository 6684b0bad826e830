//! Where log lines go.

use std::io::{self, Write};

/// Destination for completed-request log lines.
///
/// Called once per request. Write failures are ignored by the
/// middleware, so an implementation never has to worry about taking a
/// request down with it.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Writes each line to process stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")
    }
}
