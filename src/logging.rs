//! Module: logging
//!
//! Purpose: Formatting for the diagnostic serial channel.
//!
//! Diagnostics ride a serial interface of their own, fully independent
//! of the data transport; they carry human-readable lines only and are
//! not part of the wire contract. Formatting happens into a fixed
//! stack buffer so no path here allocates.
//!
//! Format: `[timestamp_us] LEVEL: message\n`
//!
//! The acquisition ISR never logs; it only flips atomic flags that the
//! monitor task turns into lines here, so every sink write happens in
//! task context where blocking is acceptable.

use core::fmt::{self, Write};

/// Line buffer size; longer messages are truncated.
pub const MAX_LINE_LEN: usize = 160;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
        }
    }
}

/// Byte sink for formatted diagnostic lines.
///
/// Implemented by the console UART in the firmware and by plain
/// buffers in tests. Task context only; may block briefly.
pub trait DiagSink {
    fn write_line(&mut self, line: &[u8]);
}

struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Write for BufWriter<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Format one diagnostic line into `buf`, returning the used length.
pub fn format_line(
    buf: &mut [u8],
    timestamp_us: i64,
    level: LogLevel,
    args: fmt::Arguments<'_>,
) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = write!(
        writer,
        "[{:10}] {}: {}\n",
        timestamp_us,
        level.as_str(),
        args
    );
    writer.pos
}

/// Format and emit one line on the sink.
pub fn log_line<S: DiagSink>(
    sink: &mut S,
    timestamp_us: i64,
    level: LogLevel,
    args: fmt::Arguments<'_>,
) {
    let mut buf = [0u8; MAX_LINE_LEN];
    let len = format_line(&mut buf, timestamp_us, level, args);
    sink.write_line(&buf[..len]);
}
