//! Event log adapters.
//!
//! Both implement [`EventLogPort`]:
//!
//! - [`LogEventSink`] writes records to the `log` facade (serial console).
//! - [`LineEventLog`] appends one text line per record to any
//!   `std::io::Write` (a file on the host, an SD card on the device).
//!
//! Line layout: `2026/3/7 9:05:04 - Cat Detected, Distance: 52.30cm, PIR: 1`

use std::io::{ErrorKind, Write};

use log::info;

use crate::app::events::DetectionRecord;
use crate::app::ports::EventLogPort;
use crate::error::EventLogError;

/// Adapter that logs every [`DetectionRecord`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogPort for LogEventSink {
    fn append(&mut self, record: &DetectionRecord) -> Result<(), EventLogError> {
        info!("EVENT | {}", record);
        Ok(())
    }
}

/// Line-oriented text log over an arbitrary writer.
pub struct LineEventLog<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> LineEventLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Records successfully appended.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventLogPort for LineEventLog<W> {
    fn append(&mut self, record: &DetectionRecord) -> Result<(), EventLogError> {
        writeln!(self.writer, "{}", record)
            .and_then(|()| self.writer.flush())
            .map_err(|e| match e.kind() {
                ErrorKind::StorageFull | ErrorKind::WriteZero => EventLogError::Full,
                _ => EventLogError::IoError,
            })?;
        self.written += 1;
        Ok(())
    }
}

/// Fan-out to two sinks.  The first error wins, but both are attempted.
pub struct TeeEventLog<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: EventLogPort, B: EventLogPort> EventLogPort for TeeEventLog<A, B> {
    fn append(&mut self, record: &DetectionRecord) -> Result<(), EventLogError> {
        let a = self.first.append(record);
        let b = self.second.append(record);
        a.and(b)
    }
}
