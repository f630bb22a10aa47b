use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use super::{LogRecord, NamespaceFilter, Severity};

/// Destination for emitted records. Emitting is fire-and-forget.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}

/// Writes each record as one line of JSON.
///
/// The line is exactly [`LogRecord::to_json`], so severity, metadata and the
/// message sit at the top level. Records below the [`NamespaceFilter`]'s
/// threshold for their namespace are dropped. The writer is any
/// `tracing-subscriber` [`MakeWriter`], stdout by default. Write errors are
/// ignored.
pub struct JsonSink<W = fn() -> io::Stdout> {
    make_writer: W,
    filter: NamespaceFilter,
}

impl JsonSink {
    /// A sink writing to stdout with no filtering.
    pub fn stdout() -> Self {
        Self::new(io::stdout as fn() -> io::Stdout)
    }
}

impl<W> JsonSink<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync,
{
    pub fn new(make_writer: W) -> Self {
        Self {
            make_writer,
            filter: NamespaceFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: NamespaceFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl<W> fmt::Debug for JsonSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSink")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<W> LogSink for JsonSink<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync,
{
    fn emit(&self, record: &LogRecord) {
        if !self.filter.enabled(&record.namespace, record.severity) {
            return;
        }

        let mut line = record.to_json().to_string();
        line.push('\n');

        let mut writer = self.make_writer.make_writer();
        let _ = writer.write_all(line.as_bytes());
    }
}

/// Keeps every record in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    /// Returns a snapshot of the records emitted so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the records emitted at `severity`.
    pub fn records_at(&self, severity: Severity) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.severity == severity)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
