//! Output sinks
//!
//! The runner hands every decoded chunk of child output to an
//! [`OutputSink`]. Formatting, timestamps and destination are the sink's
//! business; the runner never alters the text.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

/// Which child stream a chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => f.write_str("stdout"),
            OutputStream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Receives decoded output text
///
/// Executions running concurrently may share one sink, so writes can arrive
/// from several tasks at once.
pub trait OutputSink: Send + Sync {
    /// Record one chunk of output
    fn write(&self, text: &str);
}

/// Sink that emits each chunk as a `tracing` event
#[derive(Debug, Clone)]
pub struct TracingSink {
    source: String,
}

impl TracingSink {
    /// `source` is attached to every event as a field
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("shell")
    }
}

impl TracingSink {
    /// Message for one chunk; whitespace-only chunks produce no event
    fn event_text(text: &str) -> Option<&str> {
        let trimmed = text.trim_end();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl OutputSink for TracingSink {
    fn write(&self, text: &str) {
        if let Some(message) = Self::event_text(text) {
            info!(target: "shellexec::output", source = %self.source, "{}", message);
        }
    }
}

/// Sink that writes each chunk to an [`io::Write`] destination
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<io::Stdout> {
    /// Sink that forwards output to this process's stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write(&self, text: &str) {
        let mut writer = self.lock();
        if let Err(e) = writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
        {
            warn!(error = %e, "Failed to write command output");
        }
    }
}

/// Sink that keeps every chunk in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    chunks: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks received so far
    pub fn chunks(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// All chunks concatenated
    pub fn contents(&self) -> String {
        self.lock().concat()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.chunks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OutputSink for MemorySink {
    fn write(&self, text: &str) {
        self.lock().push(text.to_string());
    }
}
