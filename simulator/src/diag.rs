//! Diagnostic output stream.
//!
//! Every completed run emits exactly one `SIMLOG: <json>` line. The sink
//! trait decouples the engine from where those lines go: production writes
//! them to stderr, tests and the simulation harness capture them in memory.

use std::sync::Mutex;

/// Destination for diagnostic lines.
pub trait DiagnosticSink: Send + Sync {
    /// Emit one complete line (without trailing newline).
    fn emit(&self, line: &str);
}

/// Production sink: writes each line to stderr.
///
/// Stderr keeps diagnostics separate from the renderer's stdout output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Capturing sink: records every emitted line in memory.
///
/// Used by the simulation harness and by tests to assert on diagnostic
/// output.
///
/// # Example
///
/// ```
/// use simulator::diag::{DiagnosticSink, MemorySink};
///
/// let sink = MemorySink::new();
/// sink.emit("SIMLOG: {}");
/// assert_eq!(sink.lines(), vec!["SIMLOG: {}".to_owned()]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    /// All lines emitted so far, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Number of lines emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or_default()
    }

    /// Whether nothing has been emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit("first");
        sink.emit("second");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["first".to_owned(), "second".to_owned()]);
    }

    #[test]
    fn test_stderr_sink_is_constructible() {
        // Writing to stderr is not capturable here; construction and the
        // trait object path must at least hold together.
        let sink: &dyn DiagnosticSink = &StderrSink;
        sink.emit("SIMLOG: {}");
    }
}
