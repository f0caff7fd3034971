//! Diagnostic sinks

use camview_core::{Diagnostic, DiagnosticSink};
use parking_lot::Mutex;
use std::io::Write;

/// Writes diagnostics as `warn` events on the `camview::diagnostic` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Create new tracing sink
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic.denial {
            Some(denial) => tracing::warn!(
                target: "camview::diagnostic",
                category = ?diagnostic.category,
                denial = %denial,
                reason = %diagnostic.reason,
                "{}",
                diagnostic.message
            ),
            None => tracing::warn!(
                target: "camview::diagnostic",
                category = ?diagnostic.category,
                reason = %diagnostic.reason,
                "{}",
                diagnostic.message
            ),
        }
    }
}

/// Writes each diagnostic as one JSON object per line
pub struct JsonLineSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLineSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> DiagnosticSink for JsonLineSink<W> {
    fn emit(&self, diagnostic: &Diagnostic) {
        let line = match serde_json::to_string(diagnostic) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to serialize diagnostic: {}", e);
                return;
            }
        };

        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            tracing::error!("Failed to write diagnostic: {}", e);
        }
    }
}
