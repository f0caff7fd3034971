//! Browser console output

use camview_core::{BindError, BindResult, BinderConfig, Diagnostic, DiagnosticSink};
use std::io::Write;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;

/// Writes diagnostics with `console.log(message, reason)`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create new console sink
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        web_sys::console::log_2(
            &JsValue::from_str(diagnostic.message),
            &JsValue::from_str(&diagnostic.reason),
        );
    }
}

/// One formatted log line, sent to the console when flushed or dropped
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// [`MakeWriter`] handing out [`ConsoleWriter`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// Route `tracing` output to the browser console
///
/// There is no process environment or wall clock here, so the filter comes
/// from `config` alone and timestamps are left out.
pub fn init_console_logging(config: &BinderConfig) -> BindResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(camview_diagnostics::log_filter(config)))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .try_init()
        .map_err(|e| BindError::InvalidConfiguration {
            message: format!("Failed to install console logger: {}", e),
        })
}
