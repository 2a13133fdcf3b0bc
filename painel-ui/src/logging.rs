//! Console Logging
//!
//! `tracing` output routed to the browser console, one console call per
//! event at the matching level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Buffers one formatted event and hands it to the console on drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }

        let value = JsValue::from_str(line);
        match self.level {
            Level::ERROR => console::error_1(&value),
            Level::WARN => console::warn_1(&value),
            Level::INFO => console::info_1(&value),
            _ => console::debug_1(&value),
        }
    }
}

pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install the console subscriber
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(format!("painel={level},painel_ui={level}"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // No clock in the browser sandbox; the console stamps events itself
    let _ = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .try_init();
}
