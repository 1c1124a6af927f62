//! `log` backend writing to the browser console

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Unknown or missing level names fall back to warnings only.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Route `log` output to the console. Safe to call repeatedly; later calls
/// only change the level.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    // Err means the logger is already installed
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(parse_level(level.as_deref()));
}
