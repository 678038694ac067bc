#![warn(clippy::pedantic)]
#![deny(unsafe_code)]

use log::{LevelFilter, Metadata, Record};

/// Logger for the tool surface. Diagnostics go to stderr so generated
/// output and probe traffic on stdout stay clean for capture.
pub struct ToolLogger;

static LOGGER: ToolLogger = ToolLogger;

impl log::Log for ToolLogger {
    fn enabled(&self, _meta: &Metadata) -> bool { true }

    fn log(&self, record: &Record) {
        eprintln!(
            "{:20} {:5} {}",
            record.target(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

pub fn init(verbose: bool) {
    // a second init keeps the first logger
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
}
