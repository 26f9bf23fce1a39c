// SPDX-License-Identifier: Unlicense

//! Debug logging to the console.

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

struct Console;

static CONSOLE: Console = Console;

impl log::Log for Console {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "[{}] {}: [{}:{}] {}",
                record.level(),
                record.target(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install the console logger behind the `log` facade.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&CONSOLE).map(|()| log::set_max_level(LevelFilter::Debug))
}
