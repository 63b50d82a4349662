//! Stderr logger for the `log` facade.
//!
//! While a full-screen view owns the terminal, output is held back and
//! written out once the view exits.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};


struct StderrLogger {
    suspended: AtomicBool,
    held: Mutex<Vec<String>>,
}


static LOGGER: StderrLogger = StderrLogger {
    suspended: AtomicBool::new(false),
    held: Mutex::new(Vec::new()),
};


impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.level(), record.args());

        if self.suspended.load(Ordering::SeqCst) {
            if let Ok(mut held) = self.held.lock() {
                held.push(line);
            }
            return;
        }

        let _ = writeln!(std::io::stderr(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}


/// Install the logger. `verbose` counts `-v` flags.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // A second init (e.g. from tests) keeps the first logger
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}


/// Hold log lines back until [`resume`] is called.
pub fn suspend() {
    LOGGER.suspended.store(true, Ordering::SeqCst);
}


/// Write out held lines and go back to logging directly.
pub fn resume() {
    LOGGER.suspended.store(false, Ordering::SeqCst);

    let held = match LOGGER.held.lock() {
        Ok(mut held) => std::mem::take(&mut *held),
        Err(_) => return,
    };

    let mut stderr = std::io::stderr();
    for line in held {
        let _ = writeln!(stderr, "{}", line);
    }
}
