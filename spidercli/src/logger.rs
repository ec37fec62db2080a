use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "error".red(),
            Level::Warn => "warn".yellow(),
            Level::Info => "info".green(),
            Level::Debug => "debug".blue(),
            Level::Trace => "trace".bright_black(),
        };
        eprintln!("[{level} {}] {}", record.target(), record.args());
    }

    fn flush(&self) {}
}

pub(crate) const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Route the `log` records to stderr. A second call keeps the first logger.
pub(crate) fn init(verbose: u8) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_for(verbose));
    }
}
