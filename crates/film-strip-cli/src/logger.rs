use chrono::Local;
use film_strip::DEGRADED_FRAME_TARGET;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Timestamped stderr logger that counts photos the library left black
#[derive(Clone)]
pub struct CliLogger {
    level: LevelFilter,
    degraded: Arc<AtomicUsize>,
}

impl CliLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            degraded: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Photos reported as unreadable so far
    pub fn degraded_frames(&self) -> usize {
        self.degraded.load(Ordering::Relaxed)
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() == Level::Warn && record.target() == DEGRADED_FRAME_TARGET {
            self.degraded.fetch_add(1, Ordering::Relaxed);
        }

        let line = format!(
            "{} {:<5} {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        );
        // Nowhere to report a failed write to stderr
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
