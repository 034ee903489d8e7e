// Fri Oct 16 2026 - Alex

use log::LevelFilter;
use std::time::Instant;

pub fn level_from_str(s: &str) -> LevelFilter {
    match s.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Installs env_logger at `level`. Later calls are ignored.
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

/// Logs the time between construction and drop at debug level.
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("[TIMER] {} took {:.2}ms", self.name, self.elapsed_ms());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(level_from_str("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_init_logger_twice() {
        init_logger(LevelFilter::Warn);
        init_logger(LevelFilter::Debug);
    }
}
