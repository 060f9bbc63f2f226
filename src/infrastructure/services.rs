use gloo_timers::callback::Timeout;

use crate::domain::chart::ClearScheduler;
use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

/// Logger writing to the browser console.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = entry.render();
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => {
                gloo::console::debug!(formatted);
            }
            LogLevel::Info => {
                gloo::console::info!(formatted);
            }
            LogLevel::Warn => {
                gloo::console::warn!(formatted);
            }
            LogLevel::Error => {
                gloo::console::error!(formatted);
            }
        }
    }
}

/// Wall-clock time from `js_sys::Date`.
#[derive(Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// `setTimeout`-backed scheduler. Dropping the held `Timeout` cancels it.
#[derive(Default)]
pub struct GlooClearScheduler {
    pending: Option<Timeout>,
}

impl GlooClearScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClearScheduler for GlooClearScheduler {
    fn schedule(&mut self, delay_ms: u32, on_fire: Box<dyn FnOnce()>) {
        self.pending.take();
        self.pending = Some(Timeout::new(delay_ms, on_fire));
    }

    fn cancel(&mut self) {
        self.pending.take();
    }
}
