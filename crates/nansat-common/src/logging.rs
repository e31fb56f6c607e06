//! Named loggers with numeric verbosity levels.
//!
//! Levels follow the classic numeric scale (10 debug up to 50 critical) so
//! that `LOG_LEVEL=20` and `LOG_LEVEL=info` mean the same thing. Loggers are
//! handed out by a [`LoggerRegistry`]; asking for the same name twice returns
//! the same handle. Events are emitted through `tracing` with the logger name
//! attached as a field.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::error::NansatError;

/// Environment variable holding the default verbosity.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Time format of the console formatter.
const LOG_TIME_FORMAT: &str = "%I:%M:%S";

/// Numeric log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogLevel(u8);

impl LogLevel {
    pub const DEBUG: LogLevel = LogLevel(10);
    pub const INFO: LogLevel = LogLevel(20);
    pub const WARNING: LogLevel = LogLevel(30);
    pub const ERROR: LogLevel = LogLevel(40);
    pub const CRITICAL: LogLevel = LogLevel(50);

    pub const fn new(value: u8) -> Self {
        LogLevel(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Closest `tracing` level at or below this one.
    pub fn as_tracing(&self) -> tracing::Level {
        match self.0 {
            0..=9 => tracing::Level::TRACE,
            10..=19 => tracing::Level::DEBUG,
            20..=29 => tracing::Level::INFO,
            30..=39 => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        }
    }

    fn filter_directive(&self) -> &'static str {
        match self.as_tracing() {
            tracing::Level::TRACE => "trace",
            tracing::Level::DEBUG => "debug",
            tracing::Level::INFO => "info",
            tracing::Level::WARN => "warn",
            tracing::Level::ERROR => "error",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::WARNING
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LogLevel {
    type Err = NansatError;

    /// Accepts a number (`"20"`) or a level name (`"info"`, `"WARNING"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Ok(LogLevel(value));
        }

        match s.to_lowercase().as_str() {
            "trace" | "notset" => Ok(LogLevel(0)),
            "debug" => Ok(LogLevel::DEBUG),
            "info" => Ok(LogLevel::INFO),
            "warn" | "warning" => Ok(LogLevel::WARNING),
            "error" => Ok(LogLevel::ERROR),
            "critical" | "fatal" => Ok(LogLevel::CRITICAL),
            _ => Err(NansatError::Format(format!("unknown log level '{}'", s))),
        }
    }
}

/// A named logger handle.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: AtomicU8,
}

impl Logger {
    fn new(name: &str, level: LogLevel) -> Self {
        Self {
            name: name.to_string(),
            level: AtomicU8::new(level.value()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        LogLevel(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }

        let logger = self.name.as_str();
        match level.as_tracing() {
            tracing::Level::TRACE => tracing::trace!(logger, severity = level.0, "{}", message),
            tracing::Level::DEBUG => tracing::debug!(logger, severity = level.0, "{}", message),
            tracing::Level::INFO => tracing::info!(logger, severity = level.0, "{}", message),
            tracing::Level::WARN => tracing::warn!(logger, severity = level.0, "{}", message),
            tracing::Level::ERROR => tracing::error!(logger, severity = level.0, "{}", message),
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::DEBUG, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::INFO, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(LogLevel::WARNING, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::ERROR, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(LogLevel::CRITICAL, message);
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    default_level: LogLevel,
    loggers: HashMap<String, Arc<Logger>>,
}

/// Registry of named loggers.
///
/// The registry owns the default level. Passing an explicit level to
/// [`LoggerRegistry::add_logger`] updates that default, and every logger
/// acquired afterwards (new or existing) is set to the current default.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    inner: Mutex<RegistryInner>,
}

impl LoggerRegistry {
    pub fn new(default_level: LogLevel) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                default_level,
                loggers: HashMap::new(),
            }),
        }
    }

    /// Build a registry whose default level comes from `LOG_LEVEL`.
    ///
    /// A missing or unparsable value falls back to WARNING.
    pub fn from_env() -> Self {
        Self::new(level_from_env_value(std::env::var(LOG_LEVEL_ENV).ok().as_deref()))
    }

    pub fn default_level(&self) -> LogLevel {
        self.lock().default_level
    }

    /// Change the level given to loggers acquired from now on.
    pub fn set_default_level(&self, level: LogLevel) {
        self.lock().default_level = level;
    }

    /// Create or fetch the logger called `name`.
    ///
    /// Re-acquiring a name returns the existing handle, reconfigured to the
    /// current default level.
    pub fn add_logger(&self, name: &str, level: Option<LogLevel>) -> Arc<Logger> {
        let mut inner = self.lock();
        if let Some(level) = level {
            inner.default_level = level;
        }
        let effective = inner.default_level;

        let logger = inner
            .loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name, effective)))
            .clone();
        logger.set_level(effective);
        logger
    }

    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.lock().loggers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        // Every write is a single insert or level store, so poison is harmless.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn level_from_env_value(raw: Option<&str>) -> LogLevel {
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(value = %raw, error = %e, "Ignoring invalid {}", LOG_LEVEL_ENV);
            LogLevel::default()
        }),
        None => LogLevel::default(),
    }
}

/// Install the console subscriber.
///
/// `RUST_LOG` overrides `level` when set. Returns `false` when a global
/// subscriber was already installed.
pub fn init_tracing(level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
