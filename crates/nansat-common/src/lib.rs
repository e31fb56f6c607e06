//! Common types and utilities shared across the nansat tools.

pub mod color;
pub mod error;
pub mod files;
pub mod logging;
pub mod time;

pub use color::{get_random_color, random_distant_color, Rgb, DEFAULT_MIN_DISTANCE};
pub use error::{NansatError, NansatResult};
pub use files::ensure_openable;
pub use logging::{init_tracing, LogLevel, Logger, LoggerRegistry, LOG_LEVEL_ENV};
pub use time::{parse_time, ParsedTime};
