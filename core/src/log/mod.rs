//! Logger and logging macros
//!
//! The backend is log4rs: a colored console appender and, when a log directory
//! is given, a rolling file appender plus a separate rolling error file.

use log::{Level, LevelFilter};
use log4rs::config::{Config, Root};
use std::sync::OnceLock;
use thiserror::Error;

mod appender;
pub mod consts;
mod logger;

pub use log::{debug as __debug, error as __error, info as __info, trace as __trace, warn as __warn};

use appender::AppenderSpec;
use consts::{DEFAULT_LOGGER_ENV, ERR_LOG_FILE_NAME, LOG_FILE_NAME};
use logger::Filters;

const CONSOLE_APPENDER: &str = "stdout";
const LOG_FILE_APPENDER: &str = "log_file";
const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

static INITIALIZED: OnceLock<()> = OnceLock::new();

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("logger spec parsing error: {0}")]
    ParseLoggerSpec(String),

    #[error("log directory {0} is not valid UTF-8")]
    InvalidLogDir(String),

    #[error("appender error: {0}")]
    Appender(String),

    #[error("logger configuration error: {0}")]
    Config(String),

    #[error("logger already initialized")]
    AlreadyInitialized,
}

/// Builds the log4rs configuration for the given filter expression.
/// The expression is applied on top of `RUST_LOG`, so command line filters win.
fn build_config(log_dir: Option<&str>, filters: &str) -> Result<Config, LogError> {
    let mut parsed = Filters::new(LevelFilter::Info);
    parsed.parse_env(DEFAULT_LOGGER_ENV).parse_expression(filters);

    let mut appenders = vec![AppenderSpec::console(CONSOLE_APPENDER, None)];
    if let Some(log_dir) = log_dir {
        appenders.push(AppenderSpec::roller(LOG_FILE_APPENDER, None, log_dir, LOG_FILE_NAME)?);
        appenders.push(AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), log_dir, ERR_LOG_FILE_NAME)?);
    }
    let names: Vec<&'static str> = appenders.iter().map(|x| x.name).collect();

    Config::builder()
        .appenders(appenders.into_iter().map(|x| x.appender()))
        .loggers(parsed.loggers(&names))
        .build(Root::builder().appenders(names.iter().copied()).build(parsed.root_level()))
        .map_err(|err| LogError::Config(err.to_string()))
}

/// Installs the global logger. Only the first successful call has an effect.
pub fn try_init_logger(log_dir: Option<&str>, filters: &str) -> Result<(), LogError> {
    if INITIALIZED.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    let config = build_config(log_dir, filters)?;
    log4rs::init_config(config).map_err(|_| LogError::AlreadyInitialized)?;
    let _ = INITIALIZED.set(());
    Ok(())
}

/// Installs the global logger, reporting failures on stderr.
/// Repeated calls are ignored, which lets tests call it freely.
pub fn init_logger(log_dir: Option<&str>, filters: &str) {
    match try_init_logger(log_dir, filters) {
        Ok(()) | Err(LogError::AlreadyInitialized) => {}
        Err(err) => eprintln!("failed to initialize logger: {err}"),
    }
}

/// Tells if the logger is currently set to a given level.
pub fn log_level_enabled(level: Level) -> bool {
    log::max_level() >= level
}

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => ( $crate::log::__trace!($($t)*) )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => ( $crate::log::__debug!($($t)*) )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => ( $crate::log::__info!($($t)*) )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => ( $crate::log::__warn!($($t)*) )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => ( $crate::log::__error!($($t)*) )
}
