//! Tracing subscriber setup. In the browser events go to the developer console;
//! natively they go to stderr. Callers must never record passwords or tokens
//! as span fields.

use super::errors::AppError;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Parses a verbosity value as a name or a number (`0` = error .. `4` = trace).
pub fn parse_level(level: &str) -> Option<Level> {
    let level = level.trim();
    if let Ok(parsed) = level.parse::<u8>() {
        return match parsed {
            0 => Some(Level::ERROR),
            1 => Some(Level::WARN),
            2 => Some(Level::INFO),
            3 => Some(Level::DEBUG),
            4 => Some(Level::TRACE),
            _ => None,
        };
    }

    match level.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Installs the global subscriber. Unknown levels fall back to `info`.
pub fn init(level: &str) -> Result<(), AppError> {
    let verbosity_level = parse_level(level).unwrap_or(Level::INFO);

    let fmt_layer = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(console_writer());

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .parse_lossy("");

    let subscriber = Registry::default().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| AppError::Config(format!("Failed to install logger: {err}")))
}

/// Level-aware browser console sink (`console.error`, `console.warn`, ...).
#[cfg(target_arch = "wasm32")]
fn console_writer() -> tracing_web::MakeWebConsoleWriter {
    tracing_web::MakeWebConsoleWriter::new()
}

#[cfg(not(target_arch = "wasm32"))]
fn console_writer() -> fn() -> std::io::Stderr {
    std::io::stderr
}
