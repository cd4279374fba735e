use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrendError {
    #[error("trend capacity must be >= 1")]
    ZeroCapacity,
}

#[derive(Debug, Error, Clone)]
pub enum SensorError {
    #[error("{sensor}: hardware error: {message}")]
    Hardware {
        sensor: &'static str,
        message: String,
    },
    #[error("{sensor}: gpio error: {message}")]
    Gpio {
        sensor: &'static str,
        message: String,
    },
    #[error("{sensor}: setup timed out")]
    Timeout { sensor: &'static str },
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Trend(#[from] TrendError),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
