//! Error types for the simulation core.

use std::time::Duration;

/// Errors returned by fallible simulation and configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    /// A step interval below the configured floor was requested.
    /// The current interval is left unchanged.
    #[error("step interval {requested:?} is below the minimum of {floor:?}")]
    IntervalBelowFloor { requested: Duration, floor: Duration },

    /// No preset exists at the requested index.
    #[error("no preset at index {index} ({available} available)")]
    UnknownPreset { index: usize, available: usize },

    /// Random fill density outside `[0, 1]`.
    #[error("density {0} is outside [0, 1]")]
    InvalidDensity(f64),

    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration loaded but holds values the simulation cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type LifeResult<T> = Result<T, LifeError>;
