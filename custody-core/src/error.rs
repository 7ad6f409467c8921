//! Error types for the custody engine.

use thiserror::Error;

/// Errors that can occur when building engine inputs.
///
/// The engine itself never fails on well-typed input; these cover parsing
/// of user-supplied values.
#[derive(Error, Debug)]
pub enum CustodyError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error(
        "Unknown custody pattern '{0}'. Expected one of: alternating-weeks, 2-2-3, weekday-weekend"
    )]
    UnknownPattern(String),

    #[error("Unknown repeat frequency '{0}'. Expected one of: daily, weekly, biweekly, monthly")]
    UnknownFrequency(String),

    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("Unknown scope '{0}'. Expected one of: this, following, all")]
    UnknownScope(String),
}

/// Result type alias for custody operations.
pub type CustodyResult<T> = Result<T, CustodyError>;
