//! Error types for the date picker.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for date picker operations.
pub type Result<T> = std::result::Result<T, DatePickerError>;

/// Errors surfaced by the date picker.
///
/// Every variant is a configuration problem. Runtime conditions such as
/// unparseable text or out-of-range dates are resolved by the codec and never
/// reach the caller as errors.
#[derive(Error, Debug)]
pub enum DatePickerError {
    /// The input format string is not a valid strftime pattern.
    #[error("invalid input format: {0:?}")]
    InvalidFormat(String),

    /// The locale name is not known to chrono.
    #[error("unknown locale: {0:?}")]
    UnknownLocale(String),

    /// The exclusion pattern failed to compile.
    #[error("invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// `min_date` lies after `max_date`.
    #[error("min date {min} is after max date {max}")]
    InvertedRange { min: NaiveDate, max: NaiveDate },

    /// A caller-supplied parser failed.
    #[error(transparent)]
    Parser(#[from] anyhow::Error),
}
