//! Error types for the acquisition and reporting boundaries.
//!
//! Sensor faults are not here: a disconnected thermistor is a normal
//! [`ConversionResult`](crate::ConversionResult), not an error.

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Result type for acquisition source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for reporter operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failures to obtain a raw sample.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying stream could not be read.
    #[error("Failed to read from acquisition source")]
    Io(#[from] io::Error),

    /// A line did not hold a decimal integer.
    #[error("Unparseable raw reading on line {line}: {text:?}")]
    Parse {
        line: u64,
        text: String,
        #[source]
        source: ParseIntError,
    },

    /// The value falls outside the digitizer range.
    #[error("Raw reading {value} outside digitizer range [0, {max}]")]
    OutOfRange { value: i64, max: u16 },

    /// No more samples will arrive.
    #[error("Acquisition source exhausted")]
    Exhausted,
}

/// Failures to deliver output to the text sink.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report")]
    Io(#[from] io::Error),

    #[error("Failed to encode report")]
    Encode(#[from] serde_json::Error),
}
