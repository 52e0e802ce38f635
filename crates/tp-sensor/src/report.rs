//! Typed report events.
//!
//! The scheduler emits one [`Report`] per acquired sample. Turning it into
//! text (or JSON) is the reporter's job.

use crate::convert::{ConversionResult, SensorFault};
use crate::sample::RawSample;
use serde::Serialize;

/// Printed once after the output sink comes up.
pub const BANNER: &str = "--- Grove Temp Sensor v1.2 Test ---";

/// Line printed for the canonical disconnected-sensor fault.
pub const DISCONNECTED_MESSAGE: &str = "Error: Raw value is 0. Check your Grove cable!";

/// One sampling cycle's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Report {
    /// 1-based cycle number since the scheduler started
    pub cycle: u64,
    /// Sample as read from the digitizer
    pub raw: RawSample,
    /// What the converter made of it
    pub result: ConversionResult,
}

impl Report {
    pub fn new(cycle: u64, raw: RawSample, result: ConversionResult) -> Self {
        Self { cycle, raw, result }
    }

    /// Human-readable status line, without a trailing newline.
    pub fn status_line(&self) -> String {
        match self.result {
            ConversionResult::Temperature(reading) => {
                format!("Raw Value: {} | Celsius: {:.2}", self.raw, reading.celsius)
            }
            ConversionResult::Fault(SensorFault::Disconnected) => DISCONNECTED_MESSAGE.to_string(),
            ConversionResult::Fault(fault) => {
                format!("Error: Raw value is {} ({}).", self.raw, fault)
            }
        }
    }
}
