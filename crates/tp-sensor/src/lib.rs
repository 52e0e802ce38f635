//! Thermistor sampling, conversion and reporting for thermoprobe.
//!
//! A Grove-style NTC thermistor sits in a voltage divider in front of a 10-bit
//! digitizer. Once per second the scheduler pulls a raw sample from an
//! acquisition source, converts it with the B-parameter equation and hands the
//! outcome to a reporter.
//!
//! # Architecture
//!
//! ```text
//!  AcquisitionSource ──RawSample──▶ convert(raw, &ThermistorModel)
//!                                            │
//!                                     ConversionResult
//!                                            │
//!                      Reporter ◀──Report────┘      (Scheduler: once per 1000 ms)
//! ```
//!
//! - The converter is a pure function. Sensor faults are values, never errors.
//! - Sources and reporters are traits so the loop runs against a serial
//!   stream in production and scripted collaborators in tests.
//! - Timing sits behind [`Timer`] so cadence can be checked without sleeping.

pub mod convert;
pub mod error;
pub mod model;
pub mod report;
pub mod reporter;
pub mod sample;
pub mod sampled;
pub mod scheduler;
pub mod source;

pub use convert::{ConversionResult, Reading, SensorFault, convert};
pub use error::{ReportError, ReportResult, SourceError, SourceResult};
pub use model::{SensorConfig, ThermistorModel};
pub use report::{BANNER, DISCONNECTED_MESSAGE, Report};
pub use reporter::{JsonLinesReporter, Reporter, TextReporter};
pub use sample::{DIGITIZER_MAX, RawSample};
pub use sampled::{SampleClock, SampleConfig, SystemTimer, Timer};
pub use scheduler::Scheduler;
pub use source::{AcquisitionSource, LineSource, ScriptedSource};
