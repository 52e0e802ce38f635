//! tp-core: stable foundation for thermoprobe.
//!
//! Contains:
//! - units (uom SI types for resistance and temperature + constructors)
//! - numeric (Real + tolerances + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TpError, TpResult};
pub use numeric::*;
pub use units::*;
