//! Raw digitizer samples.

use crate::error::{SourceError, SourceResult};
use core::fmt;
use serde::Serialize;

/// Full-scale code of the 10-bit digitizer.
pub const DIGITIZER_MAX: u16 = 1023;

/// One unconverted digitizer reading in `[0, DIGITIZER_MAX]`.
///
/// A reading of 0 is how the hardware signals an open or shorted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RawSample(u16);

impl RawSample {
    pub const ZERO: Self = Self(0);
    pub const FULL_SCALE: Self = Self(DIGITIZER_MAX);

    /// Create a sample, rejecting codes above full scale.
    pub fn new(value: u16) -> SourceResult<Self> {
        if value > DIGITIZER_MAX {
            return Err(SourceError::OutOfRange {
                value: i64::from(value),
                max: DIGITIZER_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Get the raw code.
    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_full_scale(self) -> bool {
        self.0 == DIGITIZER_MAX
    }
}

impl TryFrom<i64> for RawSample {
    type Error = SourceError;

    fn try_from(value: i64) -> SourceResult<Self> {
        match u16::try_from(value) {
            Ok(code) if code <= DIGITIZER_MAX => Ok(Self(code)),
            _ => Err(SourceError::OutOfRange {
                value,
                max: DIGITIZER_MAX,
            }),
        }
    }
}

impl From<RawSample> for u16 {
    fn from(sample: RawSample) -> Self {
        sample.0
    }
}

impl fmt::Display for RawSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
