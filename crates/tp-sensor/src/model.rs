//! Thermistor calibration constants.

use std::time::Duration;
use tp_core::units::{Resistance, as_ohms, constants, ohms};
use tp_core::{Real, TpResult, ensure_positive};

/// B-parameter model of an NTC thermistor in a divider with a fixed
/// reference resistor of the same nominal value.
///
/// Immutable once built; the scheduler holds one for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermistorModel {
    beta: Real,
    reference_resistance: Resistance,
}

impl ThermistorModel {
    /// Reference temperature of the B-parameter equation (25 °C).
    pub const REFERENCE_TEMPERATURE_K: Real = constants::T25_K;

    /// Create a model, rejecting non-finite or non-positive constants.
    pub fn new(beta: Real, reference_resistance: Resistance) -> TpResult<Self> {
        let beta = ensure_positive(beta, "thermistor beta")?;
        ensure_positive(as_ohms(reference_resistance), "reference resistance")?;
        Ok(Self {
            beta,
            reference_resistance,
        })
    }

    /// Grove temperature sensor v1.2: B = 3975, 10 kΩ.
    pub fn grove_v1_2() -> Self {
        Self {
            beta: SensorConfig::GROVE_V1_2.beta,
            reference_resistance: ohms(SensorConfig::GROVE_V1_2.reference_resistance_ohms),
        }
    }

    pub fn beta(&self) -> Real {
        self.beta
    }

    pub fn reference_resistance(&self) -> Resistance {
        self.reference_resistance
    }

    pub fn reference_resistance_ohms(&self) -> Real {
        as_ohms(self.reference_resistance)
    }
}

impl Default for ThermistorModel {
    fn default() -> Self {
        Self::grove_v1_2()
    }
}

/// The recognized sensor options. Fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Thermistor characteristic constant
    pub beta: Real,
    /// Divider reference resistance (ohms)
    pub reference_resistance_ohms: Real,
    /// Cadence between reads (milliseconds)
    pub sample_interval_ms: u64,
}

impl SensorConfig {
    pub const GROVE_V1_2: Self = Self {
        beta: 3975.0,
        reference_resistance_ohms: 10_000.0,
        sample_interval_ms: 1000,
    };

    /// Build the thermistor model these constants describe.
    pub fn thermistor(&self) -> TpResult<ThermistorModel> {
        ThermistorModel::new(self.beta, ohms(self.reference_resistance_ohms))
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::GROVE_V1_2
    }
}
