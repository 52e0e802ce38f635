//! Raw sample to temperature conversion.
//!
//! The thermistor sits on the high side of a divider whose low side is the
//! reference resistor, so the digitizer code falls as resistance rises:
//!
//! ```text
//! R   = (DIGITIZER_MAX - raw) * R0 / raw
//! 1/T = ln(R / R0) / B + 1 / 298.15
//! ```
//!
//! Anything that would feed a non-positive resistance into the logarithm, or
//! that lands at or below absolute zero, is reported as a [`SensorFault`]
//! instead of a number.

use crate::model::ThermistorModel;
use crate::sample::{DIGITIZER_MAX, RawSample};
use serde::Serialize;
use thiserror::Error;
use tp_core::units::{Resistance, constants, degc, ohms};
use tp_core::{Real, Temperature, TpError, ensure_positive};

/// Why a sample could not be turned into a temperature.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorFault {
    /// Raw code 0: open or shorted line.
    #[error("non-positive raw reading: sensor likely disconnected or shorted")]
    Disconnected,

    /// Raw code at full scale: computed resistance is zero.
    #[error("full-scale raw reading: thermistor reads as a short circuit")]
    ZeroResistance,

    /// The equation produced NaN or infinity.
    #[error("conversion produced a non-finite temperature")]
    NonFinite,

    /// The model puts this sample at or below absolute zero.
    #[error("model predicts a temperature at or below absolute zero")]
    BelowAbsoluteZero,
}

/// A successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    /// Thermistor resistance inferred from the divider (ohms)
    pub resistance_ohms: Real,
    /// Temperature (°C)
    pub celsius: Real,
}

impl Reading {
    pub fn resistance(&self) -> Resistance {
        ohms(self.resistance_ohms)
    }

    pub fn temperature(&self) -> Temperature {
        degc(self.celsius)
    }
}

/// Outcome of converting one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConversionResult {
    Temperature(Reading),
    Fault(SensorFault),
}

impl ConversionResult {
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Temperature in °C, if the conversion succeeded.
    pub fn celsius(&self) -> Option<Real> {
        match self {
            Self::Temperature(reading) => Some(reading.celsius),
            Self::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<SensorFault> {
        match self {
            Self::Temperature(_) => None,
            Self::Fault(fault) => Some(*fault),
        }
    }
}

/// Convert a raw digitizer sample with the given thermistor model.
///
/// Pure and total: identical inputs give bit-identical outputs and every
/// sample maps to either a temperature or a fault.
pub fn convert(raw: RawSample, model: &ThermistorModel) -> ConversionResult {
    if raw.is_zero() {
        return ConversionResult::Fault(SensorFault::Disconnected);
    }

    if raw.is_full_scale() {
        return ConversionResult::Fault(SensorFault::ZeroResistance);
    }

    // 1..DIGITIZER_MAX: resistance is strictly positive
    let code = Real::from(raw.value());
    let r0 = model.reference_resistance_ohms();
    let resistance = (Real::from(DIGITIZER_MAX) - code) * r0 / code;

    let inv_kelvin =
        (resistance / r0).ln() / model.beta() + 1.0 / ThermistorModel::REFERENCE_TEMPERATURE_K;

    match ensure_positive(1.0 / inv_kelvin, "thermistor temperature") {
        Ok(kelvin) => ConversionResult::Temperature(Reading {
            resistance_ohms: resistance,
            celsius: kelvin - constants::ZERO_CELSIUS_K,
        }),
        Err(TpError::NonPositive { .. }) => {
            ConversionResult::Fault(SensorFault::BelowAbsoluteZero)
        }
        Err(_) => ConversionResult::Fault(SensorFault::NonFinite),
    }
}

impl ThermistorModel {
    /// Convert a sample with this model. See [`convert`].
    pub fn convert(&self, raw: RawSample) -> ConversionResult {
        convert(raw, self)
    }
}
