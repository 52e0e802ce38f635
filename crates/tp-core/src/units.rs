// tp-core/src/units.rs

use uom::si::f64::{
    ElectricalResistance as UomElectricalResistance,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Resistance = UomElectricalResistance;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn ohms(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Read a resistance back out in ohms.
#[inline]
pub fn as_ohms(r: Resistance) -> f64 {
    use uom::si::electrical_resistance::ohm;
    r.get::<ohm>()
}

pub mod constants {
    /// 0 °C in kelvin.
    pub const ZERO_CELSIUS_K: f64 = 273.15;

    /// 25 °C in kelvin, the NTC datasheet reference point.
    pub const T25_K: f64 = 298.15;
}
