// cm-core/src/units.rs

use uom::si::f64::{
    MolarVolume as UomMolarVolume, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type MolarVolume = UomMolarVolume;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m3_per_mol(v: f64) -> MolarVolume {
    use uom::si::molar_volume::cubic_meter_per_mole;
    MolarVolume::new::<cubic_meter_per_mole>(v)
}

/// Pressure in Pa.
#[inline]
pub fn pressure_pa(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

/// Temperature in K.
#[inline]
pub fn temperature_k(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Molar volume in m³/mol.
#[inline]
pub fn molar_volume_m3(v: MolarVolume) -> f64 {
    use uom::si::molar_volume::cubic_meter_per_mole;
    v.get::<cubic_meter_per_mole>()
}

/// Molar volume in cm³/mol (the customary unit for tabulated EOS results).
#[inline]
pub fn molar_volume_cm3(v: MolarVolume) -> f64 {
    molar_volume_m3(v) * 1e6
}

pub mod constants {
    /// Molar gas constant [J/(mol·K)].
    pub const R: f64 = 8.314_462_618;
}
