// pl-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn km(v: f64) -> Length {
    use uom::si::length::kilometer;
    Length::new::<kilometer>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

pub mod constants {
    /// Gravitational acceleration used by the hydraulic model (m/s²).
    pub const G_MPS2: f64 = 9.81;

    /// Velocity head v²/2g for a velocity in m/s.
    #[inline]
    pub fn velocity_head_m(velocity_mps: f64) -> f64 {
        velocity_mps * velocity_mps / (2.0 * G_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _q = m3ps(1.0);
        let _rho = kg_per_m3(1000.0);
        let _mu = pa_s(0.001);
    }

    #[test]
    fn scaled_constructors_store_si() {
        assert!((km(304.0).value - 304_000.0).abs() < 1e-9);
        assert!((mm(0.2).value - 0.0002).abs() < 1e-15);
    }

    #[test]
    fn velocity_head_of_one_mps() {
        let h = constants::velocity_head_m(1.0);
        assert!((h - 1.0 / 19.62).abs() < 1e-15);
    }
}
