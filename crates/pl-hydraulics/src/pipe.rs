//! Pipe candidate: hydraulic properties and capital cost for one diameter.

use crate::common::check_positive;
use crate::error::{HydraulicsError, HydraulicsResult};
use crate::friction::{ColebrookConfig, friction_factor_with};
use pl_core::constants::velocity_head_m;
use pl_core::units::{Area, Density, DynVisc, Length, Velocity, VolumeRate};
use uom::si::area::square_meter;
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

/// Exponent relating one pipe to two equal parallel pipes at equal head loss.
///
/// Two pipes sharing the flow behave like a single pipe of diameter `d·2^(2/5)`.
pub const PARALLEL_DIAMETER_EXPONENT: f64 = 2.0 / 5.0;

/// Incompressible fluid carried by the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Fluid {
    pub density: Density,
    pub viscosity: DynVisc,
}

/// Linear capital cost curve, `rate = slope · d + intercept` in $/km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCurve {
    /// $/km per meter of nominal diameter
    pub slope_per_m: f64,
    /// $/km at zero diameter
    pub intercept_per_km: f64,
}

impl CostCurve {
    /// Cost rate ($/km) of a single pipe of the given nominal diameter.
    #[inline]
    pub fn rate_per_km(&self, nominal_diameter_m: f64) -> f64 {
        self.slope_per_m * nominal_diameter_m + self.intercept_per_km
    }
}

/// Everything about the pipe that does not depend on the chosen diameter.
#[derive(Debug, Clone, Copy)]
pub struct PipeSpec {
    /// Absolute wall roughness
    pub roughness: Length,
    /// Total volumetric flow through the line
    pub flow: VolumeRate,
    pub cost_curve: CostCurve,
    /// Two equal pipes laid side by side instead of one
    pub parallel: bool,
}

/// Hydraulic diameter used for all flow calculations.
#[inline]
pub fn effective_diameter_m(nominal_diameter_m: f64, parallel: bool) -> f64 {
    if parallel {
        nominal_diameter_m * 2f64.powf(PARALLEL_DIAMETER_EXPONENT)
    } else {
        nominal_diameter_m
    }
}

/// Derived properties of one candidate diameter.
///
/// Built once per diameter and read-only afterwards. `diameter` is the
/// effective hydraulic diameter; `nominal_diameter` is what gets purchased.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeCandidate {
    pub nominal_diameter: Length,
    pub diameter: Length,
    pub parallel: bool,
    /// Capital cost, $/km of route (both pipes when parallel)
    pub cost_rate_per_km: f64,
    pub relative_roughness: f64,
    pub area: Area,
    pub flow: VolumeRate,
    pub velocity: Velocity,
    pub reynolds: f64,
    pub friction_factor: f64,
}

impl PipeCandidate {
    /// Build the candidate for a nominal diameter.
    ///
    /// # Errors
    /// - `NonPhysical` for non-positive diameters, densities or viscosities.
    /// - `ConvergenceFailed` propagated from the friction solve; the caller
    ///   must treat the candidate as infeasible.
    pub fn new(
        spec: &PipeSpec,
        fluid: &Fluid,
        nominal_diameter: Length,
        friction: &ColebrookConfig,
    ) -> HydraulicsResult<Self> {
        let nominal_m = check_positive(nominal_diameter.value, "nominal diameter")?;
        let rho = check_positive(fluid.density.value, "fluid density")?;
        let mu = check_positive(fluid.viscosity.value, "fluid viscosity")?;
        let q = check_positive(spec.flow.value, "volumetric flow")?;
        if spec.roughness.value < 0.0 {
            return Err(HydraulicsError::NonPhysical {
                what: "pipe roughness cannot be negative",
            });
        }

        let mut cost_rate_per_km = spec.cost_curve.rate_per_km(nominal_m);
        if spec.parallel {
            cost_rate_per_km *= 2.0;
        }

        let d = effective_diameter_m(nominal_m, spec.parallel);
        let relative_roughness = spec.roughness.value / d;
        let area = std::f64::consts::PI * d.powi(2) / 4.0;
        let velocity = q / area;
        let reynolds = velocity * d * rho / mu;
        let friction_factor = friction_factor_with(reynolds, relative_roughness, friction)?;

        Ok(Self {
            nominal_diameter,
            diameter: Length::new::<meter>(d),
            parallel: spec.parallel,
            cost_rate_per_km,
            relative_roughness,
            area: Area::new::<square_meter>(area),
            flow: spec.flow,
            velocity: Velocity::new::<meter_per_second>(velocity),
            reynolds,
            friction_factor,
        })
    }

    /// Darcy-Weisbach friction head loss over `step_m` meters of pipe.
    #[inline]
    pub fn head_loss_m(&self, step_m: f64) -> f64 {
        self.friction_factor * (step_m / self.diameter.value) * self.velocity_head_m()
    }

    /// Velocity head v²/2g.
    #[inline]
    pub fn velocity_head_m(&self) -> f64 {
        velocity_head_m(self.velocity.value)
    }
}
