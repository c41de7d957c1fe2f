//! Conversion from the project file to the solver's typed inputs.

use crate::schema::PipelineProject;
use pl_core::units::{kg_per_m3, km, m3ps, mm, pa_s};
use pl_design::{CostModel, DesignProblem, SweepGrid, SweepRange};
use pl_hydraulics::{ColebrookConfig, CostCurve, Fluid, PipeSpec, PumpPolicy, RouteProfile};

impl PipelineProject {
    /// Fixed inputs for every grid point.
    pub fn problem(&self) -> DesignProblem {
        DesignProblem {
            fluid: Fluid {
                density: kg_per_m3(self.fluid.density_kg_m3),
                viscosity: pa_s(self.fluid.viscosity_pa_s),
            },
            pipe: PipeSpec {
                roughness: mm(self.pipe.roughness_mm),
                flow: m3ps(self.pipe.flow_m3_s),
                cost_curve: CostCurve {
                    slope_per_m: self.pipe.cost_slope_per_m,
                    intercept_per_km: self.pipe.cost_intercept_per_km,
                },
                parallel: self.pipe.parallel,
            },
            route: RouteProfile {
                length: km(self.route.length_km),
                curve_a: self.route.curve_a,
                curve_b: self.route.curve_b,
                curve_c: self.route.curve_c,
                elevation_scale: km(self.route.elevation_scale_km),
                start_elevation: km(self.route.start_elevation_km),
                end_elevation: km(self.route.end_elevation_km),
            },
            pumps: PumpPolicy {
                pump_head_m: self.pumping.pump_head_m,
                inlet_head_m: self.pumping.inlet_head_m,
                min_absolute_pressure_kpa: self.pumping.min_absolute_pressure_kpa,
                max_pressure_head_m: self.pumping.max_pressure_head_m,
                atmospheric_pressure_kpa: self.pumping.atmospheric_pressure_kpa,
            },
            costs: CostModel {
                pump_unit_cost: self.economics.pump_unit_cost,
                burial_cost_rate: self.economics.burial_cost_rate,
            },
            friction: ColebrookConfig {
                initial_guess: self.friction.initial_guess,
                tolerance: self.friction.tolerance,
                max_iterations: self.friction.max_iterations,
                laminar_limit: self.friction.laminar_limit_re,
            },
            step_m: self.route.step_m,
        }
    }

    /// Diameter grid (end excluded) and burial grid (end included).
    pub fn grid(&self) -> SweepGrid {
        let d = self.sweep.diameter_m;
        let b = self.sweep.burial_fraction;
        SweepGrid {
            diameters: SweepRange::half_open(d.start, d.end, d.step),
            burial_fractions: SweepRange::closed(b.start, b.end, b.step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_problem_matches_reference_constants() {
        let problem = PipelineProject::default().problem();
        assert_eq!(problem.route.length_km(), 304.0);
        assert_eq!(problem.route.natural_elevation_m(0.0), 300.0);
        assert_eq!(problem.pumps.pump_head_m, 100.0);
        assert_eq!(problem.costs.pump_unit_cost, 15_000_000.0);
        assert_eq!(problem.friction, ColebrookConfig::default());
        assert!(problem.pipe.parallel);
        assert!((problem.pipe.roughness.value - 0.0002).abs() < 1e-15);
    }

    #[test]
    fn default_grid_sizes() {
        let grid = PipelineProject::default().grid();
        assert_eq!(grid.diameters.len(), 439_740);
        assert_eq!(grid.burial_fractions.len(), 101);
        assert!(!grid.diameters.include_end);
        assert!(grid.burial_fractions.include_end);
    }
}
