//! Project schema definitions.
//!
//! Every section falls back to the documented reference configuration, so a
//! project file only needs the values it changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineProject {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub fluid: FluidDef,
    #[serde(default)]
    pub pipe: PipeDef,
    #[serde(default)]
    pub route: RouteDef,
    #[serde(default)]
    pub pumping: PumpingDef,
    #[serde(default)]
    pub economics: EconomicsDef,
    #[serde(default)]
    pub friction: FrictionDef,
    #[serde(default)]
    pub sweep: SweepDef,
    #[serde(default)]
    pub chart: ChartDef,
}

impl Default for PipelineProject {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: "304 km water line".to_string(),
            fluid: FluidDef::default(),
            pipe: PipeDef::default(),
            route: RouteDef::default(),
            pumping: PumpingDef::default(),
            economics: EconomicsDef::default(),
            friction: FrictionDef::default(),
            sweep: SweepDef::default(),
            chart: ChartDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FluidDef {
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
}

impl Default for FluidDef {
    fn default() -> Self {
        Self {
            density_kg_m3: 1000.0,
            viscosity_pa_s: 0.001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipeDef {
    pub roughness_mm: f64,
    pub flow_m3_s: f64,
    /// Cost curve slope, $/km per meter of nominal diameter
    pub cost_slope_per_m: f64,
    /// Cost curve intercept, $/km
    pub cost_intercept_per_km: f64,
    /// Lay two equal pipes side by side
    pub parallel: bool,
}

impl Default for PipeDef {
    fn default() -> Self {
        Self {
            roughness_mm: 0.2,
            flow_m3_s: 1.0,
            cost_slope_per_m: 502_857.0,
            cost_intercept_per_km: -321_619.0,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteDef {
    pub length_km: f64,
    pub curve_a: f64,
    pub curve_b: f64,
    pub curve_c: f64,
    pub elevation_scale_km: f64,
    pub start_elevation_km: f64,
    pub end_elevation_km: f64,
    /// Trace step length
    pub step_m: f64,
}

impl Default for RouteDef {
    fn default() -> Self {
        Self {
            length_km: 304.0,
            curve_a: 1.5,
            curve_b: 6.0,
            curve_c: -5.0,
            elevation_scale_km: 0.2,
            start_elevation_km: 0.3,
            end_elevation_km: 0.5,
            step_m: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PumpingDef {
    pub pump_head_m: f64,
    pub inlet_head_m: f64,
    pub min_absolute_pressure_kpa: f64,
    pub max_pressure_head_m: f64,
    pub atmospheric_pressure_kpa: f64,
}

impl Default for PumpingDef {
    fn default() -> Self {
        Self {
            pump_head_m: 100.0,
            inlet_head_m: 100.0,
            min_absolute_pressure_kpa: 30.0,
            max_pressure_head_m: 200.0,
            atmospheric_pressure_kpa: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomicsDef {
    pub pump_unit_cost: f64,
    /// $ per meter of accumulated burial depth
    pub burial_cost_rate: f64,
}

impl Default for EconomicsDef {
    fn default() -> Self {
        Self {
            pump_unit_cost: 15_000_000.0,
            burial_cost_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrictionDef {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub laminar_limit_re: f64,
}

impl Default for FrictionDef {
    fn default() -> Self {
        Self {
            initial_guess: 0.08,
            tolerance: 1e-6,
            max_iterations: 200,
            laminar_limit_re: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeDef {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepDef {
    /// Nominal diameters (m), end excluded
    pub diameter_m: RangeDef,
    /// Burial fractions, end included
    pub burial_fraction: RangeDef,
}

impl Default for SweepDef {
    fn default() -> Self {
        Self {
            diameter_m: RangeDef {
                start: 0.76026,
                end: 1.2,
                step: 1e-6,
            },
            burial_fraction: RangeDef {
                start: 0.0,
                end: 1e-6,
                step: 1e-8,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartDef {
    pub output_path: String,
    pub width: u32,
    pub height: u32,
    pub include_hgl: bool,
    pub x_grid_step_m: f64,
}

impl Default for ChartDef {
    fn default() -> Self {
        Self {
            output_path: "output/Y_X.png".to_string(),
            width: 800,
            height: 600,
            include_hgl: false,
            x_grid_step_m: 10_000.0,
        }
    }
}
