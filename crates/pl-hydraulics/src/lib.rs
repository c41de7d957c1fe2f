//! pl-hydraulics: steady hydraulics of a single long-distance pipeline.
//!
//! Provides:
//! - Darcy friction factor (laminar closed form, Colebrook-White iteration)
//! - Pipe candidates derived from a nominal diameter (single or twin line)
//! - The route elevation profile
//! - The trace engine that marches along the route and places booster pumps
//!
//! # Example
//!
//! ```no_run
//! use pl_core::units::{kg_per_m3, km, m, m3ps, mm, pa_s};
//! use pl_hydraulics::{
//!     ColebrookConfig, CostCurve, Fluid, PipeCandidate, PipeSpec, PumpPolicy, RouteProfile,
//!     TraceEngine,
//! };
//!
//! let spec = PipeSpec {
//!     roughness: mm(0.2),
//!     flow: m3ps(1.0),
//!     cost_curve: CostCurve { slope_per_m: 502_857.0, intercept_per_km: -321_619.0 },
//!     parallel: true,
//! };
//! let fluid = Fluid { density: kg_per_m3(1000.0), viscosity: pa_s(0.001) };
//! let pipe = PipeCandidate::new(&spec, &fluid, m(0.8), &ColebrookConfig::default()).unwrap();
//!
//! let route = RouteProfile {
//!     length: km(304.0),
//!     curve_a: 1.5,
//!     curve_b: 6.0,
//!     curve_c: -5.0,
//!     elevation_scale: km(0.2),
//!     start_elevation: km(0.3),
//!     end_elevation: km(0.5),
//! };
//! let pumps = PumpPolicy {
//!     pump_head_m: 100.0,
//!     inlet_head_m: 100.0,
//!     min_absolute_pressure_kpa: 30.0,
//!     max_pressure_head_m: 200.0,
//!     atmospheric_pressure_kpa: 100.0,
//! };
//!
//! let engine = TraceEngine::new(&route, &pumps, 1000.0, 1.0).unwrap();
//! let trace = engine.run(&pipe, 0.0);
//! println!("{} pumps", trace.pump_count());
//! ```

pub mod common;
pub mod error;
pub mod friction;
pub mod pipe;
pub mod route;
pub mod trace;

// Re-exports
pub use error::{HydraulicsError, HydraulicsResult};
pub use friction::{ColebrookConfig, LAMINAR_LIMIT_RE, friction_factor, friction_factor_with};
pub use pipe::{CostCurve, Fluid, PipeCandidate, PipeSpec, effective_diameter_m};
pub use route::RouteProfile;
pub use trace::{PumpPolicy, Trace, TraceEngine, TraceSample};
