//! Cost aggregation for a traced design.

use pl_hydraulics::{PipeCandidate, Trace};
use serde::Serialize;

/// Unit prices applied to a finished trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// $ per installed pump
    pub pump_unit_cost: f64,
    /// $ per meter of accumulated burial depth
    pub burial_cost_rate: f64,
}

/// Capital cost of one design, $.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub pump_count: usize,
    pub pipe_cost: f64,
    pub burial_cost: f64,
    pub pump_cost: f64,
    pub total_cost: f64,
}

impl CostModel {
    /// Reduce a trace to its cost.
    ///
    /// Burial is charged on the plain sum of per-step depths. With a 1 m
    /// step that sum equals depth × distance in m²; with other steps it does
    /// not, and the rate is applied to the sum unchanged.
    pub fn aggregate(&self, pipe: &PipeCandidate, trace: &Trace, route_km: f64) -> CostBreakdown {
        let pump_count = trace.pump_count();
        let pump_cost = pump_count as f64 * self.pump_unit_cost;
        let pipe_cost = pipe.cost_rate_per_km * route_km;
        let burial_cost = self.burial_cost_rate * trace.total_burial_m();
        CostBreakdown {
            pump_count,
            pipe_cost,
            burial_cost,
            pump_cost,
            total_cost: pipe_cost + pump_cost + burial_cost,
        }
    }
}
