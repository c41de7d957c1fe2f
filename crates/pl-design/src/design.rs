//! Design problem and single-point evaluation.

use crate::cost::{CostBreakdown, CostModel};
use crate::error::DesignResult;
use pl_core::units::m;
use pl_hydraulics::common::check_fraction;
use pl_hydraulics::{
    ColebrookConfig, Fluid, PipeCandidate, PipeSpec, PumpPolicy, RouteProfile, Trace,
    TraceEngine,
};
use serde::Serialize;

/// Everything held fixed while diameter and burial fraction vary.
#[derive(Debug, Clone)]
pub struct DesignProblem {
    pub fluid: Fluid,
    pub pipe: PipeSpec,
    pub route: RouteProfile,
    pub pumps: PumpPolicy,
    pub costs: CostModel,
    pub friction: ColebrookConfig,
    /// Trace step length (m)
    pub step_m: f64,
}

/// One evaluated (diameter, burial fraction) point.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub burial_fraction: f64,
    pub pipe: PipeCandidate,
    pub costs: CostBreakdown,
    pub trace: Trace,
}

/// Flat, serializable view of a design without its trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSummary {
    pub nominal_diameter_m: f64,
    pub effective_diameter_m: f64,
    pub parallel: bool,
    pub burial_fraction: f64,
    pub total_burial_m: f64,
    pub pump_positions_m: Vec<f64>,
    #[serde(flatten)]
    pub costs: CostBreakdown,
}

impl Design {
    pub fn nominal_diameter_m(&self) -> f64 {
        self.pipe.nominal_diameter.value
    }

    pub fn effective_diameter_m(&self) -> f64 {
        self.pipe.diameter.value
    }

    pub fn pump_count(&self) -> usize {
        self.costs.pump_count
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.total_cost
    }

    pub fn summary(&self) -> DesignSummary {
        DesignSummary {
            nominal_diameter_m: self.nominal_diameter_m(),
            effective_diameter_m: self.effective_diameter_m(),
            parallel: self.pipe.parallel,
            burial_fraction: self.burial_fraction,
            total_burial_m: self.trace.total_burial_m(),
            pump_positions_m: self.trace.pump_positions_m(),
            costs: self.costs,
        }
    }
}

impl DesignProblem {
    /// Trace engine bound to this problem's route and pump policy.
    pub fn engine(&self) -> DesignResult<TraceEngine<'_>> {
        Ok(TraceEngine::new(
            &self.route,
            &self.pumps,
            self.fluid.density.value,
            self.step_m,
        )?)
    }

    /// Pipe candidate for a nominal diameter (m).
    ///
    /// A friction-factor convergence failure is returned as an error and must
    /// abort the caller.
    pub fn candidate(&self, nominal_diameter_m: f64) -> DesignResult<PipeCandidate> {
        Ok(PipeCandidate::new(
            &self.pipe,
            &self.fluid,
            m(nominal_diameter_m),
            &self.friction,
        )?)
    }

    /// Trace and price one burial fraction for an already built candidate.
    pub fn evaluate(
        &self,
        engine: &TraceEngine<'_>,
        pipe: &PipeCandidate,
        burial_fraction: f64,
    ) -> Design {
        let trace = engine.run(pipe, burial_fraction);
        let costs = self.costs.aggregate(pipe, &trace, self.route.length_km());
        Design {
            burial_fraction,
            pipe: pipe.clone(),
            costs,
            trace,
        }
    }

    /// Build the candidate and evaluate a single grid point.
    pub fn evaluate_point(
        &self,
        nominal_diameter_m: f64,
        burial_fraction: f64,
    ) -> DesignResult<Design> {
        check_fraction(burial_fraction, "burial fraction")?;
        let engine = self.engine()?;
        let pipe = self.candidate(nominal_diameter_m)?;
        Ok(self.evaluate(&engine, &pipe, burial_fraction))
    }
}
