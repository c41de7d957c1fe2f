//! pl-design: cost model and least-cost search for the pipeline.
//!
//! A [`DesignProblem`] fixes the fluid, route, pump policy and prices. Each
//! (diameter, burial fraction) pair is evaluated independently into a
//! [`Design`]; [`run_sweep`] walks a [`SweepGrid`] and keeps the cheapest one.

pub mod cost;
pub mod design;
pub mod error;
pub mod grid;
pub mod sweep;

pub use cost::{CostBreakdown, CostModel};
pub use design::{Design, DesignProblem, DesignSummary};
pub use error::{DesignError, DesignResult};
pub use grid::{SweepGrid, SweepRange};
pub use sweep::{SweepOutcome, SweepProgress, improves_on, keep_cheaper, run_sweep};
