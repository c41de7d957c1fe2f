//! Exhaustive grid search for the least-cost design.
//!
//! The outer loop walks the diameter grid and builds one pipe candidate per
//! diameter; the inner loop traces every burial fraction for that candidate.
//! Every grid point is evaluated. Only the cheapest design seen so far is
//! kept, and each time it changes an `Improved` progress event is emitted.

use crate::design::{Design, DesignProblem};
use crate::error::{DesignError, DesignResult};
use crate::grid::SweepGrid;
use tracing::{debug, info};

/// Progress notifications emitted by [`run_sweep`].
#[derive(Debug)]
pub enum SweepProgress<'a> {
    Started {
        diameters: usize,
        burial_fractions: usize,
    },
    /// A new cheapest design was found.
    Improved {
        design: &'a Design,
        evaluated: usize,
        total: usize,
    },
    /// All burial fractions for one diameter have been evaluated.
    DiameterFinished {
        index: usize,
        diameters: usize,
        nominal_diameter_m: f64,
        best_cost: f64,
    },
}

/// Result of a completed sweep.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub best: Design,
    pub evaluated: usize,
    pub improvements: usize,
}

/// True if `candidate` is strictly cheaper than the incumbent.
///
/// Ties keep the incumbent, so the earliest grid point wins. A NaN cost never
/// improves on anything.
pub fn improves_on(best: Option<&Design>, candidate: &Design) -> bool {
    let best_cost = best.map_or(f64::MAX, Design::total_cost);
    candidate.total_cost() < best_cost
}

/// Fold one evaluated design into the running minimum.
pub fn keep_cheaper(best: Option<Design>, candidate: Design) -> Option<Design> {
    if improves_on(best.as_ref(), &candidate) {
        Some(candidate)
    } else {
        best
    }
}

/// Run the full grid search.
///
/// # Errors
/// - `InvalidRange` / `EmptyRange` for a malformed grid.
/// - `Hydraulics(ConvergenceFailed)` as soon as any diameter's friction
///   factor fails to converge; the sweep is abandoned.
/// - `NoFeasibleDesign` if no grid point produced a finite cost.
pub fn run_sweep(
    problem: &DesignProblem,
    grid: &SweepGrid,
    mut progress: Option<&mut dyn FnMut(SweepProgress<'_>)>,
) -> DesignResult<SweepOutcome> {
    grid.check()?;
    let engine = problem.engine()?;

    let diameters = grid.diameters.len();
    let burial_fractions = grid.burial_fractions.len();
    let total = grid.total_points();
    info!(
        diameters,
        burial_fractions,
        total,
        parallel = problem.pipe.parallel,
        "starting design sweep"
    );
    if let Some(cb) = progress.as_deref_mut() {
        cb(SweepProgress::Started {
            diameters,
            burial_fractions,
        });
    }

    let mut best: Option<Design> = None;
    let mut evaluated = 0usize;
    let mut improvements = 0usize;

    for (index, nominal) in grid.diameters.iter().enumerate() {
        let pipe = problem.candidate(nominal)?;

        for burial in grid.burial_fractions.iter() {
            let design = problem.evaluate(&engine, &pipe, burial);
            evaluated += 1;

            if improves_on(best.as_ref(), &design) {
                improvements += 1;
                let design: &Design = best.insert(design);
                debug!(
                    nominal_diameter_m = design.nominal_diameter_m(),
                    burial_fraction = design.burial_fraction,
                    pumps = design.pump_count(),
                    total_cost = design.total_cost(),
                    "new best design"
                );
                if let Some(cb) = progress.as_deref_mut() {
                    cb(SweepProgress::Improved {
                        design,
                        evaluated,
                        total,
                    });
                }
            }
        }

        let best_cost = best.as_ref().map_or(f64::NAN, Design::total_cost);
        debug!(index, nominal_diameter_m = nominal, best_cost, "diameter finished");
        if let Some(cb) = progress.as_deref_mut() {
            cb(SweepProgress::DiameterFinished {
                index,
                diameters,
                nominal_diameter_m: nominal,
                best_cost,
            });
        }
    }

    let best = best.ok_or(DesignError::NoFeasibleDesign)?;
    info!(
        evaluated,
        improvements,
        nominal_diameter_m = best.nominal_diameter_m(),
        burial_fraction = best.burial_fraction,
        pumps = best.pump_count(),
        total_cost = best.total_cost(),
        "design sweep finished"
    );

    Ok(SweepOutcome {
        best,
        evaluated,
        improvements,
    })
}
