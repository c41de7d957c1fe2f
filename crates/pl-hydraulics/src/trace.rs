//! Hydraulic trace engine.
//!
//! Marches along the route in fixed steps and decides at every step whether a
//! booster pump is needed to keep the absolute pressure above its floor.
//!
//! ## Step procedure
//!
//! For each position `d = step, 2·step, …` while `d < L`:
//!
//! 1. Elevation after burial:
//!    `z(d) = z_natural(d) - burial_fraction · (z_natural(d) - z_reference(d))`
//! 2. Friction loss over the step (Darcy-Weisbach with the pipe's fixed `f`, `D`, `v`).
//! 3. Trial without a pump:
//!    `h(d) = h_pump + h(d-1) - (z(d) - z(d-1)) - h_loss`
//! 4. If the resulting absolute pressure is below the floor, a pump is placed
//!    here and the sample is re-evaluated.
//! 5. If there is still no pump but the head exceeds the ceiling, the pump
//!    stays absent and the sample is re-evaluated once more.
//!
//! Each evaluation is a pure function of the previous sample, so the three
//! evaluations above never interfere with one another.

use crate::common::check_positive;
use crate::error::HydraulicsResult;
use crate::pipe::PipeCandidate;
use crate::route::RouteProfile;
use pl_core::constants::G_MPS2;

/// Pump sizing and pressure limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpPolicy {
    /// Head added by one booster pump (m)
    pub pump_head_m: f64,
    /// Head at the inlet, supplied by the first pump (m)
    pub inlet_head_m: f64,
    /// Absolute pressure floor (kPa); going below it forces a pump
    pub min_absolute_pressure_kpa: f64,
    /// Pressure head ceiling (m)
    pub max_pressure_head_m: f64,
    /// Atmospheric pressure (kPa)
    pub atmospheric_pressure_kpa: f64,
}

/// State at one position along the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSample {
    pub distance_m: f64,
    pub pump: bool,
    pub pump_head_m: f64,
    /// Pipe elevation after burial
    pub elevation_m: f64,
    /// Depth below the terrain at this position
    pub bury_depth_m: f64,
    pub pressure_head_m: f64,
    /// Absolute pressure, kPa
    pub pressure_kpa: f64,
    /// Friction loss over the step ending here
    pub head_loss_m: f64,
    pub hgl_m: f64,
    pub egl_m: f64,
}

/// Append-only sequence of samples for one (pipe, burial fraction) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    samples: Vec<TraceSample>,
    total_burial_m: f64,
}

impl Trace {
    fn start(initial: TraceSample, capacity: usize) -> Self {
        let mut samples = Vec::with_capacity(capacity);
        samples.push(initial);
        Self {
            samples,
            total_burial_m: 0.0,
        }
    }

    fn push(&mut self, sample: TraceSample) {
        self.total_burial_m += sample.bury_depth_m;
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&TraceSample> {
        self.samples.last()
    }

    /// Sum of the burial depths of every step (m).
    pub fn total_burial_m(&self) -> f64 {
        self.total_burial_m
    }

    /// Number of samples carrying a pump, the inlet pump included.
    pub fn pump_count(&self) -> usize {
        self.samples.iter().filter(|s| s.pump).count()
    }

    pub fn pump_positions_m(&self) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|s| s.pump)
            .map(|s| s.distance_m)
            .collect()
    }

    pub fn distances_m(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.distance_m).collect()
    }

    pub fn egl_m(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.egl_m).collect()
    }

    pub fn hgl_m(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.hgl_m).collect()
    }

    pub fn min_pressure_kpa(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.pressure_kpa)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_pressure_head_m(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.pressure_head_m)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Marches a pipe candidate along a route.
#[derive(Debug, Clone, Copy)]
pub struct TraceEngine<'a> {
    route: &'a RouteProfile,
    pumps: &'a PumpPolicy,
    density_kg_m3: f64,
    step_m: f64,
}

impl<'a> TraceEngine<'a> {
    /// # Errors
    /// `NonPhysical` if the step, route length or density is not positive.
    pub fn new(
        route: &'a RouteProfile,
        pumps: &'a PumpPolicy,
        density_kg_m3: f64,
        step_m: f64,
    ) -> HydraulicsResult<Self> {
        route.check()?;
        check_positive(step_m, "trace step")?;
        check_positive(density_kg_m3, "fluid density")?;
        Ok(Self {
            route,
            pumps,
            density_kg_m3,
            step_m,
        })
    }

    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    /// Absolute pressure (kPa) for a pressure head (m).
    #[inline]
    pub fn absolute_pressure_kpa(&self, pressure_head_m: f64) -> f64 {
        self.pumps.atmospheric_pressure_kpa + self.density_kg_m3 * G_MPS2 * pressure_head_m / 1000.0
    }

    /// Inlet sample: a pump at d = 0 supplying the inlet head, no burial.
    pub fn initial_sample(&self, pipe: &PipeCandidate) -> TraceSample {
        let head = self.pumps.inlet_head_m;
        let elevation = self.route.natural_elevation_m(0.0);
        let hgl = head + elevation;
        TraceSample {
            distance_m: 0.0,
            pump: true,
            pump_head_m: head,
            elevation_m: elevation,
            bury_depth_m: 0.0,
            pressure_head_m: head,
            pressure_kpa: self.absolute_pressure_kpa(head),
            head_loss_m: 0.0,
            hgl_m: hgl,
            egl_m: hgl + pipe.velocity_head_m(),
        }
    }

    /// Evaluate the sample at `distance_m` from `prev` with a fixed pump decision.
    pub fn advance(
        &self,
        pipe: &PipeCandidate,
        prev: &TraceSample,
        distance_m: f64,
        burial_fraction: f64,
        pump: bool,
    ) -> TraceSample {
        let pump_head = if pump { self.pumps.pump_head_m } else { 0.0 };

        let bury_depth = self.route.deviation_m(distance_m) * burial_fraction;
        let elevation = self.route.natural_elevation_m(distance_m) - bury_depth;

        let head_loss = pipe.head_loss_m(self.step_m);
        let pressure_head =
            pump_head + prev.pressure_head_m - (elevation - prev.elevation_m) - head_loss;
        let hgl = pressure_head + elevation;

        TraceSample {
            distance_m,
            pump,
            pump_head_m: pump_head,
            elevation_m: elevation,
            bury_depth_m: bury_depth,
            pressure_head_m: pressure_head,
            pressure_kpa: self.absolute_pressure_kpa(pressure_head),
            head_loss_m: head_loss,
            hgl_m: hgl,
            egl_m: hgl + pipe.velocity_head_m(),
        }
    }

    /// Full pump decision for one step: trial, insertion, removal check.
    pub fn step(
        &self,
        pipe: &PipeCandidate,
        prev: &TraceSample,
        distance_m: f64,
        burial_fraction: f64,
    ) -> TraceSample {
        let trial = self.advance(pipe, prev, distance_m, burial_fraction, false);

        let mut pump = trial.pump;
        if trial.pressure_kpa < self.pumps.min_absolute_pressure_kpa {
            pump = true;
        }
        let placed = self.advance(pipe, prev, distance_m, burial_fraction, pump);

        if !placed.pump && placed.pressure_head_m > self.pumps.max_pressure_head_m {
            // over-pressure with no pump here; nothing to take out
            pump = false;
        }
        self.advance(pipe, prev, distance_m, burial_fraction, pump)
    }

    /// Trace the whole route. The trailing partial step is dropped.
    pub fn run(&self, pipe: &PipeCandidate, burial_fraction: f64) -> Trace {
        let length = self.route.length_m();
        let capacity = (length / self.step_m).ceil() as usize;
        let mut trace = Trace::start(self.initial_sample(pipe), capacity);

        let mut prev = trace.samples[0];
        let mut index: u64 = 1;
        loop {
            let distance = index as f64 * self.step_m;
            if distance >= length {
                break;
            }
            let sample = self.step(pipe, &prev, distance, burial_fraction);
            trace.push(sample);
            prev = sample;
            index += 1;
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friction::ColebrookConfig;
    use crate::pipe::{CostCurve, Fluid, PipeSpec};
    use pl_core::units::{kg_per_m3, km, m, m3ps, mm, pa_s};

    fn route(length_km: f64) -> RouteProfile {
        RouteProfile {
            length: km(length_km),
            curve_a: 1.5,
            curve_b: 6.0,
            curve_c: -5.0,
            elevation_scale: km(0.2),
            start_elevation: km(0.3),
            end_elevation: km(0.5),
        }
    }

    fn pumps() -> PumpPolicy {
        PumpPolicy {
            pump_head_m: 100.0,
            inlet_head_m: 100.0,
            min_absolute_pressure_kpa: 30.0,
            max_pressure_head_m: 200.0,
            atmospheric_pressure_kpa: 100.0,
        }
    }

    fn pipe(nominal_m: f64) -> PipeCandidate {
        let spec = PipeSpec {
            roughness: mm(0.2),
            flow: m3ps(1.0),
            cost_curve: CostCurve {
                slope_per_m: 502_857.0,
                intercept_per_km: -321_619.0,
            },
            parallel: true,
        };
        let fluid = Fluid {
            density: kg_per_m3(1000.0),
            viscosity: pa_s(0.001),
        };
        PipeCandidate::new(&spec, &fluid, m(nominal_m), &ColebrookConfig::default()).unwrap()
    }

    #[test]
    fn initial_sample_has_inlet_pump() {
        let r = route(10.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let s = engine.initial_sample(&pipe(0.8));
        assert!(s.pump);
        assert_eq!(s.pressure_head_m, 100.0);
        assert_eq!(s.elevation_m, 300.0);
        assert!((s.pressure_kpa - (100.0 + 981.0)).abs() < 1e-9);
        assert_eq!(s.hgl_m, 400.0);
    }

    #[test]
    fn advance_is_deterministic() {
        let r = route(10.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let pipe = pipe(0.8);
        let prev = engine.initial_sample(&pipe);
        let a = engine.advance(&pipe, &prev, 1.0, 0.3, false);
        let b = engine.advance(&pipe, &prev, 1.0, 0.3, false);
        assert_eq!(a, b);
    }

    #[test]
    fn low_pressure_inserts_pump() {
        let r = route(10.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let pipe = pipe(0.8);
        let mut prev = engine.initial_sample(&pipe);
        // -7.2 m of head is just under the 30 kPa floor
        prev.pressure_head_m = -7.2;
        let next = engine.step(&pipe, &prev, 1.0, 0.0);
        assert!(next.pump);
        assert_eq!(next.pump_head_m, 100.0);
        assert!(next.pressure_kpa >= p.min_absolute_pressure_kpa);
    }

    #[test]
    fn high_pressure_without_pump_stays_unpumped() {
        let r = route(10.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let pipe = pipe(0.8);
        let mut prev = engine.initial_sample(&pipe);
        prev.pressure_head_m = 500.0;
        let trial = engine.advance(&pipe, &prev, 1.0, 0.0, false);
        let next = engine.step(&pipe, &prev, 1.0, 0.0);
        assert!(!next.pump);
        assert!(next.pressure_head_m > p.max_pressure_head_m);
        assert_eq!(next, trial);
    }

    #[test]
    fn run_drops_partial_final_step() {
        let r = route(1.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 3.0).unwrap();
        let trace = engine.run(&pipe(0.8), 0.0);
        // 0, 3, …, 999
        assert_eq!(trace.len(), 334);
        assert_eq!(trace.last().unwrap().distance_m, 999.0);
    }

    #[test]
    fn unit_step_covers_every_meter() {
        let r = route(2.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let trace = engine.run(&pipe(0.8), 0.0);
        assert_eq!(trace.len(), 2000);
        assert_eq!(trace.samples()[1].distance_m, 1.0);
        assert_eq!(trace.last().unwrap().distance_m, 1999.0);
    }

    #[test]
    fn zero_burial_accumulates_nothing() {
        let r = route(5.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let trace = engine.run(&pipe(0.8), 0.0);
        assert_eq!(trace.total_burial_m(), 0.0);
        for s in trace.samples() {
            assert_eq!(s.elevation_m, r.natural_elevation_m(s.distance_m));
        }
    }

    #[test]
    fn rejects_non_positive_step() {
        let r = route(5.0);
        let p = pumps();
        assert!(TraceEngine::new(&r, &p, 1000.0, 0.0).is_err());
    }
}
