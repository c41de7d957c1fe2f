//! Integration tests for the trace engine on the full 304 km route.

use pl_core::units::{kg_per_m3, km, m, m3ps, mm, pa_s};
use pl_hydraulics::{
    ColebrookConfig, CostCurve, Fluid, PipeCandidate, PipeSpec, PumpPolicy, RouteProfile,
    TraceEngine,
};
use proptest::prelude::*;

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

fn twin_pipe(nominal_m: f64) -> PipeCandidate {
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
fn full_route_keeps_pressure_above_floor() {
    let r = route(304.0);
    let p = pumps();
    let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
    let trace = engine.run(&twin_pipe(0.76026), 0.0);

    assert_eq!(trace.len(), 304_000);
    assert!(
        trace.min_pressure_kpa() >= p.min_absolute_pressure_kpa,
        "min pressure {} kPa",
        trace.min_pressure_kpa()
    );

    // Friction (~360 m) plus the climb to the crest needs a handful of boosters
    let pumps_used = trace.pump_count();
    assert!(pumps_used > 1 && pumps_used < 20, "pumps = {pumps_used}");
    assert_eq!(trace.pump_positions_m()[0], 0.0);
    assert_eq!(trace.pump_positions_m().len(), pumps_used);
}

#[test]
fn every_sample_follows_from_its_predecessor() {
    let r = route(20.0);
    let p = pumps();
    let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
    let pipe = twin_pipe(0.9);
    let trace = engine.run(&pipe, 0.4);

    for pair in trace.samples().windows(2) {
        let replay = engine.advance(&pipe, &pair[0], pair[1].distance_m, 0.4, pair[1].pump);
        assert_eq!(replay, pair[1]);
    }
}

#[test]
fn grade_lines_are_consistent() {
    let r = route(20.0);
    let p = pumps();
    let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
    let pipe = twin_pipe(0.9);
    let trace = engine.run(&pipe, 0.0);
    let vh = pipe.velocity_head_m();

    for s in trace.samples() {
        assert_eq!(s.hgl_m, s.pressure_head_m + s.elevation_m);
        assert!((s.egl_m - (s.hgl_m + vh)).abs() < 1e-9);
    }
}

#[test]
fn inserted_pump_is_never_removed() {
    let r = route(304.0);
    let p = pumps();
    let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
    let pipe = twin_pipe(0.76026);
    let trace = engine.run(&pipe, 0.0);

    for pair in trace.samples().windows(2) {
        let trial = engine.advance(&pipe, &pair[0], pair[1].distance_m, 0.0, false);
        if trial.pressure_kpa < p.min_absolute_pressure_kpa {
            assert!(pair[1].pump, "pump dropped at {} m", pair[1].distance_m);
            assert_eq!(pair[1].pump_head_m, p.pump_head_m);
        } else {
            assert!(!pair[1].pump);
        }
    }
}

#[test]
fn larger_pipe_needs_no_more_pumps() {
    let r = route(304.0);
    let p = pumps();
    let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
    let small = engine.run(&twin_pipe(0.76026), 0.0).pump_count();
    let large = engine.run(&twin_pipe(1.1), 0.0).pump_count();
    assert!(large <= small, "small = {small}, large = {large}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn total_burial_is_monotonic_in_fraction(a in 0.0_f64..1.0, b in 0.0_f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let r = route(30.0);
        let p = pumps();
        let engine = TraceEngine::new(&r, &p, 1000.0, 1.0).unwrap();
        let pipe = twin_pipe(0.9);
        let low = engine.run(&pipe, lo).total_burial_m();
        let high = engine.run(&pipe, hi).total_burial_m();
        prop_assert!(low <= high, "burial({lo}) = {low} > burial({hi}) = {high}");
    }
}
