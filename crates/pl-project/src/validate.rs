//! Project validation logic.

use crate::schema::{PipelineProject, RangeDef};
use pl_design::grid::MAX_POINTS;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be a positive number"))
    }
}

fn non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be zero or positive"))
    }
}

fn finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn range(field: &str, r: &RangeDef, allow_single: bool) -> Result<(), ValidationError> {
    finite(&format!("{field}.start"), r.start)?;
    finite(&format!("{field}.end"), r.end)?;
    positive(&format!("{field}.step"), r.step)?;
    let ok = if allow_single {
        r.end >= r.start
    } else {
        r.end > r.start
    };
    if !ok {
        return Err(invalid(
            &format!("{field}.end"),
            r.end,
            "must lie above the start of the range",
        ));
    }
    let steps = (r.end - r.start) / r.step;
    if !(steps < MAX_POINTS as f64) || r.start + r.step == r.start {
        return Err(invalid(
            &format!("{field}.step"),
            r.step,
            "gives too many grid points",
        ));
    }
    Ok(())
}

pub fn validate_project(project: &PipelineProject) -> Result<(), ValidationError> {
    if project.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let fluid = &project.fluid;
    positive("fluid.density_kg_m3", fluid.density_kg_m3)?;
    positive("fluid.viscosity_pa_s", fluid.viscosity_pa_s)?;

    let pipe = &project.pipe;
    non_negative("pipe.roughness_mm", pipe.roughness_mm)?;
    positive("pipe.flow_m3_s", pipe.flow_m3_s)?;
    finite("pipe.cost_slope_per_m", pipe.cost_slope_per_m)?;
    finite("pipe.cost_intercept_per_km", pipe.cost_intercept_per_km)?;

    let route = &project.route;
    positive("route.length_km", route.length_km)?;
    positive("route.step_m", route.step_m)?;
    if route.step_m > route.length_km * 1000.0 {
        return Err(invalid(
            "route.step_m",
            route.step_m,
            "must not exceed the route length",
        ));
    }
    for (field, v) in [
        ("route.curve_a", route.curve_a),
        ("route.curve_b", route.curve_b),
        ("route.curve_c", route.curve_c),
        ("route.elevation_scale_km", route.elevation_scale_km),
        ("route.start_elevation_km", route.start_elevation_km),
        ("route.end_elevation_km", route.end_elevation_km),
    ] {
        finite(field, v)?;
    }

    let pumping = &project.pumping;
    positive("pumping.pump_head_m", pumping.pump_head_m)?;
    finite("pumping.inlet_head_m", pumping.inlet_head_m)?;
    finite("pumping.min_absolute_pressure_kpa", pumping.min_absolute_pressure_kpa)?;
    finite("pumping.max_pressure_head_m", pumping.max_pressure_head_m)?;
    non_negative("pumping.atmospheric_pressure_kpa", pumping.atmospheric_pressure_kpa)?;

    let economics = &project.economics;
    non_negative("economics.pump_unit_cost", economics.pump_unit_cost)?;
    non_negative("economics.burial_cost_rate", economics.burial_cost_rate)?;

    let friction = &project.friction;
    positive("friction.initial_guess", friction.initial_guess)?;
    positive("friction.tolerance", friction.tolerance)?;
    positive("friction.laminar_limit_re", friction.laminar_limit_re)?;
    if friction.max_iterations == 0 {
        return Err(invalid(
            "friction.max_iterations",
            friction.max_iterations,
            "must be at least 1",
        ));
    }

    let sweep = &project.sweep;
    range("sweep.diameter_m", &sweep.diameter_m, false)?;
    positive("sweep.diameter_m.start", sweep.diameter_m.start)?;
    let smallest_rate =
        pipe.cost_slope_per_m * sweep.diameter_m.start + pipe.cost_intercept_per_km;
    if smallest_rate <= 0.0 {
        return Err(invalid(
            "sweep.diameter_m.start",
            sweep.diameter_m.start,
            "pipe cost curve is not positive at the smallest diameter",
        ));
    }
    range("sweep.burial_fraction", &sweep.burial_fraction, true)?;
    if sweep.burial_fraction.start < 0.0 || sweep.burial_fraction.end > 1.0 {
        return Err(invalid(
            "sweep.burial_fraction",
            format!("[{}, {}]", sweep.burial_fraction.start, sweep.burial_fraction.end),
            "must lie within [0, 1]",
        ));
    }

    let chart = &project.chart;
    if chart.width < 100 || chart.height < 100 {
        return Err(invalid(
            "chart",
            format!("{}x{}", chart.width, chart.height),
            "chart must be at least 100x100 pixels",
        ));
    }
    positive("chart.x_grid_step_m", chart.x_grid_step_m)?;
    if route.length_km * 1000.0 / chart.x_grid_step_m > chart.width as f64 {
        return Err(invalid(
            "chart.x_grid_step_m",
            chart.x_grid_step_m,
            "gives more grid lines than the chart has pixels",
        ));
    }
    if chart.output_path.trim().is_empty() {
        return Err(invalid("chart.output_path", "\"\"", "must not be empty"));
    }

    Ok(())
}
