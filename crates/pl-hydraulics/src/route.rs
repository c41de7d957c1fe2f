//! Route elevation profile.

use crate::common::check_positive;
use crate::error::HydraulicsResult;
use pl_core::units::Length;

/// Fixed route between two endpoints.
///
/// The unburied terrain follows a quadratic in the route fraction `x = d/L`:
///
/// ```text
/// z_natural(d) = (a + b·x + c·x²) · scale
/// ```
///
/// The reference path is the straight line joining the two endpoint
/// elevations. Burial moves the pipe from the terrain toward that line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProfile {
    pub length: Length,
    pub curve_a: f64,
    pub curve_b: f64,
    pub curve_c: f64,
    pub elevation_scale: Length,
    pub start_elevation: Length,
    pub end_elevation: Length,
}

impl RouteProfile {
    /// Validate the route geometry.
    pub fn check(&self) -> HydraulicsResult<()> {
        check_positive(self.length.value, "route length")?;
        Ok(())
    }

    #[inline]
    pub fn length_m(&self) -> f64 {
        self.length.value
    }

    #[inline]
    pub fn length_km(&self) -> f64 {
        self.length.value / 1000.0
    }

    #[inline]
    fn fraction(&self, distance_m: f64) -> f64 {
        distance_m / self.length.value
    }

    /// Terrain elevation (m) at `distance_m` along the route.
    #[inline]
    pub fn natural_elevation_m(&self, distance_m: f64) -> f64 {
        let x = self.fraction(distance_m);
        (self.curve_a + self.curve_b * x + self.curve_c * x * x) * self.elevation_scale.value
    }

    /// Straight-line elevation (m) between the endpoints at `distance_m`.
    ///
    /// Exact at both ends of the route.
    #[inline]
    pub fn reference_elevation_m(&self, distance_m: f64) -> f64 {
        let x = self.fraction(distance_m);
        self.start_elevation.value * (1.0 - x) + self.end_elevation.value * x
    }

    /// Terrain height above the reference line.
    #[inline]
    pub fn deviation_m(&self, distance_m: f64) -> f64 {
        self.natural_elevation_m(distance_m) - self.reference_elevation_m(distance_m)
    }
}
