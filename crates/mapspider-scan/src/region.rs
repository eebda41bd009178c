//! Units of recursive search work.

use mapspider_core::Coordinate;

use crate::geo;

/// One unit of recursive search work: a center to probe, the circular radius
/// queried against the endpoint, and the square half-extent used for
/// subdivision bookkeeping.
///
/// For a root region radius and half-extent are equal. After a split each
/// child covers a square of half the parent's half-extent, and its query
/// radius is the half-diagonal of that square (`half_extent * sqrt(2)`) so
/// the four child circles jointly cover the parent square. The resulting
/// overlap at the seams is intentional; duplicates are collapsed downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRegion {
    pub center: Coordinate,
    pub radius_meters: f64,
    pub half_extent_meters: f64,
}

impl SearchRegion {
    /// A root region as supplied by the caller: the input radius doubles as
    /// the half-extent since no split has happened yet.
    #[must_use]
    pub fn root(center: Coordinate, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
            half_extent_meters: radius_meters,
        }
    }

    /// Splits this region into its four quadrant children.
    #[must_use]
    pub fn split(&self) -> [Self; 4] {
        let offset = self.half_extent_meters / 2.0;
        let child_radius = offset * std::f64::consts::SQRT_2;
        geo::sub_coordinates(self.center, offset).map(|center| Self {
            center,
            radius_meters: child_radius,
            half_extent_meters: offset,
        })
    }

    /// Area of this region's bounding square, the unit credited to progress
    /// accounting when the region is accepted.
    #[must_use]
    pub fn bounding_square_area(&self) -> f64 {
        4.0 * self.half_extent_meters * self.half_extent_meters
    }
}
