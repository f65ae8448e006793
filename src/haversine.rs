//! Great-circle geometry and the straight-line distance matrix provider.
//!
//! Used directly when road routing is off. Ignores roads entirely but needs
//! no network access.

use crate::error::PlannerResult;
use crate::matrix::DistanceMatrix;
use crate::traits::{Coordinate, DistanceMatrixProvider, TravelMode};

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Split the segment `from → to` into roughly `spacing_km` pieces.
///
/// Intermediate points are linear in lat/lng, which is close enough at the
/// spacings used for segment routing. At most `max_points` intermediates are
/// produced; a non-positive spacing yields just the endpoints.
pub fn interpolate_segment(
    from: Coordinate,
    to: Coordinate,
    spacing_km: f64,
    max_points: usize,
) -> Vec<Coordinate> {
    if spacing_km.is_nan() || spacing_km <= 0.0 {
        return vec![from, to];
    }

    let raw_count = (haversine_km(from, to) / spacing_km).floor() - 1.0;
    let count = if raw_count > 0.0 {
        (raw_count as usize).min(max_points)
    } else {
        0
    };

    let mut points = Vec::with_capacity(count + 2);
    points.push(from);
    for i in 1..=count {
        let t = i as f64 / (count + 1) as f64;
        points.push(Coordinate::new(
            from.lat + (to.lat - from.lat) * t,
            from.lng + (to.lng - from.lng) * t,
        ));
    }
    points.push(to);
    points
}

/// Haversine-based distance matrix provider.
///
/// Symmetric, with a zero diagonal. Every pair is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, points: &[Coordinate], _mode: TravelMode) -> PlannerResult<DistanceMatrix> {
        let n = points.len();
        let mut matrix = DistanceMatrix::new(n);

        for i in 0..n {
            for j in i + 1..n {
                let km = haversine_km(points[i], points[j]);
                matrix.set(i, j, km);
                matrix.set(j, i, km);
            }
        }

        Ok(matrix)
    }
}
