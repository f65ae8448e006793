//! Core domain types and the distance/route provider contracts.
//!
//! The planner never talks to a mapping vendor directly; it only sees these
//! traits. [`crate::osrm::OsrmClient`] is the bundled implementation and
//! [`crate::haversine::HaversineMatrix`] covers the straight-line case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::matrix::DistanceMatrix;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// How the traveller moves between points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    #[serde(alias = "bicycling")]
    Cycling,
}

impl TravelMode {
    /// OSRM profile name for this mode.
    pub fn osrm_profile(self) -> &'static str {
        match self {
            TravelMode::Driving => "car",
            TravelMode::Walking => "foot",
            TravelMode::Cycling => "bike",
        }
    }
}

impl FromStr for TravelMode {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "cycling" | "bicycling" => Ok(TravelMode::Cycling),
            other => Err(PlannerError::InvalidRequest(format!(
                "unknown travel mode: {other}"
            ))),
        }
    }
}

/// Road category a provider can be asked to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClass {
    Tolls,
    Highways,
    Ferries,
}

impl RoadClass {
    /// Avoidance variants tried, in order, when diversifying direct trips.
    pub const ALL: [RoadClass; 3] = [RoadClass::Tolls, RoadClass::Highways, RoadClass::Ferries];

    /// OSRM `exclude` class name.
    pub fn osrm_class(self) -> &'static str {
        match self {
            RoadClass::Tolls => "toll",
            RoadClass::Highways => "motorway",
            RoadClass::Ferries => "ferry",
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoadClass::Tolls => "tolls",
            RoadClass::Highways => "highways",
            RoadClass::Ferries => "ferries",
        };
        f.write_str(label)
    }
}

/// One complete route as returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub geometry: Vec<Coordinate>,
    pub distance_km: f64,
    pub duration_secs: f64,
    pub summary: String,
}

/// Provides a pairwise distance matrix (kilometres) for a set of points.
///
/// The matrix is indexed by the provided point order. Unreachable pairs are
/// reported as [`crate::matrix::UNREACHABLE`], never as an error.
pub trait DistanceMatrixProvider: Sync {
    fn matrix_for(&self, points: &[Coordinate], mode: TravelMode) -> PlannerResult<DistanceMatrix>;
}

/// A provider that also knows the road network geometry.
pub trait RouteProvider: DistanceMatrixProvider {
    /// Road-following geometry through `waypoints` in order.
    ///
    /// Implementations degrade to coarser geometry, and finally to the
    /// waypoints themselves, rather than failing when detail is missing.
    fn route_geometry(&self, waypoints: &[Coordinate], mode: TravelMode) -> PlannerResult<Vec<Coordinate>>;

    /// Candidate routes between two points.
    ///
    /// With `avoid` unset the provider returns its native alternatives. With
    /// a road class set it returns its best route avoiding that class.
    fn route_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        avoid: Option<RoadClass>,
    ) -> PlannerResult<Vec<ProviderRoute>>;
}

impl<T: DistanceMatrixProvider + ?Sized> DistanceMatrixProvider for &T {
    fn matrix_for(&self, points: &[Coordinate], mode: TravelMode) -> PlannerResult<DistanceMatrix> {
        (**self).matrix_for(points, mode)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route_geometry(&self, waypoints: &[Coordinate], mode: TravelMode) -> PlannerResult<Vec<Coordinate>> {
        (**self).route_geometry(waypoints, mode)
    }

    fn route_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        avoid: Option<RoadClass>,
    ) -> PlannerResult<Vec<ProviderRoute>> {
        (**self).route_alternatives(origin, destination, mode, avoid)
    }
}
