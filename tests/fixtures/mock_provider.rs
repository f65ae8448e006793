//! Scriptable provider standing in for a real routing service.

use std::collections::HashMap;
use std::sync::Mutex;

use route_planner::haversine::HaversineMatrix;
use route_planner::matrix::DistanceMatrix;
use route_planner::traits::{
    Coordinate, DistanceMatrixProvider, ProviderRoute, RoadClass, RouteProvider, TravelMode,
};
use route_planner::{PlannerError, PlannerResult};

/// Canned responses plus a log of what the planner asked for.
///
/// - The matrix defaults to straight-line distances.
/// - Geometry requests echo their waypoints back.
/// - Avoidance lookups without a scripted route fail.
#[derive(Default)]
pub struct MockProvider {
    matrix: Option<DistanceMatrix>,
    fail_matrix: bool,
    native_routes: Vec<ProviderRoute>,
    avoid_routes: HashMap<RoadClass, ProviderRoute>,
    pub geometry_requests: Mutex<Vec<Vec<Coordinate>>>,
    pub avoid_requests: Mutex<Vec<RoadClass>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrix(mut self, matrix: DistanceMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn failing_matrix(mut self) -> Self {
        self.fail_matrix = true;
        self
    }

    pub fn with_native_routes(mut self, routes: Vec<ProviderRoute>) -> Self {
        self.native_routes = routes;
        self
    }

    pub fn with_avoid_route(mut self, class: RoadClass, route: ProviderRoute) -> Self {
        self.avoid_routes.insert(class, route);
        self
    }

    pub fn geometry_request_count(&self) -> usize {
        self.geometry_requests.lock().unwrap().len()
    }
}

impl DistanceMatrixProvider for MockProvider {
    fn matrix_for(&self, points: &[Coordinate], mode: TravelMode) -> PlannerResult<DistanceMatrix> {
        if self.fail_matrix {
            return Err(PlannerError::Provider {
                code: "OVER_QUERY_LIMIT".to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        match &self.matrix {
            Some(matrix) => Ok(matrix.clone()),
            None => HaversineMatrix.matrix_for(points, mode),
        }
    }
}

impl RouteProvider for MockProvider {
    fn route_geometry(&self, waypoints: &[Coordinate], _mode: TravelMode) -> PlannerResult<Vec<Coordinate>> {
        self.geometry_requests.lock().unwrap().push(waypoints.to_vec());
        Ok(waypoints.to_vec())
    }

    fn route_alternatives(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _mode: TravelMode,
        avoid: Option<RoadClass>,
    ) -> PlannerResult<Vec<ProviderRoute>> {
        let Some(class) = avoid else {
            return Ok(self.native_routes.clone());
        };
        self.avoid_requests.lock().unwrap().push(class);
        match self.avoid_routes.get(&class) {
            Some(route) => Ok(vec![route.clone()]),
            None => Err(PlannerError::Provider {
                code: "InvalidValue".to_string(),
                message: format!("exclude class {} not supported", class.osrm_class()),
            }),
        }
    }
}

/// A provider route with a two-point geometry.
pub fn provider_route(summary: &str, distance_km: f64, duration_secs: f64) -> ProviderRoute {
    ProviderRoute {
        geometry: vec![Coordinate::new(36.0, -115.0), Coordinate::new(36.1, -115.1)],
        distance_km,
        duration_secs,
        summary: summary.to_string(),
    }
}
