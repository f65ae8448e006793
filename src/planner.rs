//! Request → response orchestration.
//!
//! `plan` runs the pipeline for one request: distance matrix, graph, search,
//! alternatives, geometry. Requests are expected to have passed
//! [`PlanRequest::validate`] at the boundary; `plan` does not re-check them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alternatives::{AlternativeLimits, AlternativeStrategy, Alternatives};
use crate::dijkstra::{SearchMetrics, SearchStep, round_to, shortest_path};
use crate::error::{PlannerError, PlannerResult};
use crate::geometry::{DetailLevel, GeometryAssembler, MAX_WAYPOINT_SPACING_KM};
use crate::graph::{Connectivity, Graph};
use crate::haversine::{HaversineMatrix, haversine_km};
use crate::traits::{Coordinate, DistanceMatrixProvider, RouteProvider, TravelMode};

/// Fewest points a request may carry.
pub const MIN_POINTS: usize = 2;

/// Most points a request may carry.
pub const MAX_POINTS: usize = 50;

/// A named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub points: Vec<Point>,
    pub start: usize,
    pub end: usize,
    pub connectivity: Connectivity,
    pub road_mode: bool,
    pub travel_mode: TravelMode,
    pub detail: DetailLevel,
    waypoint_spacing_km: f64,
}

impl PlanRequest {
    pub fn new(points: Vec<Point>, start: usize, end: usize) -> Self {
        Self {
            points,
            start,
            end,
            connectivity: Connectivity::default(),
            road_mode: false,
            travel_mode: TravelMode::default(),
            detail: DetailLevel::default(),
            waypoint_spacing_km: 0.0,
        }
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_road_mode(mut self, travel_mode: TravelMode) -> Self {
        self.road_mode = true;
        self.travel_mode = travel_mode;
        self
    }

    pub fn with_detail(mut self, detail: DetailLevel) -> Self {
        self.detail = detail;
        self
    }

    /// Spacing for segment detail, clamped to `[0, 10]` km.
    pub fn with_waypoint_spacing(mut self, spacing_km: f64) -> Self {
        self.waypoint_spacing_km = if spacing_km.is_finite() {
            spacing_km.clamp(0.0, MAX_WAYPOINT_SPACING_KM)
        } else {
            0.0
        };
        self
    }

    pub fn waypoint_spacing_km(&self) -> f64 {
        self.waypoint_spacing_km
    }

    /// Boundary checks the planner itself assumes have passed.
    pub fn validate(&self) -> PlannerResult<()> {
        let n = self.points.len();
        if n < MIN_POINTS {
            return Err(PlannerError::InvalidRequest(
                "at least two locations are required".to_string(),
            ));
        }
        if n > MAX_POINTS {
            return Err(PlannerError::InvalidRequest(format!(
                "maximum of {MAX_POINTS} locations allowed"
            )));
        }
        if self.start >= n || self.end >= n {
            return Err(PlannerError::InvalidRequest(
                "start and end must be within locations range".to_string(),
            ));
        }
        if self.points.iter().any(|point| !point.coordinate().is_finite()) {
            return Err(PlannerError::InvalidRequest(
                "each location must have valid lat and lng numbers".to_string(),
            ));
        }
        Ok(())
    }
}

/// Search metrics plus request-level context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    #[serde(flatten)]
    pub search: SearchMetrics,
    pub routing_mode: String,
    pub graph_type: String,
    /// Path distance over the straight-line start→end distance.
    pub detour_factor: f64,
    pub total_distance: f64,
    pub straight_line_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRoute {
    pub distance: f64,
    pub path: Vec<Coordinate>,
    pub waypoints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_longer: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Kilometres, three decimals.
    pub distance: f64,
    pub path: Vec<Coordinate>,
    /// Names of the optimal path's nodes.
    pub waypoints: Vec<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub alternatives: Vec<AlternativeRoute>,
    pub metrics: RouteMetrics,
    pub steps: Vec<SearchStep>,
}

/// Route planner bound to an optional distance/route provider.
///
/// Without a provider only straight-line requests can be served.
#[derive(Debug)]
pub struct Planner<P> {
    provider: Option<P>,
    limits: AlternativeLimits,
}

impl<P: RouteProvider> Planner<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Some(provider),
            limits: AlternativeLimits::default(),
        }
    }

    pub fn without_provider() -> Self {
        Self {
            provider: None,
            limits: AlternativeLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AlternativeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn plan(&self, request: &PlanRequest) -> PlannerResult<PlanResponse> {
        info!(
            points = request.points.len(),
            start = request.start,
            end = request.end,
            road_mode = request.road_mode,
            connectivity = %request.connectivity,
            "planning route"
        );

        let provider = if request.road_mode {
            Some(self.provider.as_ref().ok_or(PlannerError::ProviderUnavailable)?)
        } else {
            None
        };

        let coords: Vec<Coordinate> = request.points.iter().map(Point::coordinate).collect();
        let matrix = match provider {
            Some(provider) => provider.matrix_for(&coords, request.travel_mode)?,
            None => HaversineMatrix.matrix_for(&coords, request.travel_mode)?,
        };

        let graph = Graph::build(&matrix, request.connectivity);
        let result = shortest_path(&graph, request.start, request.end);
        if !result.is_reachable() {
            info!(start = request.start, end = request.end, "no path found");
            return Err(PlannerError::NoPath {
                start: request.start,
                end: request.end,
            });
        }

        let names = |path: &[usize]| -> Vec<String> {
            path.iter().map(|&idx| request.points[idx].name.clone()).collect()
        };
        let node_coords = |path: &[usize]| -> Vec<Coordinate> { path.iter().map(|&idx| coords[idx]).collect() };

        let total_distance = matrix.path_cost(&result.path);
        let straight_line = haversine_km(coords[request.start], coords[request.end]);
        let metrics = RouteMetrics {
            search: result.metrics.clone(),
            routing_mode: if request.road_mode {
                "Road Routing".to_string()
            } else {
                "Haversine (Great Circle)".to_string()
            },
            graph_type: request.connectivity.to_string(),
            detour_factor: if straight_line > 0.0 {
                round_to(total_distance / straight_line, 2)
            } else {
                1.0
            },
            total_distance: round_to(total_distance, 3),
            straight_line_distance: round_to(straight_line, 3),
        };

        let strategy = match provider {
            Some(provider) if result.path.len() == 2 => AlternativeStrategy::DirectTrip {
                provider,
                origin: coords[request.start],
                destination: coords[request.end],
                mode: request.travel_mode,
            },
            _ => AlternativeStrategy::MultiWaypoint { graph: &graph },
        };

        let response = match strategy.synthesize(&result, &self.limits)? {
            Alternatives::Direct {
                optimal,
                alternatives,
            } => {
                let endpoints = vec![
                    request.points[request.start].name.clone(),
                    request.points[request.end].name.clone(),
                ];
                let alternatives = alternatives
                    .into_iter()
                    .map(|ranked| AlternativeRoute {
                        distance: ranked.route.distance_km,
                        path: ranked.route.geometry,
                        waypoints: endpoints.clone(),
                        summary: Some(ranked.route.summary),
                        duration: Some(format_duration(ranked.route.duration_secs)),
                        percent_longer: Some(ranked.percent_longer),
                    })
                    .collect();

                PlanResponse {
                    distance: round_to(optimal.distance_km, 3),
                    path: optimal.geometry,
                    waypoints: names(&result.path),
                    summary: optimal.summary,
                    duration: Some(format_duration(optimal.duration_secs)),
                    alternatives,
                    metrics,
                    steps: result.trace,
                }
            }
            Alternatives::Waypoint(detours) => {
                let assembler = GeometryAssembler::new(
                    provider,
                    request.travel_mode,
                    request.detail,
                    request.waypoint_spacing_km,
                );
                let path = assembler.assemble(&node_coords(&result.path))?;

                let alternatives = detours
                    .into_iter()
                    .map(|detour| {
                        Ok(AlternativeRoute {
                            distance: detour.distance,
                            path: assembler.assemble(&node_coords(&detour.path))?,
                            waypoints: names(&detour.path),
                            summary: None,
                            duration: None,
                            percent_longer: None,
                        })
                    })
                    .collect::<PlannerResult<Vec<_>>>()?;

                let waypoints = names(&result.path);
                PlanResponse {
                    distance: round_to(total_distance, 3),
                    path,
                    summary: format!("Via {}", waypoints.join(" → ")),
                    waypoints,
                    duration: None,
                    alternatives,
                    metrics,
                    steps: result.trace,
                }
            }
        };

        debug!(
            distance_km = response.distance,
            alternatives = response.alternatives.len(),
            "route planned"
        );
        Ok(response)
    }
}

/// `"{h}h {m}m"`, or just `"{m}m"` under an hour.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
