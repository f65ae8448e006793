//! Secondary route synthesis.
//!
//! Two strategies, picked once per request from the shape of the optimal
//! path:
//!
//! * [`AlternativeStrategy::DirectTrip`] asks the provider for its native
//!   alternatives and tops them up with road-avoidance variants.
//! * [`AlternativeStrategy::MultiWaypoint`] forces the route through other
//!   nodes of the graph, one candidate at a time.

use tracing::{debug, warn};

use crate::dijkstra::{PathResult, round_to, shortest_path};
use crate::error::{PlannerError, PlannerResult};
use crate::graph::Graph;
use crate::traits::{Coordinate, ProviderRoute, RoadClass, RouteProvider, TravelMode};

/// Tunables for alternative synthesis.
#[derive(Debug, Clone)]
pub struct AlternativeLimits {
    /// Most alternatives kept for a direct trip.
    pub max_alternatives: usize,
    /// Avoidance variants are only requested while fewer routes than this
    /// have been collected.
    pub avoid_target: usize,
    /// Intermediate nodes tried for a multi-waypoint trip.
    pub max_waypoint_candidates: usize,
    /// Routes closer than this in total distance count as duplicates.
    pub dedup_threshold_km: f64,
    /// Direct-trip alternatives longer than `optimal * ratio` are dropped.
    pub max_detour_ratio: f64,
}

impl Default for AlternativeLimits {
    fn default() -> Self {
        Self {
            max_alternatives: 10,
            avoid_target: 3,
            max_waypoint_candidates: 3,
            dedup_threshold_km: 1.0,
            max_detour_ratio: 1.15,
        }
    }
}

/// A provider route ranked against the optimal one.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRoute {
    pub route: ProviderRoute,
    pub percent_longer: i64,
}

/// A route forced through one intermediate node.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointDetour {
    pub via: usize,
    pub path: Vec<usize>,
    pub distance: f64,
}

/// Output of a strategy; shortest alternative first in both variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Alternatives {
    /// The provider's best route replaces the graph path as the optimum.
    Direct {
        optimal: ProviderRoute,
        alternatives: Vec<RankedRoute>,
    },
    Waypoint(Vec<WaypointDetour>),
}

#[derive(Debug)]
pub enum AlternativeStrategy<'a, P: ?Sized> {
    DirectTrip {
        provider: &'a P,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    },
    MultiWaypoint {
        graph: &'a Graph,
    },
}

impl<'a, P: RouteProvider + ?Sized> AlternativeStrategy<'a, P> {
    pub fn synthesize(&self, optimal: &PathResult, limits: &AlternativeLimits) -> PlannerResult<Alternatives> {
        match self {
            AlternativeStrategy::DirectTrip {
                provider,
                origin,
                destination,
                mode,
            } => direct_trip(*provider, *origin, *destination, *mode, limits),
            AlternativeStrategy::MultiWaypoint { graph } => {
                Ok(Alternatives::Waypoint(multi_waypoint(graph, optimal, limits)))
            }
        }
    }
}

fn direct_trip<P: RouteProvider + ?Sized>(
    provider: &P,
    origin: Coordinate,
    destination: Coordinate,
    mode: TravelMode,
    limits: &AlternativeLimits,
) -> PlannerResult<Alternatives> {
    let mut routes: Vec<ProviderRoute> = provider
        .route_alternatives(origin, destination, mode, None)?
        .into_iter()
        .map(|mut route| {
            route.distance_km = round_to(route.distance_km, 3);
            route
        })
        .collect();

    if routes.len() < limits.avoid_target {
        for class in RoadClass::ALL {
            if routes.len() >= limits.max_alternatives {
                break;
            }

            // Avoidance variants are best-effort; a failed lookup is skipped.
            let variant = match provider.route_alternatives(origin, destination, mode, Some(class)) {
                Ok(variants) => variants.into_iter().next(),
                Err(err) => {
                    warn!(avoid = %class, error = %err, "avoidance route lookup failed");
                    None
                }
            };
            let Some(mut variant) = variant else {
                continue;
            };

            variant.distance_km = round_to(variant.distance_km, 3);
            let duplicate = routes
                .iter()
                .any(|route| (route.distance_km - variant.distance_km).abs() < limits.dedup_threshold_km);
            if duplicate {
                debug!(avoid = %class, distance_km = variant.distance_km, "dropping duplicate variant");
                continue;
            }

            let base = if variant.summary.is_empty() {
                "Alternative"
            } else {
                variant.summary.as_str()
            };
            variant.summary = format!("{base} (avoiding {class})");
            routes.push(variant);
        }
    }

    routes.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    let mut routes = routes.into_iter();
    let optimal = routes.next().ok_or_else(|| PlannerError::Provider {
        code: "NoRoute".to_string(),
        message: "provider returned no routes".to_string(),
    })?;

    let ceiling = optimal.distance_km * limits.max_detour_ratio;
    let alternatives = routes
        .filter(|route| route.distance_km <= ceiling)
        .take(limits.max_alternatives)
        .map(|route| RankedRoute {
            percent_longer: percent_longer(route.distance_km, optimal.distance_km),
            route,
        })
        .collect();

    Ok(Alternatives::Direct {
        optimal,
        alternatives,
    })
}

fn multi_waypoint(graph: &Graph, optimal: &PathResult, limits: &AlternativeLimits) -> Vec<WaypointDetour> {
    let (Some(&start), Some(&end)) = (optimal.path.first(), optimal.path.last()) else {
        return Vec::new();
    };

    let mut detours: Vec<WaypointDetour> = (0..graph.node_count())
        .filter(|&node| node != start && node != end)
        .take(limits.max_waypoint_candidates)
        .filter_map(|via| {
            let to_via = shortest_path(graph, start, via);
            let from_via = shortest_path(graph, via, end);
            if !to_via.is_reachable() || !from_via.is_reachable() {
                return None;
            }

            let mut path = to_via.path;
            path.extend_from_slice(&from_via.path[1..]);
            if path == optimal.path {
                return None;
            }

            Some(WaypointDetour {
                via,
                path,
                distance: round_to(to_via.distance + from_via.distance, 3),
            })
        })
        .collect();

    detours.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    detours
}

fn percent_longer(distance: f64, optimal: f64) -> i64 {
    if optimal > 0.0 {
        (100.0 * (distance - optimal) / optimal).round() as i64
    } else {
        0
    }
}
