//! OSRM HTTP adapter implementing the distance/route provider contracts.
//!
//! - Pairwise distances come from the Table service (`annotations=distance`),
//!   requested in origin × destination chunks that run in parallel.
//! - Geometry comes from the Route service with `steps=true`, falling back
//!   to the overview polyline and finally to the input waypoints.
//! - Alternatives use `alternatives=true`, or `exclude=<class>` when a road
//!   category must be avoided.

use std::ops::Range;

use rayon::prelude::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::matrix::{DistanceMatrix, UNREACHABLE};
use crate::polyline::Polyline;
use crate::traits::{
    Coordinate, DistanceMatrixProvider, ProviderRoute, RoadClass, RouteProvider, TravelMode,
};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Maximum origins (and destinations) per Table request.
    pub table_chunk_size: usize,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            table_chunk_size: 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn table_url(&self, points: &[Coordinate], origins: &Range<usize>, destinations: &Range<usize>, mode: TravelMode) -> String {
        let coords = join_coordinates(
            points[origins.clone()].iter().chain(&points[destinations.clone()]),
        );
        let sources = index_list(0..origins.len());
        let targets = index_list(origins.len()..origins.len() + destinations.len());

        format!(
            "{}/table/v1/{}/{}?annotations=distance&sources={}&destinations={}",
            self.base_url(),
            mode.osrm_profile(),
            coords,
            sources,
            targets
        )
    }

    fn route_url(&self, waypoints: &[Coordinate], mode: TravelMode, query: RouteQuery) -> String {
        let mut url = format!(
            "{}/route/v1/{}/{}?overview=full&geometries=polyline&steps=true",
            self.base_url(),
            mode.osrm_profile(),
            join_coordinates(waypoints.iter())
        );
        match query {
            RouteQuery::Single => {}
            RouteQuery::Alternatives => url.push_str("&alternatives=true"),
            RouteQuery::Avoiding(class) => {
                url.push_str("&exclude=");
                url.push_str(class.osrm_class());
            }
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> PlannerResult<T> {
        debug!(url, "OSRM request");
        let body = self.client.get(url).send()?.json::<T>()?;
        Ok(body)
    }

    /// Fetch one origin × destination block of the matrix, in kilometres.
    fn fetch_table_block(
        &self,
        points: &[Coordinate],
        origins: &Range<usize>,
        destinations: &Range<usize>,
        mode: TravelMode,
    ) -> PlannerResult<Vec<Vec<f64>>> {
        let url = self.table_url(points, origins, destinations, mode);
        let response: OsrmTableResponse = self.get(&url)?;
        convert_table(response, origins.len(), destinations.len())
    }

    fn fetch_routes(&self, waypoints: &[Coordinate], mode: TravelMode, query: RouteQuery) -> PlannerResult<Vec<OsrmRoute>> {
        let url = self.route_url(waypoints, mode, query);
        let response: OsrmRouteResponse = self.get(&url)?;
        if response.code != "Ok" {
            return Err(PlannerError::Provider {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }
        if response.routes.is_empty() {
            return Err(PlannerError::Provider {
                code: "NoRoute".to_string(),
                message: "route request returned no routes".to_string(),
            });
        }
        Ok(response.routes)
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, points: &[Coordinate], mode: TravelMode) -> PlannerResult<DistanceMatrix> {
        let n = points.len();
        let chunks = chunk_ranges(n, self.config.table_chunk_size);
        let blocks: Vec<(Range<usize>, Range<usize>)> = chunks
            .iter()
            .flat_map(|origins| chunks.iter().map(move |destinations| (origins.clone(), destinations.clone())))
            .collect();

        debug!(points = n, blocks = blocks.len(), "fetching distance matrix");

        let results = blocks
            .par_iter()
            .map(|(origins, destinations)| self.fetch_table_block(points, origins, destinations, mode))
            .collect::<PlannerResult<Vec<_>>>()?;

        let mut matrix = DistanceMatrix::new(n);
        for ((origins, destinations), rows) in blocks.into_iter().zip(results) {
            for (from, row) in origins.zip(rows) {
                for (to, km) in destinations.clone().zip(row) {
                    matrix.set(from, to, km);
                }
            }
        }

        Ok(matrix)
    }
}

impl RouteProvider for OsrmClient {
    fn route_geometry(&self, waypoints: &[Coordinate], mode: TravelMode) -> PlannerResult<Vec<Coordinate>> {
        if waypoints.len() < 2 {
            return Ok(waypoints.to_vec());
        }

        let routes = self.fetch_routes(waypoints, mode, RouteQuery::Single)?;
        // fetch_routes guarantees at least one route.
        match routes.first() {
            Some(route) => decode_route_geometry(route, waypoints),
            None => Ok(waypoints.to_vec()),
        }
    }

    fn route_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        avoid: Option<RoadClass>,
    ) -> PlannerResult<Vec<ProviderRoute>> {
        let waypoints = [origin, destination];
        let query = match avoid {
            Some(class) => RouteQuery::Avoiding(class),
            None => RouteQuery::Alternatives,
        };

        let routes = self.fetch_routes(&waypoints, mode, query)?;
        routes
            .iter()
            .enumerate()
            .map(|(idx, route)| {
                Ok(ProviderRoute {
                    geometry: decode_route_geometry(route, &waypoints)?,
                    distance_km: route.distance / 1000.0,
                    duration_secs: route.duration,
                    summary: route_summary(route, idx),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum RouteQuery {
    Single,
    Alternatives,
    Avoiding(RoadClass),
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    /// Metres; `null` where no route exists.
    distances: Option<Vec<Vec<Option<f64>>>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Metres.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: Option<String>,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    geometry: Option<String>,
}

fn convert_table(response: OsrmTableResponse, rows: usize, cols: usize) -> PlannerResult<Vec<Vec<f64>>> {
    if response.code != "Ok" {
        return Err(PlannerError::Provider {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let distances = response
        .distances
        .ok_or_else(|| PlannerError::MalformedResponse("table response missing distances".to_string()))?;

    if distances.len() != rows || distances.iter().any(|row| row.len() != cols) {
        return Err(PlannerError::MalformedResponse(format!(
            "expected a {rows}x{cols} distance table"
        )));
    }

    // Negative or non-finite values are treated as unreachable too.
    Ok(distances
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.filter(|metres| *metres >= 0.0 && metres.is_finite())
                        .map_or(UNREACHABLE, |metres| metres / 1000.0)
                })
                .collect()
        })
        .collect())
}

/// Step geometry when present, then the overview, then the raw waypoints.
fn decode_route_geometry(route: &OsrmRoute, waypoints: &[Coordinate]) -> PlannerResult<Vec<Coordinate>> {
    let mut detailed = Vec::new();
    for step in route.legs.iter().flat_map(|leg| &leg.steps) {
        if let Some(encoded) = step.geometry.as_deref() {
            detailed.extend(Polyline::decode(encoded)?.into_points());
        }
    }
    if !detailed.is_empty() {
        return Ok(detailed);
    }

    match route.geometry.as_deref() {
        Some(encoded) => {
            let overview = Polyline::decode(encoded)?;
            if overview.is_empty() {
                Ok(waypoints.to_vec())
            } else {
                Ok(overview.into_points())
            }
        }
        None => Ok(waypoints.to_vec()),
    }
}

fn route_summary(route: &OsrmRoute, idx: usize) -> String {
    let summary = route
        .legs
        .iter()
        .map(|leg| leg.summary.as_str())
        .filter(|summary| !summary.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if summary.is_empty() {
        format!("Route {}", idx + 1)
    } else {
        summary
    }
}

fn chunk_ranges(len: usize, chunk: usize) -> Vec<Range<usize>> {
    let chunk = chunk.max(1);
    (0..len)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(len))
        .collect()
}

fn join_coordinates<'a>(coords: impl Iterator<Item = &'a Coordinate>) -> String {
    coords
        .map(|c| format!("{:.6},{:.6}", c.lng, c.lat))
        .collect::<Vec<_>>()
        .join(";")
}

fn index_list(range: Range<usize>) -> String {
    range.map(|i| i.to_string()).collect::<Vec<_>>().join(";")
}
