//! Road-following geometry for a sequence of graph nodes.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerResult;
use crate::haversine::interpolate_segment;
use crate::polyline::Polyline;
use crate::traits::{Coordinate, RouteProvider, TravelMode};

/// Most intermediate waypoints inserted into one segment.
pub const MAX_SEGMENT_WAYPOINTS: usize = 3;

/// Upper bound for the segment waypoint spacing.
pub const MAX_WAYPOINT_SPACING_KM: f64 = 10.0;

/// How finely geometry is requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// One provider lookup for the whole node sequence.
    #[default]
    Route,
    /// One lookup per consecutive node pair, with interpolated waypoints.
    Segment,
}

/// Turns node coordinates into a polyline.
///
/// Without a provider (straight-line mode) the nodes are returned as-is.
#[derive(Debug)]
pub struct GeometryAssembler<'a, P: ?Sized> {
    provider: Option<&'a P>,
    mode: TravelMode,
    detail: DetailLevel,
    spacing_km: f64,
}

impl<'a, P: RouteProvider + ?Sized> GeometryAssembler<'a, P> {
    pub fn new(provider: Option<&'a P>, mode: TravelMode, detail: DetailLevel, spacing_km: f64) -> Self {
        Self {
            provider,
            mode,
            detail,
            spacing_km,
        }
    }

    pub fn assemble(&self, nodes: &[Coordinate]) -> PlannerResult<Vec<Coordinate>> {
        let Some(provider) = self.provider else {
            return Ok(nodes.to_vec());
        };
        if nodes.len() < 2 {
            return Ok(nodes.to_vec());
        }

        match self.detail {
            DetailLevel::Route => {
                let geometry = provider.route_geometry(nodes, self.mode)?;
                Ok(if geometry.is_empty() { nodes.to_vec() } else { geometry })
            }
            DetailLevel::Segment => self.assemble_segments(provider, nodes),
        }
    }

    fn assemble_segments(&self, provider: &P, nodes: &[Coordinate]) -> PlannerResult<Vec<Coordinate>> {
        debug!(
            segments = nodes.len() - 1,
            spacing_km = self.spacing_km,
            "assembling segment geometry"
        );

        // Requests are independent; collect keeps segment order for stitching.
        let segments = nodes
            .par_windows(2)
            .map(|pair| {
                let waypoints =
                    interpolate_segment(pair[0], pair[1], self.spacing_km, MAX_SEGMENT_WAYPOINTS);
                provider.route_geometry(&waypoints, self.mode)
            })
            .collect::<PlannerResult<Vec<_>>>()?;

        let mut combined = Polyline::default();
        for segment in segments.into_iter().filter(|segment| !segment.is_empty()) {
            combined.stitch(Polyline::new(segment));
        }

        Ok(if combined.is_empty() {
            nodes.to_vec()
        } else {
            combined.into_points()
        })
    }
}
