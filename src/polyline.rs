//! Polyline representation for route geometries.
//!
//! Providers ship geometry in the encoded polyline format (precision 5).
//! Decoding happens at that boundary; inside the planner geometry is always a
//! sequence of [`Coordinate`]s.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::traits::Coordinate;

const PRECISION: f64 = 1e5;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decode an encoded polyline string.
    pub fn decode(encoded: &str) -> PlannerResult<Self> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat = accumulate(lat, next_delta(bytes, &mut index)?)?;
            lng = accumulate(lng, next_delta(bytes, &mut index)?)?;
            points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append `other`, dropping its first point when it would repeat the
    /// joint between the two pieces.
    pub fn stitch(&mut self, other: Polyline) {
        let mut incoming = other.points.into_iter();
        if !self.points.is_empty() {
            incoming.next();
        }
        self.points.extend(incoming);
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

fn accumulate(value: i64, delta: i64) -> PlannerResult<i64> {
    value
        .checked_add(delta)
        .ok_or_else(|| PlannerError::MalformedResponse("polyline value overflow".to_string()))
}

fn next_delta(bytes: &[u8], index: &mut usize) -> PlannerResult<i64> {
    let mut shift = 0;
    let mut result: i64 = 0;

    loop {
        let byte = match bytes.get(*index) {
            Some(&b) if b >= 63 => i64::from(b - 63),
            Some(&b) => {
                return Err(PlannerError::MalformedResponse(format!(
                    "invalid polyline character {:?}",
                    b as char
                )));
            }
            None => {
                return Err(PlannerError::MalformedResponse(
                    "truncated polyline".to_string(),
                ));
            }
        };
        *index += 1;

        if shift > 60 {
            return Err(PlannerError::MalformedResponse(
                "polyline value overflow".to_string(),
            ));
        }
        result |= (byte & 0x1f) << shift;
        shift += 5;

        if byte < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
