//! route-planner core
//!
//! Builds a weighted graph over a set of points, finds the shortest path
//! between two of them, and synthesizes ranked alternative routes with
//! road-following geometry from a pluggable distance/route provider.

pub mod alternatives;
pub mod dijkstra;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod haversine;
pub mod heap;
pub mod matrix;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod traits;

pub use error::{PlannerError, PlannerResult};
pub use planner::{PlanRequest, PlanResponse, Planner, Point};
