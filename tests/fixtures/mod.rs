//! Test fixtures for route-planner.
//!
//! Provides:
//! - Real Las Vegas / Henderson locations (from OpenStreetMap)
//! - A scriptable in-memory distance/route provider
#![allow(dead_code)]

pub mod las_vegas_locations;
pub mod mock_provider;

pub use las_vegas_locations::*;
pub use mock_provider::*;
