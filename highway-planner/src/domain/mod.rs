//! Domain types for the highway planner.
//!
//! Stations are identified by their position along a single straight road.
//! Cars are described only by their range: how far they can drive from the
//! station they are parked at.

mod station;

pub use station::{InvalidStationId, StationId};

/// Maximum distance a car can cover from its station.
pub type CarRange = u32;
