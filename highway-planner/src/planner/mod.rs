//! Route planner for the highway.
//!
//! This module answers: "what is the fewest number of cars I need to get
//! from this station to that one?" A traveller may only use the best car
//! parked at each station they stop at, and can travel in either direction
//! along the line.
//!
//! The search is a single ordered scan of the stations between origin and
//! destination, keeping a queue of stations whose reach may be needed later.

mod config;
mod frontier;
mod plan;
mod route;


pub use config::PlannerConfig;
pub use frontier::{Direction, FrontierTracker, Unreachable};
pub use plan::{PlanError, RoutePlanner};
pub use route::{Route, RouteOutcome};
