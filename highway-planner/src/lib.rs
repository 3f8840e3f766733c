//! Highway route planner.
//!
//! Service stations stand at distinct positions along a single straight
//! highway, and each station keeps a small fleet of cars described only by
//! their range. The planner answers: "what is the fewest number of cars I
//! need to get from this station to that one?"
//!
//! [`highway::Highway`] owns all state; [`command::Session`] drives it from
//! the line protocol the binary reads on stdin.

pub mod cars;
pub mod command;
pub mod config;
pub mod domain;
pub mod highway;
pub mod logging;
pub mod planner;
pub mod stations;
