//! Route types.
//!
//! A `Route` is the ordered list of stations a traveller stops at, from the
//! origin to the destination, changing car at every intermediate station.

use std::fmt;

use crate::domain::StationId;

/// A minimum-hop route between two stations.
///
/// # Invariants
///
/// - at least two stations (origin and destination differ)
/// - station ids are strictly monotonic in the direction of travel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stations: Vec<StationId>,
}

impl Route {
    pub(super) fn new(stations: Vec<StationId>) -> Self {
        Self { stations }
    }

    /// Every station on the route, origin first.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Number of hops, i.e. cars used.
    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// Where the route starts.
    pub fn origin(&self) -> StationId {
        self.stations.first().copied().unwrap_or_default()
    }

    /// Where the route ends.
    pub fn destination(&self) -> StationId {
        self.stations.last().copied().unwrap_or_default()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for station in &self.stations {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{station}")?;
            first = false;
        }
        Ok(())
    }
}

/// Result of a route query that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A minimum-hop route exists.
    Found(Route),
    /// The destination cannot be reached from the origin.
    NoRoute,
}

impl RouteOutcome {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoRoute => None,
        }
    }

    /// Returns true if a route was found.
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}
