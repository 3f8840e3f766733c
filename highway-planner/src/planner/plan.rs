//! Minimum-hop route search along the highway.
//!
//! A query scans the stations between origin and destination exactly once,
//! in the direction of travel, handing each one to a [`FrontierTracker`].
//! The planner only reads the index; it never changes stations or cars.

use std::time::Instant;

use tracing::debug;

use super::config::PlannerConfig;
use super::frontier::{Direction, FrontierTracker};
use super::route::RouteOutcome;
use crate::domain::StationId;
use crate::stations::{Station, StationIndex};

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Origin and destination are the same station
    #[error("invalid route query: station {station} is both origin and destination")]
    InvalidQuery { station: StationId },

    /// The scan ran past the configured deadline
    #[error("route query timed out after scanning {scanned} stations")]
    Timeout { scanned: usize },
}

/// Route planner over a station index.
///
/// # Examples
///
/// ```
/// use highway_planner::domain::StationId;
/// use highway_planner::planner::{PlannerConfig, RoutePlanner};
/// use highway_planner::stations::StationIndex;
///
/// let mut index = StationIndex::new();
/// for (id, range) in [(10, 15), (20, 15), (30, 1)] {
///     index.insert(StationId::new(id)).unwrap().cars_mut().insert(range).unwrap();
/// }
///
/// let config = PlannerConfig::default();
/// let planner = RoutePlanner::new(&index, &config);
/// let outcome = planner.plan(StationId::new(10), StationId::new(30)).unwrap();
/// assert_eq!(outcome.route().unwrap().to_string(), "10 20 30");
/// ```
pub struct RoutePlanner<'a> {
    stations: &'a StationIndex,
    config: &'a PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new planner.
    pub fn new(stations: &'a StationIndex, config: &'a PlannerConfig) -> Self {
        Self { stations, config }
    }

    /// Find a minimum-hop route from `start` to `end`.
    ///
    /// Among several minimum-hop routes the one returned always changes car
    /// at the lowest-id station able to make the next hop, whichever way the
    /// query travels. Asking for a route from a station to itself is an
    /// error; a missing origin or destination simply has no route.
    pub fn plan(&self, start: StationId, end: StationId) -> Result<RouteOutcome, PlanError> {
        let Some(direction) = Direction::between(start, end) else {
            return Err(PlanError::InvalidQuery { station: start });
        };

        let outcome = match direction {
            Direction::Ascending => {
                self.scan(direction, self.stations.range_ascending(start, end), start, end)
            }
            Direction::Descending => {
                self.scan(direction, self.stations.range_descending(start, end), start, end)
            }
        }?;

        match outcome.route() {
            Some(route) => debug!(
                origin = %route.origin(),
                destination = %route.destination(),
                hops = route.hops(),
                "route found"
            ),
            None => debug!(%start, %end, "route query found no route"),
        }
        Ok(outcome)
    }

    fn scan<'s, I>(
        &self,
        direction: Direction,
        mut stations: I,
        start: StationId,
        end: StationId,
    ) -> Result<RouteOutcome, PlanError>
    where
        I: Iterator<Item = &'s Station>,
    {
        let started = Instant::now();

        let Some(origin) = stations.next().filter(|s| s.id() == start) else {
            debug!(%start, "origin station not on the highway");
            return Ok(RouteOutcome::NoRoute);
        };
        let mut tracker = FrontierTracker::start(direction, origin);

        for station in stations {
            let is_end = station.id() == end;
            if let Err(gap) = tracker.visit(station, is_end) {
                debug!(%start, %end, unreachable = %gap.station, "no route");
                return Ok(RouteOutcome::NoRoute);
            }
            if is_end {
                return Ok(RouteOutcome::Found(tracker.into_route()));
            }

            let scanned = tracker.scanned();
            if let Some(deadline) = self.config.deadline_due(scanned) {
                if started.elapsed() >= deadline {
                    return Err(PlanError::Timeout { scanned });
                }
            }
        }

        debug!(%end, "destination station not on the highway");
        Ok(RouteOutcome::NoRoute)
    }
}
