//! The highway: every station, its cars, and the operations on them.
//!
//! `Highway` is the single owner of the station index. Its five operations
//! are the whole interface the command layer sees. Recoverable results
//! (a duplicate station, a missing car) are plain outcome values; only
//! usage errors are reported through [`HighwayError`].

use tracing::debug;

use crate::cars::CapacityExceeded;
use crate::config::HighwayConfig;
use crate::domain::{CarRange, StationId};
use crate::planner::{PlanError, PlannerConfig, RouteOutcome, RoutePlanner};
use crate::stations::{Station, StationIndex};

/// Fatal errors from highway operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighwayError {
    /// A station was asked to hold more cars than its pool allows
    #[error("station {station}: {source}")]
    CapacityExceeded {
        station: StationId,
        #[source]
        source: CapacityExceeded,
    },

    /// Route planning failed
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Result of adding a station or a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The station or car was added.
    Added,
    /// Nothing changed: the station already exists, or the car's station does not.
    Rejected,
}

/// Result of removing a station or a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The station or car was removed.
    Removed,
    /// Nothing changed: no such station, or no car with that range there.
    NotFound,
}

/// All stations on the highway.
///
/// # Examples
///
/// ```
/// use highway_planner::config::HighwayConfig;
/// use highway_planner::domain::StationId;
/// use highway_planner::highway::{AddOutcome, Highway};
///
/// let mut highway = Highway::new(HighwayConfig::default());
/// let a = StationId::new(10);
/// let b = StationId::new(30);
///
/// assert_eq!(highway.add_station(a, &[25]).unwrap(), AddOutcome::Added);
/// assert_eq!(highway.add_station(b, &[]).unwrap(), AddOutcome::Added);
///
/// let outcome = highway.plan_route(a, b).unwrap();
/// assert_eq!(outcome.route().unwrap().to_string(), "10 30");
/// ```
#[derive(Debug, Clone)]
pub struct Highway {
    stations: StationIndex,
    planner: PlannerConfig,
}

impl Highway {
    /// Create an empty highway.
    pub fn new(config: HighwayConfig) -> Self {
        Self {
            stations: StationIndex::with_max_cars(config.max_cars),
            planner: config.planner(),
        }
    }

    /// Number of stations on the highway.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Look at a station and its cars.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.search(id)
    }

    /// The ordered station index.
    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    /// Build a station at `id` with one car per entry of `ranges`.
    ///
    /// If a station already stands at `id` it is left exactly as it is and
    /// the ranges are discarded. Listing more cars than a station can hold
    /// is an error and builds nothing.
    pub fn add_station(
        &mut self,
        id: StationId,
        ranges: &[CarRange],
    ) -> Result<AddOutcome, HighwayError> {
        let capacity = self.stations.max_cars();
        if ranges.len() > capacity && !self.stations.contains(id) {
            return Err(HighwayError::CapacityExceeded {
                station: id,
                source: CapacityExceeded { capacity },
            });
        }

        let Ok(station) = self.stations.insert(id) else {
            debug!(station = %id, discarded = ranges.len(), "station already exists");
            return Ok(AddOutcome::Rejected);
        };
        for &range in ranges {
            station
                .cars_mut()
                .insert(range)
                .map_err(|source| HighwayError::CapacityExceeded {
                    station: id,
                    source,
                })?;
        }

        debug!(station = %id, cars = ranges.len(), "station added");
        Ok(AddOutcome::Added)
    }

    /// Demolish the station at `id` along with its cars.
    pub fn remove_station(&mut self, id: StationId) -> RemoveOutcome {
        if self.stations.remove(id) {
            debug!(station = %id, "station removed");
            RemoveOutcome::Removed
        } else {
            debug!(station = %id, "no station to remove");
            RemoveOutcome::NotFound
        }
    }

    /// Park a car with `range` at the station at `id`.
    pub fn add_car(&mut self, id: StationId, range: CarRange) -> Result<AddOutcome, HighwayError> {
        let Some(station) = self.stations.search_mut(id) else {
            debug!(station = %id, range, "no station for car");
            return Ok(AddOutcome::Rejected);
        };
        station
            .cars_mut()
            .insert(range)
            .map_err(|source| HighwayError::CapacityExceeded {
                station: id,
                source,
            })?;
        debug!(station = %id, range, "car added");
        Ok(AddOutcome::Added)
    }

    /// Scrap one car with `range` from the station at `id`.
    pub fn remove_car(&mut self, id: StationId, range: CarRange) -> RemoveOutcome {
        let removed = self
            .stations
            .search_mut(id)
            .is_some_and(|station| station.cars_mut().remove_one(range));
        debug!(station = %id, range, removed, "car removal");
        if removed {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        }
    }

    /// Plan a minimum-hop route from `start` to `end`.
    pub fn plan_route(&self, start: StationId, end: StationId) -> Result<RouteOutcome, HighwayError> {
        let planner = RoutePlanner::new(&self.stations, &self.planner);
        let outcome = planner.plan(start, end)?;
        debug!(%start, %end, found = outcome.is_found(), "route query");
        Ok(outcome)
    }
}

impl Default for Highway {
    fn default() -> Self {
        Self::new(HighwayConfig::default())
    }
}
