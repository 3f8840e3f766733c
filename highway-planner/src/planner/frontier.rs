//! Per-query bookkeeping for the route scan.
//!
//! The tracker records every station the scan visits, which earlier station
//! each one is reached from, and a queue of candidate stations whose reach
//! may be needed for a later hop. It is created for one query and consumed
//! when the route is rebuilt.

use std::collections::VecDeque;

use tracing::trace;

use super::route::Route;
use crate::domain::{CarRange, StationId};
use crate::stations::Station;

/// Which way along the highway a query travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From a lower station id to a higher one.
    Ascending,
    /// From a higher station id to a lower one.
    Descending,
}

impl Direction {
    /// Direction of travel from `start` to `end`, or `None` if they are equal.
    pub fn between(start: StationId, end: StationId) -> Option<Self> {
        match start.cmp(&end) {
            std::cmp::Ordering::Less => Some(Direction::Ascending),
            std::cmp::Ordering::Greater => Some(Direction::Descending),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Farthest position a car with `range` can drive to from `id`.
    ///
    /// Clamped to the ends of the line.
    pub fn reach(self, id: StationId, range: CarRange) -> u32 {
        match self {
            Direction::Ascending => id.get().saturating_add(range),
            Direction::Descending => id.get().saturating_sub(range),
        }
    }

    /// Returns true if a hop with this reach gets as far as `id`.
    pub fn covers(self, reach: u32, id: StationId) -> bool {
        match self {
            Direction::Ascending => reach >= id.get(),
            Direction::Descending => reach <= id.get(),
        }
    }

    /// Returns true if `reach` gets strictly farther than `other`.
    pub fn extends(self, reach: u32, other: u32) -> bool {
        match self {
            Direction::Ascending => reach > other,
            Direction::Descending => reach < other,
        }
    }
}

/// A visited station that might become the next frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    reach: u32,
    index: usize,
}

/// A scanned station as the route rebuild needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visit {
    id: StationId,
    reach: u32,
    hops: usize,
    predecessor: usize,
}

/// The scan met a station that no chain of hops can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unreachable {
    /// The first station that could not be reached.
    pub station: StationId,
}

/// State of one route query.
///
/// `visited[i]` is the i-th station scanned, with the fewest hops needed to
/// reach it and the frontier it was reached from. Candidates are kept in
/// discovery order with strictly improving reach, so the front of the queue
/// is always the earliest station able to extend the route.
///
/// Hop counts never decrease along the scan, so the stations needing the
/// same number of hops form one contiguous run of `visited`.
#[derive(Debug)]
pub struct FrontierTracker {
    direction: Direction,
    visited: Vec<Visit>,
    candidates: VecDeque<Candidate>,
    reach: u32,
    frontier: usize,
}

impl FrontierTracker {
    /// Begin a query at `origin`.
    pub fn start(direction: Direction, origin: &Station) -> Self {
        let reach = direction.reach(origin.id(), origin.best_range());
        Self {
            direction,
            visited: vec![Visit {
                id: origin.id(),
                reach,
                hops: 0,
                predecessor: 0,
            }],
            candidates: VecDeque::new(),
            reach,
            frontier: 0,
        }
    }

    /// Number of stations scanned so far, including the origin.
    pub fn scanned(&self) -> usize {
        self.visited.len()
    }

    /// Record the next station of the scan.
    ///
    /// `is_end` marks the destination, which is never queued as a candidate
    /// since nothing beyond it is needed.
    pub fn visit(&mut self, station: &Station, is_end: bool) -> Result<(), Unreachable> {
        let id = station.id();

        while !self.direction.covers(self.reach, id) {
            let Some(candidate) = self.candidates.pop_front() else {
                trace!(station = %id, "no candidate left to bridge the gap");
                return Err(Unreachable { station: id });
            };
            // Candidates form a chain: the next one must itself be within
            // reach of the current frontier.
            let candidate_id = self.visited[candidate.index].id;
            if !self.direction.covers(self.reach, candidate_id) {
                trace!(station = %id, candidate = %candidate_id, "candidate out of reach");
                return Err(Unreachable { station: id });
            }
            trace!(frontier = %candidate_id, reach = candidate.reach, "frontier advanced");
            self.reach = candidate.reach;
            self.frontier = candidate.index;
        }

        let index = self.visited.len();
        let own_reach = self.direction.reach(id, station.best_range());
        self.visited.push(Visit {
            id,
            reach: own_reach,
            hops: self.visited[self.frontier].hops + 1,
            predecessor: self.frontier,
        });

        let beats_tail = self
            .candidates
            .back()
            .is_none_or(|tail| self.direction.extends(own_reach, tail.reach));
        if !is_end && self.direction.extends(own_reach, self.reach) && beats_tail {
            self.candidates.push_back(Candidate {
                reach: own_reach,
                index,
            });
        }

        Ok(())
    }

    /// Rebuild the route from the origin to the last visited station.
    ///
    /// Each hop is taken from the lowest-id station that needs one hop fewer
    /// and can still make it.
    pub fn into_route(self) -> Route {
        let mut index = self.visited.len() - 1;
        let mut stations = vec![self.visited[index].id];
        while index != 0 {
            index = self.lowest_id_predecessor(index);
            stations.push(self.visited[index].id);
        }
        stations.reverse();
        Route::new(stations)
    }

    fn lowest_id_predecessor(&self, index: usize) -> usize {
        let target = self.visited[index];
        let frontier = target.predecessor;
        match self.direction {
            // The queue hands out frontiers in id order already.
            Direction::Ascending => frontier,
            // Later stations in the frontier's run have lower ids.
            Direction::Descending => {
                let hops = self.visited[frontier].hops;
                (frontier..index)
                    .take_while(|&i| self.visited[i].hops == hops)
                    .filter(|&i| self.direction.covers(self.visited[i].reach, target.id))
                    .last()
                    .unwrap_or(frontier)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u32, ranges: &[CarRange]) -> Station {
        let mut station = Station::new(StationId::new(id), 16);
        for &range in ranges {
            station.cars_mut().insert(range).unwrap();
        }
        station
    }

    fn ids(route: &Route) -> Vec<u32> {
        route.stations().iter().map(|s| s.get()).collect()
    }

    #[test]
    fn direction_between() {
        let (a, b) = (StationId::new(1), StationId::new(2));
        assert_eq!(Direction::between(a, b), Some(Direction::Ascending));
        assert_eq!(Direction::between(b, a), Some(Direction::Descending));
        assert_eq!(Direction::between(a, a), None);
    }

    #[test]
    fn reach_is_clamped() {
        let near_end = StationId::new(u32::MAX - 1);
        assert_eq!(Direction::Ascending.reach(near_end, 10), u32::MAX);
        assert_eq!(Direction::Descending.reach(StationId::new(3), 10), 0);
        assert_eq!(Direction::Descending.reach(StationId::new(30), 10), 20);
    }

    #[test]
    fn comparisons_are_mirrored() {
        let id = StationId::new(10);
        assert!(Direction::Ascending.covers(10, id));
        assert!(!Direction::Ascending.covers(9, id));
        assert!(Direction::Descending.covers(10, id));
        assert!(!Direction::Descending.covers(11, id));

        assert!(Direction::Ascending.extends(5, 4));
        assert!(!Direction::Ascending.extends(4, 4));
        assert!(Direction::Descending.extends(4, 5));
        assert!(!Direction::Descending.extends(5, 5));
    }

    #[test]
    fn single_hop() {
        let mut tracker = FrontierTracker::start(Direction::Ascending, &station(10, &[50]));
        tracker.visit(&station(20, &[]), false).unwrap();
        tracker.visit(&station(40, &[]), true).unwrap();
        assert_eq!(ids(&tracker.into_route()), vec![10, 40]);
    }

    #[test]
    fn frontier_advances_through_candidate() {
        let mut tracker = FrontierTracker::start(Direction::Ascending, &station(10, &[5]));
        tracker.visit(&station(15, &[20]), false).unwrap();
        assert_eq!(tracker.candidates.len(), 1);
        tracker.visit(&station(30, &[]), true).unwrap();
        assert_eq!(tracker.scanned(), 3);
        assert_eq!(ids(&tracker.into_route()), vec![10, 15, 30]);
    }

    #[test]
    fn weaker_candidates_are_not_queued() {
        let mut tracker = FrontierTracker::start(Direction::Ascending, &station(0, &[10]));
        tracker.visit(&station(2, &[20]), false).unwrap(); // reach 22
        tracker.visit(&station(4, &[15]), false).unwrap(); // reach 19, behind the tail
        tracker.visit(&station(6, &[30]), false).unwrap(); // reach 36
        let reaches: Vec<u32> = tracker.candidates.iter().map(|c| c.reach).collect();
        assert_eq!(reaches, vec![22, 36]);
    }

    #[test]
    fn gap_without_candidates_is_unreachable() {
        let mut tracker = FrontierTracker::start(Direction::Ascending, &station(1, &[1]));
        let err = tracker.visit(&station(100, &[1]), true).unwrap_err();
        assert_eq!(err, Unreachable { station: StationId::new(100) });
    }

    #[test]
    fn hops_are_recorded_per_station() {
        let mut tracker = FrontierTracker::start(Direction::Ascending, &station(0, &[10]));
        tracker.visit(&station(5, &[20]), false).unwrap();
        tracker.visit(&station(10, &[1]), false).unwrap();
        tracker.visit(&station(20, &[]), false).unwrap();
        let hops: Vec<usize> = tracker.visited.iter().map(|v| v.hops).collect();
        assert_eq!(hops, vec![0, 1, 1, 2]);
    }

    #[test]
    fn descending_prefers_lowest_id_frontier() {
        // 20 and 16 both reach 0 from 24's range, 16 has the lower id
        let mut tracker = FrontierTracker::start(Direction::Descending, &station(24, &[10]));
        tracker.visit(&station(20, &[20]), false).unwrap();
        tracker.visit(&station(16, &[20]), false).unwrap();
        tracker.visit(&station(0, &[]), true).unwrap();
        assert_eq!(ids(&tracker.into_route()), vec![24, 16, 0]);
    }

    #[test]
    fn descending_skips_lower_ids_that_fall_short() {
        // 16 has the lowest id among one-hop stations but cannot reach 0
        let mut tracker = FrontierTracker::start(Direction::Descending, &station(24, &[10]));
        tracker.visit(&station(20, &[20]), false).unwrap();
        tracker.visit(&station(16, &[5]), false).unwrap();
        tracker.visit(&station(0, &[]), true).unwrap();
        assert_eq!(ids(&tracker.into_route()), vec![24, 20, 0]);
    }

    #[test]
    fn descending_mirror() {
        let mut tracker = FrontierTracker::start(Direction::Descending, &station(30, &[5]));
        tracker.visit(&station(25, &[20]), false).unwrap();
        tracker.visit(&station(10, &[]), true).unwrap();
        assert_eq!(ids(&tracker.into_route()), vec![30, 25, 10]);
    }
}
