//! A single station and the cars parked there.

use crate::cars::CarPool;
use crate::domain::{CarRange, StationId};

/// A station on the highway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    id: StationId,
    cars: CarPool,
}

impl Station {
    /// Create a station with no cars.
    pub fn new(id: StationId, max_cars: usize) -> Self {
        Self {
            id,
            cars: CarPool::with_capacity(max_cars),
        }
    }

    /// Placeholder left in a released arena slot. Holds no allocation.
    pub(super) fn vacant() -> Self {
        Self::new(StationId::MIN, 0)
    }

    /// The station's position on the highway.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// The cars parked at this station.
    pub fn cars(&self) -> &CarPool {
        &self.cars
    }

    /// Mutable access to the cars parked at this station.
    pub fn cars_mut(&mut self) -> &mut CarPool {
        &mut self.cars
    }

    /// Range of the best car parked here (0 if there are none).
    pub fn best_range(&self) -> CarRange {
        self.cars.max()
    }
}
