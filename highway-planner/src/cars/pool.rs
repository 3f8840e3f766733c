//! Bounded max-heap of car ranges.

use crate::domain::CarRange;

/// Default number of cars a single station can hold.
pub const DEFAULT_MAX_CARS: usize = 512;

/// Error returned when inserting into a full car pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("car pool is full ({capacity} cars)")]
pub struct CapacityExceeded {
    /// The capacity of the pool that rejected the car.
    pub capacity: usize,
}

/// The cars parked at one station.
///
/// A bounded multiset of car ranges kept as an array-backed binary max-heap,
/// so the best range is always in slot 0. Insertion is `O(log k)`, the best
/// range is `O(1)`, and removing an arbitrary range is an `O(k)` scan
/// followed by an `O(log k)` repair.
///
/// # Invariants
///
/// - `len() <= capacity()`
/// - every slot's range is `>=` the ranges of its two children
///
/// # Examples
///
/// ```
/// use highway_planner::cars::CarPool;
///
/// let mut pool = CarPool::with_capacity(4);
/// pool.insert(30).unwrap();
/// pool.insert(50).unwrap();
/// pool.insert(10).unwrap();
/// assert_eq!(pool.max(), 50);
///
/// assert!(pool.remove_one(50));
/// assert_eq!(pool.max(), 30);
///
/// // Removing a range that is not parked here is a no-op
/// assert!(!pool.remove_one(99));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarPool {
    heap: Vec<CarRange>,
    capacity: usize,
}

impl CarPool {
    /// Create an empty pool with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CARS)
    }

    /// Create an empty pool holding at most `capacity` cars.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::new(),
            capacity,
        }
    }

    /// Park a car with the given range.
    ///
    /// Fails without modifying the pool if it already holds `capacity()` cars.
    pub fn insert(&mut self, range: CarRange) -> Result<(), CapacityExceeded> {
        if self.heap.len() >= self.capacity {
            return Err(CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.heap.push(range);
        self.sift_up(self.heap.len() - 1);
        Ok(())
    }

    /// Remove one car whose range equals `range`.
    ///
    /// Returns `false` if no such car is parked here. When several cars share
    /// the range, whichever the scan meets first is removed.
    pub fn remove_one(&mut self, range: CarRange) -> bool {
        let Some(idx) = self.heap.iter().position(|&r| r == range) else {
            return false;
        };

        self.heap.swap_remove(idx);
        if idx < self.heap.len() {
            // The moved-in tail value may belong below or above this slot.
            self.sift_down(idx);
            self.sift_up(idx);
        }
        true
    }

    /// The best range in the pool, or 0 when no car is parked here.
    pub fn max(&self) -> CarRange {
        self.heap.first().copied().unwrap_or(0)
    }

    /// Number of cars in the pool.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no car is parked here.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Maximum number of cars the pool accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over the parked ranges in heap order.
    pub fn iter(&self) -> impl Iterator<Item = CarRange> + '_ {
        self.heap.iter().copied()
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[parent] >= self.heap[idx] {
                break;
            }
            self.heap.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut largest = idx;

            if left < len && self.heap[left] > self.heap[largest] {
                largest = left;
            }
            if right < len && self.heap[right] > self.heap[largest] {
                largest = right;
            }
            if largest == idx {
                break;
            }
            self.heap.swap(idx, largest);
            idx = largest;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2] >= self.heap[i])
    }
}

impl Default for CarPool {
    fn default() -> Self {
        Self::new()
    }
}
