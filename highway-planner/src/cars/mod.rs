//! Per-station car storage.

mod pool;

pub use pool::{CapacityExceeded, CarPool, DEFAULT_MAX_CARS};
