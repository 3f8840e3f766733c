//! The stations along the highway.
//!
//! Provides the ordered [`StationIndex`] and the bounded range iterators the
//! route planner scans.

mod error;
mod index;
mod range;
mod station;

pub use error::DuplicateStation;
pub use index::StationIndex;
pub use range::{Ascending, Descending};
pub use station::Station;
