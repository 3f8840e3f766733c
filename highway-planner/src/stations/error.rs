//! Station index error types.

use crate::domain::StationId;

/// A station with this id is already on the highway.
///
/// The existing station and its cars are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("station {0} already exists")]
pub struct DuplicateStation(pub StationId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DuplicateStation(StationId::new(12));
        assert_eq!(err.to_string(), "station 12 already exists");
    }
}
