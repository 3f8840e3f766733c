//! Station identifier types.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {input:?}: {reason}")]
pub struct InvalidStationId {
    input: String,
    reason: &'static str,
}

/// Position of a station along the highway.
///
/// Station ids are unsigned distances from the start of the line, so the
/// natural ordering of the ids is the order of the stations on the road.
///
/// # Examples
///
/// ```
/// use highway_planner::domain::StationId;
///
/// let id: StationId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
///
/// // Negative and non-numeric positions are rejected
/// assert!("-3".parse::<StationId>().is_err());
/// assert!("km12".parse::<StationId>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StationId(u32);

impl StationId {
    /// The first position on the line.
    pub const MIN: StationId = StationId(u32::MIN);

    /// The last representable position on the line.
    pub const MAX: StationId = StationId(u32::MAX);

    /// Create a station id from a raw position.
    pub const fn new(position: u32) -> Self {
        StationId(position)
    }

    /// Returns the raw position.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for StationId {
    fn from(position: u32) -> Self {
        StationId(position)
    }
}

impl FromStr for StationId {
    type Err = InvalidStationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidStationId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                input: s.to_string(),
                reason: "must be an unsigned decimal number",
            });
        }
        s.parse::<u32>().map(StationId).map_err(|_| InvalidStationId {
            input: s.to_string(),
            reason: "out of range",
        })
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert_eq!("0".parse::<StationId>().unwrap(), StationId::MIN);
        assert_eq!("17".parse::<StationId>().unwrap(), StationId::new(17));
        assert_eq!("4294967295".parse::<StationId>().unwrap(), StationId::MAX);
    }

    #[test]
    fn reject_invalid_ids() {
        assert!("".parse::<StationId>().is_err());
        assert!("+5".parse::<StationId>().is_err());
        assert!("-5".parse::<StationId>().is_err());
        assert!("5a".parse::<StationId>().is_err());
        assert!("4294967296".parse::<StationId>().is_err());
    }

    #[test]
    fn error_display() {
        let err = "x1".parse::<StationId>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid station id \"x1\": must be an unsigned decimal number"
        );
    }

    #[test]
    fn ordering_follows_position() {
        assert!(StationId::new(3) < StationId::new(10));
        assert!(StationId::MAX > StationId::new(u32::MAX - 1));
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::new(250);
        assert_eq!(format!("{id}"), "250");
        assert_eq!(format!("{id:?}"), "StationId(250)");
    }
}
