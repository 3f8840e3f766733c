//! Parsing of command lines.

use std::str::SplitAsciiWhitespace;

use tracing::warn;

use super::CommandError;
use crate::domain::{CarRange, StationId};

/// A single highway command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `aggiungi-stazione <id> <n> <r1> ... <rn>`
    AddStation {
        station: StationId,
        ranges: Vec<CarRange>,
    },
    /// `demolisci-stazione <id>`
    RemoveStation { station: StationId },
    /// `aggiungi-auto <id> <range>`
    AddCar { station: StationId, range: CarRange },
    /// `rottama-auto <id> <range>`
    RemoveCar { station: StationId, range: CarRange },
    /// `pianifica-percorso <start> <end>`
    PlanRoute { start: StationId, end: StationId },
}

impl Command {
    pub const ADD_STATION: &'static str = "aggiungi-stazione";
    pub const REMOVE_STATION: &'static str = "demolisci-stazione";
    pub const ADD_CAR: &'static str = "aggiungi-auto";
    pub const REMOVE_CAR: &'static str = "rottama-auto";
    pub const PLAN_ROUTE: &'static str = "pianifica-percorso";

    /// Parse one line of input.
    ///
    /// Returns `Ok(None)` for a line with nothing on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use highway_planner::command::Command;
    /// use highway_planner::domain::StationId;
    ///
    /// let command = Command::parse("aggiungi-auto 20 35").unwrap();
    /// assert_eq!(
    ///     command,
    ///     Some(Command::AddCar { station: StationId::new(20), range: 35 })
    /// );
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut tokens = Tokens {
            inner: line.split_ascii_whitespace(),
            action: "",
        };
        let Some(action) = tokens.inner.next() else {
            return Ok(None);
        };

        let command = match action {
            Self::ADD_STATION => {
                tokens.action = Self::ADD_STATION;
                let station = tokens.station("station id")?;
                let declared = tokens.number("car count")?;
                let ranges = tokens.remaining_numbers("car range")?;
                if usize::try_from(declared).ok() != Some(ranges.len()) {
                    warn!(
                        %station,
                        declared,
                        listed = ranges.len(),
                        "car count disagrees with the ranges listed"
                    );
                }
                return Ok(Some(Command::AddStation { station, ranges }));
            }
            Self::REMOVE_STATION => {
                tokens.action = Self::REMOVE_STATION;
                Command::RemoveStation {
                    station: tokens.station("station id")?,
                }
            }
            Self::ADD_CAR => {
                tokens.action = Self::ADD_CAR;
                Command::AddCar {
                    station: tokens.station("station id")?,
                    range: tokens.number("car range")?,
                }
            }
            Self::REMOVE_CAR => {
                tokens.action = Self::REMOVE_CAR;
                Command::RemoveCar {
                    station: tokens.station("station id")?,
                    range: tokens.number("car range")?,
                }
            }
            Self::PLAN_ROUTE => {
                tokens.action = Self::PLAN_ROUTE;
                Command::PlanRoute {
                    start: tokens.station("start station")?,
                    end: tokens.station("end station")?,
                }
            }
            other => return Err(CommandError::UnknownAction(other.to_string())),
        };

        tokens.finish()?;
        Ok(Some(command))
    }

    /// The protocol keyword for this command.
    pub fn action(&self) -> &'static str {
        match self {
            Command::AddStation { .. } => Self::ADD_STATION,
            Command::RemoveStation { .. } => Self::REMOVE_STATION,
            Command::AddCar { .. } => Self::ADD_CAR,
            Command::RemoveCar { .. } => Self::REMOVE_CAR,
            Command::PlanRoute { .. } => Self::PLAN_ROUTE,
        }
    }
}

struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
    action: &'static str,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.inner.next().ok_or(CommandError::MissingArgument {
            action: self.action,
            argument,
        })
    }

    fn station(&mut self, argument: &'static str) -> Result<StationId, CommandError> {
        let token = self.next(argument)?;
        token.parse().map_err(|_| CommandError::InvalidNumber {
            argument,
            value: token.to_string(),
        })
    }

    fn number(&mut self, argument: &'static str) -> Result<u32, CommandError> {
        let token = self.next(argument)?;
        parse_number(argument, token)
    }

    fn remaining_numbers(&mut self, argument: &'static str) -> Result<Vec<u32>, CommandError> {
        self.inner
            .by_ref()
            .map(|token| parse_number(argument, token))
            .collect()
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.inner.next() {
            Some(extra) => Err(CommandError::TrailingArgument {
                action: self.action,
                value: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Unsigned decimal only: no sign, no whitespace, no radix prefix.
fn parse_number(argument: &'static str, token: &str) -> Result<u32, CommandError> {
    let invalid = || CommandError::InvalidNumber {
        argument,
        value: token.to_string(),
    };
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(raw: u32) -> StationId {
        StationId::new(raw)
    }

    #[test]
    fn parse_each_action() {
        assert_eq!(
            Command::parse("aggiungi-stazione 10 3 5 9 2").unwrap(),
            Some(Command::AddStation {
                station: sid(10),
                ranges: vec![5, 9, 2],
            })
        );
        assert_eq!(
            Command::parse("demolisci-stazione 10").unwrap(),
            Some(Command::RemoveStation { station: sid(10) })
        );
        assert_eq!(
            Command::parse("aggiungi-auto 10 7").unwrap(),
            Some(Command::AddCar {
                station: sid(10),
                range: 7,
            })
        );
        assert_eq!(
            Command::parse("rottama-auto 10 7").unwrap(),
            Some(Command::RemoveCar {
                station: sid(10),
                range: 7,
            })
        );
        assert_eq!(
            Command::parse("pianifica-percorso 30 10").unwrap(),
            Some(Command::PlanRoute {
                start: sid(30),
                end: sid(10),
            })
        );
    }

    #[test]
    fn station_without_cars() {
        assert_eq!(
            Command::parse("aggiungi-stazione 4 0").unwrap(),
            Some(Command::AddStation {
                station: sid(4),
                ranges: vec![],
            })
        );
    }

    #[test]
    fn listed_ranges_win_over_declared_count() {
        let command = Command::parse("aggiungi-stazione 4 1 10 20").unwrap().unwrap();
        assert_eq!(
            command,
            Command::AddStation {
                station: sid(4),
                ranges: vec![10, 20],
            }
        );

        let command = Command::parse("aggiungi-stazione 4 5 10").unwrap().unwrap();
        assert_eq!(
            command,
            Command::AddStation {
                station: sid(4),
                ranges: vec![10],
            }
        );
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(
            Command::parse("  \tdemolisci-stazione    8 \r").unwrap(),
            Some(Command::RemoveStation { station: sid(8) })
        );
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse(" \t ").unwrap(), None);
    }

    #[test]
    fn unknown_action() {
        let err = Command::parse("aggiungi-treno 1").unwrap_err();
        assert!(matches!(err, CommandError::UnknownAction(ref a) if a == "aggiungi-treno"));
        assert_eq!(err.to_string(), "unknown action \"aggiungi-treno\"");
    }

    #[test]
    fn missing_argument() {
        let err = Command::parse("pianifica-percorso 3").unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingArgument {
                action: "pianifica-percorso",
                argument: "end station",
            }
        ));
        assert_eq!(err.to_string(), "pianifica-percorso: missing end station");

        let err = Command::parse("aggiungi-stazione 3").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { argument: "car count", .. }));
    }

    #[test]
    fn invalid_numbers() {
        for line in [
            "aggiungi-auto -1 5",
            "aggiungi-auto 1 +5",
            "aggiungi-auto 1 x",
            "aggiungi-auto 4294967296 5",
            "aggiungi-stazione 1 2 3 abc",
        ] {
            let err = Command::parse(line).unwrap_err();
            assert!(matches!(err, CommandError::InvalidNumber { .. }), "{line}");
        }

        let err = Command::parse("rottama-auto 1 1e3").unwrap_err();
        assert_eq!(err.to_string(), "invalid car range \"1e3\"");
    }

    #[test]
    fn trailing_argument() {
        let err = Command::parse("demolisci-stazione 1 2").unwrap_err();
        assert!(matches!(
            err,
            CommandError::TrailingArgument {
                action: "demolisci-stazione",
                ref value,
            } if value == "2"
        ));
    }

    #[test]
    fn action_names() {
        let command = Command::parse("rottama-auto 1 2").unwrap().unwrap();
        assert_eq!(command.action(), "rottama-auto");
    }
}
