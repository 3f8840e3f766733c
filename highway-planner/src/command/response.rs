//! Responses written back for each command.

use std::fmt;

use crate::highway::{AddOutcome, RemoveOutcome};
use crate::planner::{Route, RouteOutcome};

/// The output line for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A station or car was added.
    Added,
    /// A station or car was not added.
    NotAdded,
    /// A station was demolished.
    Demolished,
    /// There was no station to demolish.
    NotDemolished,
    /// A car was scrapped.
    Scrapped,
    /// There was no matching car to scrap.
    NotScrapped,
    /// The stations of a minimum-hop route.
    Route(Route),
    /// The destination is unreachable.
    NoRoute,
}

impl Response {
    pub(super) fn added(outcome: AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added => Response::Added,
            AddOutcome::Rejected => Response::NotAdded,
        }
    }

    pub(super) fn demolished(outcome: RemoveOutcome) -> Self {
        match outcome {
            RemoveOutcome::Removed => Response::Demolished,
            RemoveOutcome::NotFound => Response::NotDemolished,
        }
    }

    pub(super) fn scrapped(outcome: RemoveOutcome) -> Self {
        match outcome {
            RemoveOutcome::Removed => Response::Scrapped,
            RemoveOutcome::NotFound => Response::NotScrapped,
        }
    }
}

impl From<RouteOutcome> for Response {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Found(route) => Response::Route(route),
            RouteOutcome::NoRoute => Response::NoRoute,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Added => f.write_str("aggiunta"),
            Response::NotAdded => f.write_str("non aggiunta"),
            Response::Demolished => f.write_str("demolita"),
            Response::NotDemolished => f.write_str("non demolita"),
            Response::Scrapped => f.write_str("rottamata"),
            Response::NotScrapped => f.write_str("non rottamata"),
            Response::Route(route) => write!(f, "{route}"),
            Response::NoRoute => f.write_str("nessun percorso"),
        }
    }
}
