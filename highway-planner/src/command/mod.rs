//! Line-oriented command protocol.
//!
//! Each input line is one command; each command produces exactly one output
//! line. Recoverable outcomes (a duplicate station, no route) are ordinary
//! responses. Malformed input and fatal highway errors end the session with a
//! [`CommandError`], whose [`exit_code`](CommandError::exit_code) is the
//! process status the binary reports.

mod parse;
mod response;
mod session;

pub use parse::Command;
pub use response::Response;
pub use session::{Session, SessionSummary};

use crate::highway::HighwayError;
use crate::planner::PlanError;

/// Errors that end a command session.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The first word of a line is not a known action
    #[error("unknown action {0:?}")]
    UnknownAction(String),

    /// A line ended before all required arguments were given
    #[error("{action}: missing {argument}")]
    MissingArgument {
        action: &'static str,
        argument: &'static str,
    },

    /// An argument is not an unsigned 32-bit decimal number
    #[error("invalid {argument} {value:?}")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },

    /// A line has more arguments than its action takes
    #[error("{action}: unexpected argument {value:?}")]
    TrailingArgument { action: &'static str, value: String },

    /// Reading commands or writing responses failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A highway operation failed
    #[error(transparent)]
    Highway(#[from] HighwayError),
}

impl CommandError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::UnknownAction(_)
            | CommandError::MissingArgument { .. }
            | CommandError::InvalidNumber { .. }
            | CommandError::TrailingArgument { .. } => 5,
            CommandError::Highway(HighwayError::CapacityExceeded { .. }) => 6,
            CommandError::Highway(HighwayError::Plan(PlanError::InvalidQuery { .. })) => 9,
            CommandError::Highway(HighwayError::Plan(PlanError::Timeout { .. }))
            | CommandError::Io(_) => 1,
        }
    }
}
