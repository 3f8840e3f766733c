//! Drives a highway from a stream of commands.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use super::{Command, CommandError, Response};
use crate::highway::Highway;

/// Counts for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines read, blank ones included.
    pub lines: usize,
    /// Commands executed.
    pub commands: usize,
}

/// A command session over a highway, writing one response line per command.
///
/// # Examples
///
/// ```
/// use highway_planner::command::Session;
/// use highway_planner::highway::Highway;
///
/// let input = "aggiungi-stazione 10 1 25\naggiungi-stazione 30 0\npianifica-percorso 10 30\n";
/// let mut session = Session::new(Highway::default(), Vec::new());
/// session.run(input.as_bytes()).unwrap();
///
/// let output = String::from_utf8(session.into_output()).unwrap();
/// assert_eq!(output, "aggiunta\naggiunta\n10 30\n");
/// ```
pub struct Session<W> {
    highway: Highway,
    output: W,
    summary: SessionSummary,
}

impl<W: Write> Session<W> {
    /// Create a session writing responses to `output`.
    pub fn new(highway: Highway, output: W) -> Self {
        Self {
            highway,
            output,
            summary: SessionSummary::default(),
        }
    }

    /// The highway as the commands so far have left it.
    pub fn highway(&self) -> &Highway {
        &self.highway
    }

    /// Number of the last line read, counting from 1.
    pub fn line(&self) -> usize {
        self.summary.lines
    }

    /// Consume the session, returning the response writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Apply a single command to the highway.
    pub fn execute(&mut self, command: Command) -> Result<Response, CommandError> {
        let highway = &mut self.highway;
        let response = match command {
            Command::AddStation { station, ranges } => {
                Response::added(highway.add_station(station, &ranges)?)
            }
            Command::RemoveStation { station } => {
                Response::demolished(highway.remove_station(station))
            }
            Command::AddCar { station, range } => Response::added(highway.add_car(station, range)?),
            Command::RemoveCar { station, range } => {
                Response::scrapped(highway.remove_car(station, range))
            }
            Command::PlanRoute { start, end } => highway.plan_route(start, end)?.into(),
        };
        self.summary.commands += 1;
        Ok(response)
    }

    /// Run every command in `input` until it ends or a command fails.
    ///
    /// Responses already produced are flushed to the output whether or not
    /// the session ends in an error.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SessionSummary, CommandError> {
        let result = self.run_lines(input);
        let flushed = self.output.flush();
        result?;
        flushed?;

        info!(
            lines = self.summary.lines,
            commands = self.summary.commands,
            stations = self.highway.len(),
            "session complete"
        );
        Ok(self.summary)
    }

    fn run_lines<R: BufRead>(&mut self, input: R) -> Result<(), CommandError> {
        for line in input.lines() {
            let line = line?;
            self.summary.lines += 1;

            let Some(command) = Command::parse(&line)? else {
                continue;
            };
            debug!(line = self.summary.lines, action = command.action(), "command");
            let response = self.execute(command)?;
            writeln!(self.output, "{response}")?;
        }
        Ok(())
    }
}
