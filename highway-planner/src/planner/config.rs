//! Route planner configuration.

use std::time::Duration;

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Give up on a query that has been scanning for longer than this.
    /// `None` means queries always run to completion.
    pub deadline: Option<Duration>,

    /// How many stations to scan between deadline checks.
    pub deadline_check_interval: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(deadline: Option<Duration>, deadline_check_interval: usize) -> Self {
        Self {
            deadline,
            deadline_check_interval,
        }
    }

    /// The deadline to check against after `scanned` stations, if a check
    /// is due then.
    pub fn deadline_due(&self, scanned: usize) -> Option<Duration> {
        self.deadline.filter(|_| {
            self.deadline_check_interval > 0 && scanned % self.deadline_check_interval == 0
        })
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            deadline: None,
            deadline_check_interval: 1024,
        }
    }
}
