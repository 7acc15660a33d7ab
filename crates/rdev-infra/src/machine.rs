//! Stop/continue logic for the rebuild polling loop.
//!
//! The machine only counts observations; sleeping and provider calls live in
//! [`crate::rebuild`]. Two independent bounds end the loop: the number of
//! failed reserved-IP assignments, and the total number of poll cycles.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait after the create request before the first poll.
    pub initial_delay: Duration,
    /// Wait before every poll.
    pub poll_interval: Duration,
    /// Extra wait after a failed assignment.
    pub retry_delay: Duration,
    pub max_assign_attempts: u32,
    pub max_polls: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            poll_interval: Duration::from_secs(3),
            retry_delay: Duration::from_secs(5),
            max_assign_attempts: 3,
            max_polls: 120 / 3,
        }
    }
}

/// What one poll cycle saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The droplet's `create` action has not completed (or the droplet is not
    /// listed yet). No assignment was attempted.
    ActionPending,
    AssignSucceeded,
    /// The assignment failed with a "not ready yet" provider error.
    AssignNotReady,
}

/// Why the loop stopped without assigning the reserved IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUp {
    AssignAttemptsExhausted { attempts: u32 },
    TimedOut { polls: u32 },
}

impl fmt::Display for GiveUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssignAttemptsExhausted { attempts } => {
                write!(f, "reserved ip still not assignable after {attempts} attempts")
            }
            Self::TimedOut { polls } => {
                write!(f, "create action did not complete within {polls} polls")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildState {
    Polling,
    /// `attempt` failed assignments so far.
    AssignRetry { attempt: u32 },
    /// `attempts` counts every assignment call, the successful one included.
    Done { attempts: u32 },
    Failed(GiveUp),
}

impl RebuildState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct RebuildMachine {
    policy: RetryPolicy,
    state: RebuildState,
    polls: u32,
    failed_assignments: u32,
}

impl RebuildMachine {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: RebuildState::Polling,
            polls: 0,
            failed_assignments: 0,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn state(&self) -> RebuildState {
        self.state
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn failed_assignments(&self) -> u32 {
        self.failed_assignments
    }

    /// Record one poll cycle. Observations after a terminal state are ignored.
    pub fn observe(&mut self, observation: Observation) -> RebuildState {
        if self.state.is_terminal() {
            return self.state;
        }

        self.polls += 1;
        self.state = match observation {
            Observation::ActionPending => RebuildState::Polling,
            Observation::AssignSucceeded => RebuildState::Done {
                attempts: self.failed_assignments + 1,
            },
            Observation::AssignNotReady => {
                self.failed_assignments += 1;
                if self.failed_assignments >= self.policy.max_assign_attempts {
                    RebuildState::Failed(GiveUp::AssignAttemptsExhausted {
                        attempts: self.failed_assignments,
                    })
                } else {
                    RebuildState::AssignRetry {
                        attempt: self.failed_assignments,
                    }
                }
            }
        };

        if !self.state.is_terminal() && self.polls >= self.policy.max_polls {
            self.state = RebuildState::Failed(GiveUp::TimedOut { polls: self.polls });
        }

        self.state
    }

    /// Delay before the next poll, or `None` once the loop is over.
    pub fn next_delay(&self) -> Option<Duration> {
        match self.state {
            RebuildState::Polling => Some(self.policy.poll_interval),
            RebuildState::AssignRetry { .. } => {
                Some(self.policy.retry_delay + self.policy.poll_interval)
            }
            RebuildState::Done { .. } | RebuildState::Failed(_) => None,
        }
    }
}
