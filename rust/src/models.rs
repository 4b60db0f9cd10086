//! Core data types for the scheduling engine.

use std::fmt;

/// One task as read from the input: name, duration and the names it depends on.
///
/// The dependency list is kept exactly as given (duplicates and order included)
/// so error messages can refer back to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskRecord {
    pub name: String,
    pub duration: u64,
    pub dependencies: Vec<String>,
}

impl TaskRecord {
    pub fn new<N, I, D>(name: N, duration: u64, dependencies: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            duration,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TaskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task: {}, Duration: {}, Dependencies: {}",
            self.name,
            self.duration,
            self.dependencies.join("; ")
        )
    }
}

/// Computed timing for a single task.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScheduledTask {
    pub name: String,
    pub duration: u64,
    /// Earliest start (forward pass).
    pub early_start: u64,
    /// Earliest finish (forward pass).
    pub early_finish: u64,
    /// Latest start (backward pass).
    pub late_start: u64,
    /// Latest finish (backward pass).
    pub late_finish: u64,
    /// Slack = late_start - early_start = late_finish - early_finish.
    pub slack: u64,
    pub critical: bool,
}

impl ScheduledTask {
    /// Whether the task is running during time unit `t`, i.e. `ES <= t < EF`.
    pub fn is_active_at(&self, t: u64) -> bool {
        self.early_start <= t && t < self.early_finish
    }
}
