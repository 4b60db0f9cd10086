//! Error types for schedule construction.

use thiserror::Error;

/// Errors returned by [`crate::compute_schedule`] and the individual passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    #[error("Duplicate task: {name}")]
    DuplicateTask { name: String },
    #[error("Task {task} depends on unknown task {dependency}")]
    UnresolvedDependency { task: String, dependency: String },
    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<String> },
    #[error("Finish time of task {task} overflows")]
    DurationOverflow { task: String },
    #[error("Too many tasks: {count} given, at most {limit} supported")]
    TooManyTasks { count: usize, limit: usize },
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

/// Internal defects detected while computing timings.
///
/// None of these can be triggered by input shape; they indicate a broken
/// traversal order or arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("task {task} visited before predecessor {predecessor}")]
    UnresolvedPredecessor { task: String, predecessor: String },
    #[error("task {task} visited before successor {successor}")]
    UnresolvedSuccessor { task: String, successor: String },
    #[error("task {task} has start slack {start_slack} but finish slack {finish_slack}")]
    SlackMismatch {
        task: String,
        start_slack: i128,
        finish_slack: i128,
    },
    #[error("task {task} was never visited")]
    UnvisitedNode { task: String },
    #[error("task {task} has late start before early start")]
    NegativeSlack { task: String },
}

/// Render a cycle as `a -> b -> a`.
fn format_cycle(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => {
            let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
            parts.push(first);
            parts.join(" -> ")
        }
        None => String::new(),
    }
}
