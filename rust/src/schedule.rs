//! The schedule produced by a full CPM run.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backward_pass::{backward_pass, BackwardPassResult};
use crate::error::CpmError;
use crate::forward_pass::{forward_pass, ForwardPassResult};
use crate::graph::DependencyGraph;
use crate::interner::NodeId;
use crate::models::{ScheduledTask, TaskRecord};
use crate::slack::{classify, SlackResult};

/// Per-task timings plus the project finish time.
///
/// Tasks are kept in input order. The value is immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    tasks: Vec<ScheduledTask>,
    index: FxHashMap<String, usize>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
    project_finish: u64,
}

impl Schedule {
    fn from_parts(
        graph: &DependencyGraph,
        forward: &ForwardPassResult,
        backward: &BackwardPassResult,
        slack: &SlackResult,
    ) -> Self {
        let mut tasks = Vec::with_capacity(graph.len());
        let mut index = FxHashMap::with_capacity_and_hasher(graph.len(), Default::default());
        let mut predecessors = Vec::with_capacity(graph.len());
        let mut successors = Vec::with_capacity(graph.len());

        for id in graph.node_ids() {
            let i = id as usize;
            let early = forward.early[i];
            let late = backward.late[i];
            tasks.push(ScheduledTask {
                name: graph.name(id).to_string(),
                duration: graph.duration(id),
                early_start: early.start,
                early_finish: early.finish,
                late_start: late.start,
                late_finish: late.finish,
                slack: slack.slack[i],
                critical: slack.critical[i],
            });
            index.insert(graph.name(id).to_string(), i);
            predecessors.push(to_indices(graph.predecessors_of(id)));
            successors.push(to_indices(graph.successors_of(id)));
        }

        Self {
            tasks,
            index,
            predecessors,
            successors,
            project_finish: forward.project_finish,
        }
    }

    /// Overall project length: max(EF) over all tasks.
    pub fn project_finish(&self) -> u64 {
        self.project_finish
    }

    pub fn get(&self, name: &str) -> Option<&ScheduledTask> {
        self.index.get(name).map(|&i| &self.tasks[i])
    }

    /// Tasks in input order.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Sum of all task durations.
    pub fn total_work(&self) -> u64 {
        self.tasks
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.duration))
    }

    /// Names of all zero-slack tasks, in input order.
    pub fn critical_path(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.critical)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// One concrete chain of critical tasks from a root to a leaf.
    ///
    /// Consecutive tasks are linked by a dependency edge and satisfy
    /// `EF(prev) == ES(next)`, so the chain's durations sum to the project
    /// finish. Where several chains exist the first by input order wins.
    pub fn critical_chain(&self) -> Vec<&str> {
        // A task finishing at the project end is always critical
        let Some(end) = self
            .tasks
            .iter()
            .position(|t| t.critical && t.early_finish == self.project_finish)
        else {
            return Vec::new();
        };

        let mut chain = vec![end];
        let mut current = end;
        loop {
            let start = self.tasks[current].early_start;
            let prev = self.predecessors[current]
                .iter()
                .copied()
                .find(|&p| self.tasks[p].critical && self.tasks[p].early_finish == start);
            match prev {
                Some(p) => {
                    chain.push(p);
                    current = p;
                }
                None => break,
            }
        }
        chain.reverse();

        // Zero-duration critical successors may follow the end task
        let mut current = end;
        loop {
            let finish = self.tasks[current].early_finish;
            let next = self.successors[current]
                .iter()
                .copied()
                .find(|&s| self.tasks[s].critical && self.tasks[s].early_start == finish);
            match next {
                Some(s) => {
                    chain.push(s);
                    current = s;
                }
                None => break,
            }
        }

        chain
            .into_iter()
            .map(|i| self.tasks[i].name.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledTask;
    type IntoIter = std::slice::Iter<'a, ScheduledTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

fn to_indices(ids: &[NodeId]) -> Vec<usize> {
    ids.iter().map(|&id| id as usize).collect()
}

/// Run the full CPM pipeline on a static task set.
///
/// This algorithm:
/// 1. Builds and validates the dependency graph
/// 2. Computes ES/EF in a forward pass
/// 3. Computes LS/LF in a backward pass seeded by the project finish
/// 4. Derives slack and marks zero-slack tasks critical
///
/// # Errors
/// * `DuplicateTask`, `UnresolvedDependency`, `CyclicDependency` for bad input
/// * `DurationOverflow` if a finish time exceeds `u64`
/// * `InvariantViolation` for internal defects
pub fn compute_schedule(records: &[TaskRecord]) -> Result<Schedule, CpmError> {
    let graph = DependencyGraph::build(records)?;
    let forward = forward_pass(&graph)?;
    let backward = backward_pass(&graph, forward.project_finish)?;
    let slack = classify(&graph, &forward, &backward)?;

    let schedule = Schedule::from_parts(&graph, &forward, &backward, &slack);
    debug!(
        tasks = schedule.len(),
        project_finish = schedule.project_finish(),
        critical = slack.critical_count(),
        "schedule computed"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(name: &str, duration: u64, deps: &[&str]) -> TaskRecord {
        TaskRecord::new(name, duration, deps.iter().copied())
    }

    fn diamond() -> Vec<TaskRecord> {
        vec![
            make_task("a", 2, &[]),
            make_task("b", 3, &["a"]),
            make_task("c", 2, &["a"]),
            make_task("d", 5, &["b", "c"]),
        ]
    }

    fn timing(schedule: &Schedule, name: &str) -> (u64, u64, u64, u64, u64) {
        let t = schedule.get(name).unwrap();
        (
            t.early_start,
            t.early_finish,
            t.late_start,
            t.late_finish,
            t.slack,
        )
    }

    #[test]
    fn test_diamond_scenario() {
        let schedule = compute_schedule(&diamond()).unwrap();

        assert_eq!(timing(&schedule, "a"), (0, 2, 0, 2, 0));
        assert_eq!(timing(&schedule, "b"), (2, 5, 2, 5, 0));
        assert_eq!(timing(&schedule, "c"), (2, 4, 3, 5, 1));
        assert_eq!(timing(&schedule, "d"), (5, 10, 5, 10, 0));
        assert_eq!(schedule.project_finish(), 10);
        assert_eq!(schedule.critical_path(), ["a", "b", "d"]);
        assert_eq!(schedule.critical_chain(), ["a", "b", "d"]);
    }

    #[test]
    fn test_single_task_scenario() {
        let schedule = compute_schedule(&[make_task("a", 4, &[])]).unwrap();
        assert_eq!(timing(&schedule, "a"), (0, 4, 0, 4, 0));
        assert_eq!(schedule.project_finish(), 4);
        assert!(schedule.get("a").unwrap().critical);
    }

    #[test]
    fn test_tasks_keep_input_order() {
        let schedule = compute_schedule(&[
            make_task("d", 5, &["b", "c"]),
            make_task("c", 2, &["a"]),
            make_task("b", 3, &["a"]),
            make_task("a", 2, &[]),
        ])
        .unwrap();
        let names: Vec<&str> = schedule.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["d", "c", "b", "a"]);
        assert_eq!(schedule.critical_chain(), ["a", "b", "d"]);
    }

    #[test]
    fn test_running_twice_is_identical() {
        let first = compute_schedule(&diamond()).unwrap();
        let second = compute_schedule(&diamond()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let schedule = compute_schedule(&[]).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.project_finish(), 0);
        assert!(schedule.critical_chain().is_empty());
    }

    #[test]
    fn test_cycle_produces_no_schedule() {
        let result = compute_schedule(&[make_task("a", 1, &["b"]), make_task("b", 1, &["a"])]);
        assert!(matches!(result, Err(CpmError::CyclicDependency { .. })));
    }

    #[test]
    fn test_total_work() {
        let schedule = compute_schedule(&diamond()).unwrap();
        assert_eq!(schedule.total_work(), 12);
    }

    #[test]
    fn test_chain_through_zero_duration_tail() {
        let schedule = compute_schedule(&[
            make_task("build", 3, &[]),
            make_task("release", 0, &["build"]),
        ])
        .unwrap();
        assert_eq!(schedule.critical_chain(), ["build", "release"]);
        assert_eq!(schedule.critical_path(), ["build", "release"]);
    }

    #[test]
    fn test_parallel_equal_branches_are_both_critical() {
        let schedule = compute_schedule(&[
            make_task("a", 1, &[]),
            make_task("b", 4, &["a"]),
            make_task("c", 4, &["a"]),
            make_task("d", 1, &["b", "c"]),
        ])
        .unwrap();
        assert_eq!(schedule.critical_path(), ["a", "b", "c", "d"]);
        assert_eq!(schedule.critical_chain(), ["a", "b", "d"]);
    }
}
