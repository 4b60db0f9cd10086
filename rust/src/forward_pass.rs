//! Forward pass: earliest start and finish times.

use tracing::{debug, trace};

use crate::error::{CpmError, InvariantViolation};
use crate::graph::DependencyGraph;
use crate::interner::NodeId;

/// Earliest times for one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EarlyTimes {
    pub start: u64,
    pub finish: u64,
}

/// Result from the forward pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForwardPassResult {
    /// Earliest times indexed by node id.
    pub early: Vec<EarlyTimes>,
    /// max(EF) over all nodes, 0 for an empty graph.
    pub project_finish: u64,
}

/// Compute ES/EF for every node.
///
/// Nodes are visited in topological order, so each node is evaluated exactly
/// once and its predecessors' finish times are already known:
/// `ES = max(EF of predecessors)` (0 for roots), `EF = ES + duration`.
pub fn forward_pass(graph: &DependencyGraph) -> Result<ForwardPassResult, CpmError> {
    let mut resolved: Vec<Option<EarlyTimes>> = vec![None; graph.len()];
    let mut project_finish: u64 = 0;

    for &id in graph.topological_order() {
        let mut start: u64 = 0;
        for &p in graph.predecessors_of(id) {
            let Some(pred) = resolved[p as usize] else {
                return Err(InvariantViolation::UnresolvedPredecessor {
                    task: graph.name(id).to_string(),
                    predecessor: graph.name(p).to_string(),
                }
                .into());
            };
            start = start.max(pred.finish);
        }

        let Some(finish) = start.checked_add(graph.duration(id)) else {
            return Err(CpmError::DurationOverflow {
                task: graph.name(id).to_string(),
            });
        };
        trace!(task = graph.name(id), es = start, ef = finish, "forward");

        resolved[id as usize] = Some(EarlyTimes { start, finish });
        project_finish = project_finish.max(finish);
    }

    let early = collect_resolved(graph, resolved)?;
    debug!(project_finish, "forward pass complete");
    Ok(ForwardPassResult {
        early,
        project_finish,
    })
}

/// Unwrap per-node results, failing if the traversal skipped a node.
pub(crate) fn collect_resolved<T>(
    graph: &DependencyGraph,
    resolved: Vec<Option<T>>,
) -> Result<Vec<T>, CpmError> {
    resolved
        .into_iter()
        .enumerate()
        .map(|(id, value)| {
            value.ok_or_else(|| {
                CpmError::from(InvariantViolation::UnvisitedNode {
                    task: graph.name(id as NodeId).to_string(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskRecord;

    fn make_task(name: &str, duration: u64, deps: &[&str]) -> TaskRecord {
        TaskRecord::new(name, duration, deps.iter().copied())
    }

    fn early_of(graph: &DependencyGraph, result: &ForwardPassResult, name: &str) -> (u64, u64) {
        let t = result.early[graph.id_of(name).unwrap() as usize];
        (t.start, t.finish)
    }

    #[test]
    fn test_single_task() {
        let graph = DependencyGraph::build(&[make_task("a", 4, &[])]).unwrap();
        let result = forward_pass(&graph).unwrap();
        assert_eq!(early_of(&graph, &result, "a"), (0, 4));
        assert_eq!(result.project_finish, 4);
    }

    #[test]
    fn test_diamond_takes_longest_branch() {
        let tasks = vec![
            make_task("a", 2, &[]),
            make_task("b", 3, &["a"]),
            make_task("c", 2, &["a"]),
            make_task("d", 5, &["b", "c"]),
        ];
        let graph = DependencyGraph::build(&tasks).unwrap();
        let result = forward_pass(&graph).unwrap();

        assert_eq!(early_of(&graph, &result, "a"), (0, 2));
        assert_eq!(early_of(&graph, &result, "b"), (2, 5));
        assert_eq!(early_of(&graph, &result, "c"), (2, 4));
        assert_eq!(early_of(&graph, &result, "d"), (5, 10));
        assert_eq!(result.project_finish, 10);
    }

    #[test]
    fn test_project_finish_spans_disconnected_chains() {
        let tasks = vec![
            make_task("short", 3, &[]),
            make_task("long1", 4, &[]),
            make_task("long2", 4, &["long1"]),
        ];
        let graph = DependencyGraph::build(&tasks).unwrap();
        let result = forward_pass(&graph).unwrap();
        assert_eq!(result.project_finish, 8);
    }

    #[test]
    fn test_zero_duration_task() {
        let tasks = vec![make_task("m", 0, &[]), make_task("b", 3, &["m"])];
        let graph = DependencyGraph::build(&tasks).unwrap();
        let result = forward_pass(&graph).unwrap();
        assert_eq!(early_of(&graph, &result, "m"), (0, 0));
        assert_eq!(early_of(&graph, &result, "b"), (0, 3));
    }

    #[test]
    fn test_wide_diamond_ladder() {
        // 40 stacked diamonds: exponential path count, linear work
        let mut tasks = vec![make_task("j0", 1, &[])];
        for i in 0..40 {
            let join = format!("j{i}");
            let left = format!("l{i}");
            let right = format!("r{i}");
            tasks.push(make_task(&left, 1, &[join.as_str()]));
            tasks.push(make_task(&right, 2, &[join.as_str()]));
            tasks.push(make_task(
                &format!("j{}", i + 1),
                1,
                &[left.as_str(), right.as_str()],
            ));
        }
        let graph = DependencyGraph::build(&tasks).unwrap();
        let result = forward_pass(&graph).unwrap();
        // Each stage adds max(1, 2) + 1
        assert_eq!(result.project_finish, 1 + 40 * 3);
    }

    #[test]
    fn test_overflow_is_reported() {
        let tasks = vec![make_task("a", u64::MAX, &[]), make_task("b", 1, &["a"])];
        let graph = DependencyGraph::build(&tasks).unwrap();
        assert_eq!(
            forward_pass(&graph),
            Err(CpmError::DurationOverflow {
                task: "b".to_string()
            })
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::build(&[]).unwrap();
        let result = forward_pass(&graph).unwrap();
        assert!(result.early.is_empty());
        assert_eq!(result.project_finish, 0);
    }
}
