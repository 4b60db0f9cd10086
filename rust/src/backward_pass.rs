//! Backward pass: latest start and finish times.

use tracing::{debug, trace};

use crate::error::{CpmError, InvariantViolation};
use crate::forward_pass::collect_resolved;
use crate::graph::DependencyGraph;

/// Latest times for one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LateTimes {
    pub start: u64,
    pub finish: u64,
}

/// Result from the backward pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackwardPassResult {
    /// Latest times indexed by node id.
    pub late: Vec<LateTimes>,
}

/// Compute LS/LF for every node, seeded by the forward pass's project finish.
///
/// Nodes are visited in reverse topological order so every successor is
/// resolved first: `LF = min(LS of successors)` (the project finish for
/// leaves), `LS = LF - duration`.
pub fn backward_pass(
    graph: &DependencyGraph,
    project_finish: u64,
) -> Result<BackwardPassResult, CpmError> {
    let mut resolved: Vec<Option<LateTimes>> = vec![None; graph.len()];

    for &id in graph.topological_order().iter().rev() {
        let mut finish = project_finish;
        for &s in graph.successors_of(id) {
            let Some(succ) = resolved[s as usize] else {
                return Err(InvariantViolation::UnresolvedSuccessor {
                    task: graph.name(id).to_string(),
                    successor: graph.name(s).to_string(),
                }
                .into());
            };
            finish = finish.min(succ.start);
        }

        // LF >= EF >= duration whenever the forward pass produced project_finish
        let start = finish.checked_sub(graph.duration(id)).ok_or_else(|| {
            InvariantViolation::NegativeSlack {
                task: graph.name(id).to_string(),
            }
        })?;
        trace!(task = graph.name(id), ls = start, lf = finish, "backward");

        resolved[id as usize] = Some(LateTimes { start, finish });
    }

    let late = collect_resolved(graph, resolved)?;
    debug!(project_finish, "backward pass complete");
    Ok(BackwardPassResult { late })
}
