//! Slack computation and critical-task classification.

use tracing::debug;

use crate::backward_pass::BackwardPassResult;
use crate::error::{CpmError, InvariantViolation};
use crate::forward_pass::ForwardPassResult;
use crate::graph::DependencyGraph;

/// Slack and critical flag per node, indexed by node id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlackResult {
    pub slack: Vec<u64>,
    pub critical: Vec<bool>,
}

impl SlackResult {
    pub fn critical_count(&self) -> usize {
        self.critical.iter().filter(|&&c| c).count()
    }
}

/// Derive `slack = LS - ES` and check it against `LF - EF`.
///
/// A mismatch or a negative value means one of the passes is broken; both
/// are reported as invariant violations rather than clamped.
pub fn classify(
    graph: &DependencyGraph,
    forward: &ForwardPassResult,
    backward: &BackwardPassResult,
) -> Result<SlackResult, CpmError> {
    let mut slack = Vec::with_capacity(graph.len());
    let mut critical = Vec::with_capacity(graph.len());

    for id in graph.node_ids() {
        let early = forward.early[id as usize];
        let late = backward.late[id as usize];

        let start_slack = late.start as i128 - early.start as i128;
        let finish_slack = late.finish as i128 - early.finish as i128;
        if start_slack != finish_slack {
            return Err(InvariantViolation::SlackMismatch {
                task: graph.name(id).to_string(),
                start_slack,
                finish_slack,
            }
            .into());
        }
        if start_slack < 0 {
            return Err(InvariantViolation::NegativeSlack {
                task: graph.name(id).to_string(),
            }
            .into());
        }

        slack.push(start_slack as u64);
        critical.push(start_slack == 0);
    }

    let result = SlackResult { slack, critical };
    debug!(critical = result.critical_count(), "slack classified");
    Ok(result)
}
