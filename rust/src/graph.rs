//! Task dependency graph: construction and structural validation.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Predecessor lists are resolved
//! from each record's dependency names; successor lists are always derived as
//! their transpose and never edited independently.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::CpmError;
use crate::interner::{InsertError, NameTable, NodeId, MAX_NAMES};
use crate::models::TaskRecord;

/// DFS marking state used by cycle detection.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Validated task dependency DAG.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    names: NameTable,
    records: Vec<TaskRecord>,
    predecessors: Vec<Vec<NodeId>>,
    successors: Vec<Vec<NodeId>>,
    topo_order: Vec<NodeId>,
}

impl DependencyGraph {
    /// Build and validate the graph.
    ///
    /// # Errors
    /// * `DuplicateTask` if two records share a name
    /// * `UnresolvedDependency` if a dependency names no record
    /// * `CyclicDependency` if the dependency relation has a cycle
    /// * `TooManyTasks` if there are more records than a [`NodeId`] can address
    pub fn build(records: &[TaskRecord]) -> Result<Self, CpmError> {
        let mut graph = Self::construct(records)?;
        graph.validate_acyclic()?;
        graph.topo_order = graph.kahn_order()?;
        debug!(
            nodes = graph.len(),
            roots = graph.roots().count(),
            leaves = graph.leaves().count(),
            "dependency graph built"
        );
        Ok(graph)
    }

    /// Resolve names and adjacency without checking for cycles.
    fn construct(records: &[TaskRecord]) -> Result<Self, CpmError> {
        let mut names = NameTable::with_capacity(records.len());
        for record in records {
            match names.insert_unique(&record.name) {
                Ok(_) => {}
                Err(InsertError::Duplicate) => {
                    return Err(CpmError::DuplicateTask {
                        name: record.name.clone(),
                    });
                }
                Err(InsertError::Full) => {
                    return Err(CpmError::TooManyTasks {
                        count: records.len(),
                        limit: MAX_NAMES,
                    });
                }
            }
        }

        let mut predecessors: Vec<Vec<NodeId>> = Vec::with_capacity(records.len());
        for record in records {
            let mut preds: Vec<NodeId> = Vec::with_capacity(record.dependencies.len());
            for dep in &record.dependencies {
                let Some(dep_id) = names.get(dep) else {
                    return Err(CpmError::UnresolvedDependency {
                        task: record.name.clone(),
                        dependency: dep.clone(),
                    });
                };
                // A dependency listed twice is still a single edge
                if !preds.contains(&dep_id) {
                    preds.push(dep_id);
                }
            }
            predecessors.push(preds);
        }

        let mut successors: Vec<Vec<NodeId>> = vec![Vec::new(); records.len()];
        for (id, preds) in predecessors.iter().enumerate() {
            for &p in preds {
                successors[p as usize].push(id as NodeId);
            }
        }

        Ok(Self {
            names,
            records: records.to_vec(),
            predecessors,
            successors,
            topo_order: Vec::new(),
        })
    }

    /// Check that the predecessor relation is acyclic.
    ///
    /// Iterative depth-first search over predecessor edges with a visiting mark
    /// for the current path and a done mark shared across start nodes. Reaching
    /// a node still on the path closes a cycle; its members are reported in
    /// dependency order starting from the node where the search entered it.
    pub fn validate_acyclic(&self) -> Result<(), CpmError> {
        let n = self.len();
        let mut marks = vec![Mark::Unvisited; n];
        let mut stack: Vec<(NodeId, usize)> = Vec::new();

        for start in 0..n {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::Visiting;
            stack.push((start as NodeId, 0));

            while let Some(&(node, next)) = stack.last() {
                let Some(&pred) = self.predecessors[node as usize].get(next) else {
                    marks[node as usize] = Mark::Done;
                    stack.pop();
                    continue;
                };
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }

                match marks[pred as usize] {
                    Mark::Done => {}
                    Mark::Unvisited => {
                        marks[pred as usize] = Mark::Visiting;
                        stack.push((pred, 0));
                    }
                    Mark::Visiting => {
                        let pos = stack.iter().position(|&(id, _)| id == pred).unwrap_or(0);
                        let cycle = stack[pos..]
                            .iter()
                            .map(|&(id, _)| self.name(id).to_string())
                            .collect();
                        return Err(CpmError::CyclicDependency { cycle });
                    }
                }
            }
        }

        Ok(())
    }

    /// Topological order via Kahn's algorithm, queue seeded in input order.
    fn kahn_order(&self) -> Result<Vec<NodeId>, CpmError> {
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<NodeId> = (0..self.len() as NodeId)
            .filter(|&id| in_degree[id as usize] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &s in &self.successors[id as usize] {
                let degree = &mut in_degree[s as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(s);
                }
            }
        }

        if order.len() != self.len() {
            // Only reachable if validate_acyclic was skipped
            let cycle = (0..self.len())
                .filter(|&id| in_degree[id] > 0)
                .map(|id| self.records[id].name.clone())
                .collect();
            return Err(CpmError::CyclicDependency { cycle });
        }
        Ok(order)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All node ids in input order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.len() as NodeId
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.names.get(name)
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.names.resolve(id).unwrap_or_default()
    }

    pub fn duration(&self, id: NodeId) -> u64 {
        self.records[id as usize].duration
    }

    pub fn record(&self, id: NodeId) -> &TaskRecord {
        &self.records[id as usize]
    }

    pub fn predecessors_of(&self, id: NodeId) -> &[NodeId] {
        &self.predecessors[id as usize]
    }

    pub fn successors_of(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id as usize]
    }

    /// Nodes with no predecessors.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids()
            .filter(|&id| self.predecessors[id as usize].is_empty())
    }

    /// Nodes with no successors.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids()
            .filter(|&id| self.successors[id as usize].is_empty())
    }

    /// Every node appears after all of its predecessors.
    pub fn topological_order(&self) -> &[NodeId] {
        &self.topo_order
    }
}
