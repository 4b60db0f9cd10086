//! Task name interning.
//!
//! Maps task names to dense integer ids so the graph can keep its nodes and
//! adjacency in plain vectors indexed by id.

use rustc_hash::FxHashMap;

/// Dense node id (u32 for compact adjacency lists).
pub type NodeId = u32;

/// Most names a table holds, so every id and the table length fit in a `NodeId`.
pub const MAX_NAMES: usize = NodeId::MAX as usize;

/// Why a name was not inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Already present.
    Duplicate,
    /// The table already holds [`MAX_NAMES`] names.
    Full,
}

/// Bidirectional task name <-> id table. Ids are assigned in insertion order.
#[derive(Debug, Clone)]
pub struct NameTable {
    to_id: FxHashMap<String, NodeId>,
    from_id: Vec<String>,
}

impl NameTable {
    /// Create a new table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_id: Vec::with_capacity(capacity),
        }
    }

    /// Insert a name that must not already be present.
    ///
    /// Returns the new id, or why the name could not be added.
    pub fn insert_unique(&mut self, name: &str) -> Result<NodeId, InsertError> {
        if self.to_id.contains_key(name) {
            return Err(InsertError::Duplicate);
        }
        let id = id_for_index(self.from_id.len()).ok_or(InsertError::Full)?;
        self.from_id.push(name.to_string());
        self.to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Get the id for a name, if it exists.
    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.to_id.get(name).copied()
    }

    /// Get the name for an id.
    #[inline]
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.from_id.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_id.len()
    }
}

/// Id for the `index`-th inserted name, if it is below [`MAX_NAMES`].
#[inline]
fn id_for_index(index: usize) -> Option<NodeId> {
    NodeId::try_from(index).ok().filter(|&id| id < NodeId::MAX)
}

impl Default for NameTable {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
