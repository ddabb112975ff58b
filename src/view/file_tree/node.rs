use super::entry::Entry;
use std::fmt;

/// Unique identifier for a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Whether a node's children have been listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
}

/// Represents a node in the file tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub entry: Entry,
    /// Parent node ID (None for top-level nodes)
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub load_state: LoadState,
    /// Result of the last filter pass over this node's raw name
    pub matches_filter: bool,
}

impl TreeNode {
    pub fn new(id: NodeId, entry: Entry, parent: Option<NodeId>) -> Self {
        Self {
            id,
            entry,
            parent,
            children: Vec::new(),
            load_state: LoadState::Unloaded,
            matches_filter: true,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    pub fn children_loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    /// Hidden by the current filter
    ///
    /// Directories are never hidden so filtered subtrees stay reachable.
    pub fn is_hidden(&self) -> bool {
        !self.matches_filter && !self.is_dir()
    }
}
