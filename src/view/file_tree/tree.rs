use super::entry::{list_entries, Entry};
use super::events::{EventSubscribers, EventTarget, FileTreeEvent, Interaction};
use super::filter::NameFilter;
use super::node::{LoadState, NodeId, TreeNode};
use super::sort::{compare_keys, compute_sort_key, SortColumn, SortKey, SortOrder};
use crate::services::fs::FsBackend;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

/// Directory tree with lazy loading support
///
/// Opening a path lists only its immediate children as top-level nodes.
/// Directories are read when explicitly expanded via `expand_node()`, at
/// most once per node. The model owns node data; expansion and selection
/// state belong to the host view.
pub struct DirectoryTreeModel {
    /// Currently opened root directory
    root_path: PathBuf,
    /// All nodes indexed by ID
    nodes: HashMap<NodeId, TreeNode>,
    /// Path to node ID mapping for quick lookups
    path_to_node: HashMap<PathBuf, NodeId>,
    top_level: Vec<NodeId>,
    next_id: usize,
    filter: NameFilter,
    sort_column: SortColumn,
    sort_order: SortOrder,
    sorting_enabled: bool,
    backend: Arc<dyn FsBackend>,
    subscribers: EventSubscribers,
}

impl fmt::Debug for DirectoryTreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryTreeModel")
            .field("root_path", &self.root_path)
            .field("nodes", &self.nodes.len())
            .field("filter", &self.filter)
            .field("sort_column", &self.sort_column)
            .field("sort_order", &self.sort_order)
            .field("sorting_enabled", &self.sorting_enabled)
            .field("backend", &"<dyn FsBackend>")
            .finish()
    }
}

impl DirectoryTreeModel {
    /// Create a model and open `root_path`
    ///
    /// A missing root leaves the tree empty; `root_path()` still reports the
    /// requested path.
    pub fn new(root_path: impl Into<PathBuf>, backend: Arc<dyn FsBackend>) -> Self {
        let root_path = root_path.into();
        let mut model = Self {
            root_path: root_path.clone(),
            nodes: HashMap::new(),
            path_to_node: HashMap::new(),
            top_level: Vec::new(),
            next_id: 0,
            filter: NameFilter::default(),
            sort_column: SortColumn::default(),
            sort_order: SortOrder::default(),
            sorting_enabled: true,
            backend,
            subscribers: EventSubscribers::new(),
        };
        model.open_path(&root_path);
        model
    }

    /// The directory currently opened as the top level
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Replace the whole tree with the top level of `path`
    ///
    /// Does nothing if `path` doesn't exist.
    pub fn open_path(&mut self, path: &Path) {
        if !self.backend.exists(path) {
            tracing::debug!("Not opening missing path {:?}", path);
            return;
        }
        self.root_path = path.to_path_buf();

        // Sort once after the bulk insert rather than per node
        let was_sorting = self.sorting_enabled;
        self.sorting_enabled = false;

        self.clear();
        let entries = list_entries(self.backend.as_ref(), &absolute_path(path));
        tracing::debug!("Opened {:?} with {} entries", path, entries.len());
        for entry in entries {
            let id = self.add_node(entry, None);
            self.top_level.push(id);
        }
        let pattern = self.filter.pattern().to_string();
        self.set_filter(&pattern);

        self.sorting_enabled = was_sorting;
        self.sort_items(self.sort_column, self.sort_order);
    }

    /// Remove every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.path_to_node.clear();
        self.top_level.clear();
    }

    /// Load the children of a node, once
    ///
    /// Later calls on the same node are no-ops, so repeated expand/collapse
    /// cycles never re-list. Unknown IDs are ignored.
    pub fn expand_node(&mut self, id: NodeId) {
        let path = match self.nodes.get(&id) {
            Some(node) if !node.children_loaded() => node.entry.path.clone(),
            _ => return,
        };

        let entries = list_entries(self.backend.as_ref(), &path);
        tracing::debug!("Expanded {} ({:?}) with {} entries", id, path, entries.len());
        let child_ids: Vec<NodeId> = entries
            .into_iter()
            .map(|entry| self.add_node(entry, Some(id)))
            .collect();

        self.apply_filter(child_ids.clone());
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = child_ids;
            node.load_state = LoadState::Loaded;
        }

        if self.sorting_enabled {
            self.sort_children(Some(id));
        }
    }

    /// Set the name filter and re-apply it to every node in the tree
    ///
    /// Non-matching nodes are flagged, never removed, so changing the
    /// filter again doesn't need a re-listing.
    pub fn set_filter(&mut self, pattern: &str) {
        self.filter = NameFilter::new(pattern);
        self.apply_filter(self.top_level.clone());
    }

    pub fn filter(&self) -> &str {
        self.filter.pattern()
    }

    fn apply_filter(&mut self, roots: Vec<NodeId>) {
        let mut stack = roots;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.matches_filter = self.filter.is_match(node.entry.raw_name());
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Sort key of a node for the given column and order
    pub fn compute_sort_key(
        &self,
        id: NodeId,
        column: SortColumn,
        order: SortOrder,
    ) -> Option<SortKey> {
        self.nodes
            .get(&id)
            .map(|node| compute_sort_key(&node.entry, column, order))
    }

    /// Record the sort column and order and re-sort every loaded level
    ///
    /// Only records the settings while sorting is disabled.
    pub fn sort_items(&mut self, column: SortColumn, order: SortOrder) {
        self.sort_column = column;
        self.sort_order = order;
        if !self.sorting_enabled {
            return;
        }

        self.sort_children(None);
        let loaded: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| node.children_loaded())
            .map(|node| node.id)
            .collect();
        for id in loaded {
            self.sort_children(Some(id));
        }
    }

    /// Sort the children of `parent`, or the top level for `None`
    fn sort_children(&mut self, parent: Option<NodeId>) {
        let (column, order) = (self.sort_column, self.sort_order);
        let ids = match parent {
            None => &self.top_level,
            Some(id) => match self.nodes.get(&id) {
                Some(node) => &node.children,
                None => return,
            },
        };

        let mut keyed: Vec<(SortKey, NodeId)> = ids
            .iter()
            .filter_map(|id| {
                self.nodes
                    .get(id)
                    .map(|node| (compute_sort_key(&node.entry, column, order), *id))
            })
            .collect();
        keyed.sort_by(|a, b| compare_keys(&a.0, &b.0, order));
        let sorted: Vec<NodeId> = keyed.into_iter().map(|(_, id)| id).collect();

        match parent {
            None => self.top_level = sorted,
            Some(id) => {
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.children = sorted;
                }
            }
        }
    }

    pub fn set_sorting_enabled(&mut self, enabled: bool) {
        self.sorting_enabled = enabled;
    }

    pub fn sorting_enabled(&self) -> bool {
        self.sorting_enabled
    }

    pub fn sort_column(&self) -> SortColumn {
        self.sort_column
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&mut self) -> mpsc::Receiver<FileTreeEvent> {
        self.subscribers.subscribe()
    }

    pub fn on_node_clicked(&mut self, id: NodeId) -> Option<FileTreeEvent> {
        self.dispatch(id, Interaction::Click)
    }

    pub fn on_node_double_clicked(&mut self, id: NodeId) -> Option<FileTreeEvent> {
        self.dispatch(id, Interaction::DoubleClick)
    }

    pub fn on_node_activated(&mut self, id: NodeId) -> Option<FileTreeEvent> {
        self.dispatch(id, Interaction::Activate)
    }

    /// Split an interaction into its file or folder event
    ///
    /// The path is checked again at dispatch time; if it no longer resolves
    /// to a directory or a file nothing is emitted.
    fn dispatch(&mut self, id: NodeId, interaction: Interaction) -> Option<FileTreeEvent> {
        let node = self.nodes.get(&id)?;
        let target = EventTarget {
            node: id,
            path: node.entry.path.clone(),
        };

        let event = if self.backend.is_dir(&target.path) {
            interaction.folder_event(target)
        } else if self.backend.is_file(&target.path) {
            interaction.file_event(target)
        } else {
            tracing::debug!("Dropping {:?} on vanished path {:?}", interaction, target.path);
            return None;
        };

        self.subscribers.emit(event.clone());
        Some(event)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn get_node_by_path(&self, path: &Path) -> Option<&TreeNode> {
        self.path_to_node
            .get(path)
            .and_then(|id| self.get_node(*id))
    }

    /// Top-level node IDs in display order
    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// Child IDs of a node in display order (empty until expanded)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Find a direct child of `parent` (or a top-level node) by raw name
    pub fn find_child(&self, parent: Option<NodeId>, name: &str) -> Option<NodeId> {
        let ids = match parent {
            None => self.top_level(),
            Some(id) => self.children(id),
        };
        ids.iter().copied().find(|id| {
            self.nodes
                .get(id)
                .is_some_and(|node| node.entry.raw_name() == name)
        })
    }

    /// Get number of nodes currently in memory
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn add_node(&mut self, entry: Entry, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.path_to_node.insert(entry.path.clone(), id);
        self.nodes.insert(id, TreeNode::new(id, entry, parent));
        id
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
