use super::events::FileTreeEvent;
use super::node::NodeId;
use super::tree::DirectoryTreeModel;
use std::collections::HashSet;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column headers, in display order
pub const HEADER_LABELS: [&str; 4] = ["Name", "Size", "Type", "Date Modified"];

/// Default width of the Name column
pub const DEFAULT_NAME_COLUMN_WIDTH: usize = 40;

const COLUMN_SEPARATOR: &str = "│";

/// Headless host for a `DirectoryTreeModel`
///
/// Owns presentation state only: which folders are expanded, the selection
/// and the column widths. Node data always flows from the model into the
/// view; the view never edits nodes directly.
#[derive(Debug)]
pub struct FileTreeView {
    tree: DirectoryTreeModel,
    expanded: HashSet<NodeId>,
    selected_node: Option<NodeId>,
    column_widths: [usize; 4],
}

impl FileTreeView {
    pub fn new(tree: DirectoryTreeModel, name_column_width: usize) -> Self {
        let mut view = Self {
            tree,
            expanded: HashSet::new(),
            selected_node: None,
            column_widths: [name_column_width, 0, 0, 0],
        };
        view.select_first();
        for column in 1..HEADER_LABELS.len() {
            view.resize_column_to_contents(column);
        }
        view
    }

    pub fn tree(&self) -> &DirectoryTreeModel {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DirectoryTreeModel {
        &mut self.tree
    }

    /// Open a new root, dropping presentation state of discarded nodes
    pub fn open_path(&mut self, path: &Path) {
        self.tree.open_path(path);
        let tree = &self.tree;
        self.expanded.retain(|id| tree.get_node(*id).is_some());
        if self
            .selected_node
            .map_or(true, |id| tree.get_node(id).is_none())
        {
            self.selected_node = None;
            self.select_first();
        }
    }

    pub fn set_filter(&mut self, pattern: &str) {
        self.tree.set_filter(pattern);
    }

    /// Expand a folder, loading its children on first use
    ///
    /// Returns false for anything that isn't a folder.
    pub fn expand(&mut self, id: NodeId) -> bool {
        match self.tree.get_node(id) {
            Some(node) if node.is_dir() => {}
            _ => return false,
        }
        self.tree.expand_node(id);
        self.expanded.insert(id);
        true
    }

    /// Collapse a folder; its loaded children stay in the model
    pub fn collapse(&mut self, id: NodeId) {
        self.expanded.remove(&id);
    }

    pub fn toggle(&mut self, id: NodeId) {
        if self.is_expanded(id) {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Expand every folder down to `depth` levels below the top level
    pub fn expand_to_depth(&mut self, depth: usize) {
        let mut level: Vec<NodeId> = self.tree.top_level().to_vec();
        for _ in 0..depth {
            let mut next = Vec::new();
            for id in level {
                if self.expand(id) {
                    next.extend_from_slice(self.tree.children(id));
                }
            }
            level = next;
        }
    }

    /// Visible nodes in display order with their depth
    ///
    /// Children of collapsed folders and nodes hidden by the filter are
    /// skipped.
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .tree
            .top_level()
            .iter()
            .rev()
            .map(|&id| (id, 0))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.tree.get_node(id) else {
                continue;
            };
            if node.is_hidden() {
                continue;
            }
            rows.push((id, depth));
            if self.is_expanded(id) {
                stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
            }
        }
        rows
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().len()
    }

    pub fn get_selected(&self) -> Option<NodeId> {
        self.selected_node
    }

    pub fn set_selected(&mut self, node_id: Option<NodeId>) {
        self.selected_node = node_id;
    }

    pub fn select_first(&mut self) {
        self.selected_node = self.visible_rows().first().map(|&(id, _)| id);
    }

    pub fn select_last(&mut self) {
        self.selected_node = self.visible_rows().last().map(|&(id, _)| id);
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: isize) {
        let visible = self.visible_rows();
        if visible.is_empty() {
            return;
        }
        let current = self
            .selected_node
            .and_then(|selected| visible.iter().position(|&(id, _)| id == selected));
        let new_pos = match current {
            Some(pos) => pos
                .saturating_add_signed(delta)
                .min(visible.len() - 1),
            None => 0,
        };
        self.selected_node = Some(visible[new_pos].0);
    }

    pub fn click_selected(&mut self) -> Option<FileTreeEvent> {
        let id = self.selected_node?;
        self.tree.on_node_clicked(id)
    }

    pub fn double_click_selected(&mut self) -> Option<FileTreeEvent> {
        let id = self.selected_node?;
        self.tree.on_node_double_clicked(id)
    }

    pub fn activate_selected(&mut self) -> Option<FileTreeEvent> {
        let id = self.selected_node?;
        self.tree.on_node_activated(id)
    }

    pub fn column_width(&self, column: usize) -> usize {
        self.column_widths.get(column).copied().unwrap_or(0)
    }

    pub fn set_column_width(&mut self, column: usize, width: usize) {
        if let Some(slot) = self.column_widths.get_mut(column) {
            *slot = width;
        }
    }

    /// Fit a column to the widest visible cell (or its header)
    pub fn resize_column_to_contents(&mut self, column: usize) {
        if column >= HEADER_LABELS.len() {
            return;
        }
        let widest = self
            .visible_rows()
            .into_iter()
            .filter_map(|(id, depth)| self.cells(id, depth))
            .map(|cells| cells[column].width())
            .max()
            .unwrap_or(0);
        self.column_widths[column] = widest.max(HEADER_LABELS[column].width());
    }

    /// Text of the four cells of a row
    fn cells(&self, id: NodeId, depth: usize) -> Option<[String; 4]> {
        let node = self.tree.get_node(id)?;
        let marker = if !node.is_dir() {
            "∙"
        } else if self.is_expanded(id) {
            "-"
        } else {
            "+"
        };
        let entry = &node.entry;
        Some([
            format!("{}{} {}", "  ".repeat(depth), marker, entry.name),
            entry.size_display(),
            entry.type_label(),
            entry.mod_time_display(),
        ])
    }

    /// Render the header and visible rows as fixed-width text lines
    pub fn render_lines(&self) -> Vec<String> {
        let header = HEADER_LABELS.map(|label| label.to_string());
        let mut lines = vec![self.render_row(&header)];
        for (id, depth) in self.visible_rows() {
            if let Some(cells) = self.cells(id, depth) {
                lines.push(self.render_row(&cells));
            }
        }
        lines
    }

    fn render_row(&self, cells: &[String; 4]) -> String {
        let rendered: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(column, text)| {
                // Sizes read best right-aligned
                fit(text, self.column_widths[column], column == 1)
            })
            .collect();
        rendered.join(COLUMN_SEPARATOR)
    }
}

/// Truncate or pad `text` to exactly `width` display columns
fn fit(text: &str, width: usize, align_right: bool) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    let padding = " ".repeat(width - used);
    if align_right {
        padding + &out
    } else {
        out + &padding
    }
}
